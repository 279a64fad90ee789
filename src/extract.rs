//! Offer extraction from observed screen text.
//!
//! The host supplies text through a [`ScreenNode`] tree it owns. Each node's
//! text is matched independently for a price (`R$ 15,50`, `15.50`) and a
//! distance (`4,5 km`, `4.5km`); a node yields an offer only when both match.

use std::sync::LazyLock;

use regex::Regex;

/// Price: optional `R$` prefix, then ASCII digits with exactly two decimals.
static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:R\$\s?)?([0-9]+[.,][0-9]{2})").unwrap());

/// Distance: an ASCII decimal number followed by `km`.
static DISTANCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+[.,][0-9]+)\s?km").unwrap());

// ---------------------------------------------------------------------------
// Screen events
// ---------------------------------------------------------------------------

/// Screen change notifications forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    WindowContentChanged,
    WindowStateChanged,
    Other,
}

impl ScreenEvent {
    /// Whether this event should trigger a scan of the screen tree.
    pub fn triggers_scan(&self) -> bool {
        matches!(
            self,
            ScreenEvent::WindowContentChanged | ScreenEvent::WindowStateChanged
        )
    }
}

// ---------------------------------------------------------------------------
// ScreenNode
// ---------------------------------------------------------------------------

/// A node in a host-owned screen content tree.
///
/// Children are fetched by index and may be missing (the host tree can
/// change underneath the scan); missing children are skipped.
pub trait ScreenNode: Sized {
    /// The node's visible text, if any.
    fn text(&self) -> Option<String>;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Self>;
}

/// Simple owned tree of text nodes, for hosts that snapshot the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextNode {
    pub text: Option<String>,
    pub children: Vec<TextNode>,
}

impl TextNode {
    /// A leaf node with text.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// A text-less container node.
    pub fn container(children: Vec<TextNode>) -> Self {
        Self {
            text: None,
            children,
        }
    }
}

impl<'a> ScreenNode for &'a TextNode {
    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        let node: &'a TextNode = self;
        node.children.get(index)
    }
}

/// Collect every non-empty text in the tree, depth-first pre-order.
pub fn collect_fragments<N: ScreenNode>(root: N) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(text) = node.text().filter(|t| !t.is_empty()) {
            fragments.push(text);
        }
        let children: Vec<N> = (0..node.child_count())
            .filter_map(|i| node.child(i))
            .collect();
        stack.extend(children.into_iter().rev());
    }

    fragments
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// First price in `text`, accepting `,` or `.` as decimal separator.
pub fn extract_price(text: &str) -> Option<f64> {
    first_number(&PRICE_PATTERN, text)
}

/// First distance in km in `text`, accepting `,` or `.` as decimal separator.
pub fn extract_distance(text: &str) -> Option<f64> {
    first_number(&DISTANCE_PATTERN, text)
}

/// `(value, distance)` when `text` contains both a price and a distance.
pub fn extract_offer(text: &str) -> Option<(f64, f64)> {
    Some((extract_price(text)?, extract_distance(text)?))
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    let captured = pattern.captures(text)?.get(1)?.as_str();
    captured.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_number_normalises_comma() {
        assert_eq!(first_number(&PRICE_PATTERN, "R$ 12,34"), Some(12.34));
        assert_eq!(first_number(&DISTANCE_PATTERN, "7,25 km"), Some(7.25));
    }

    #[test]
    fn only_content_and_state_changes_trigger_scan() {
        assert!(ScreenEvent::WindowContentChanged.triggers_scan());
        assert!(ScreenEvent::WindowStateChanged.triggers_scan());
        assert!(!ScreenEvent::Other.triggers_scan());
    }
}
