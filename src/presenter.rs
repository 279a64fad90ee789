//! Presentation boundary.
//!
//! The gauge hands each classified offer to a [`Presenter`]. Rendering (a
//! floating overlay, a notification, a terminal line) belongs to the host;
//! this module provides the label model the overlay shows.

use std::fmt;

use crate::models::Tier;

/// Receives the latest classified offer. There is no return channel.
pub trait Presenter: Send + Sync {
    fn show(&self, value: f64, tier: Tier);
}

/// Indicator colour for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorColor {
    Green,
    Yellow,
    Red,
}

impl IndicatorColor {
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::High => IndicatorColor::Green,
            Tier::Low => IndicatorColor::Red,
            Tier::Medium => IndicatorColor::Yellow,
        }
    }

    /// `0xAARRGGBB`, opaque.
    pub fn argb(&self) -> u32 {
        match self {
            IndicatorColor::Green => 0xFF00_FF00,
            IndicatorColor::Yellow => 0xFFFF_FF00,
            IndicatorColor::Red => 0xFFFF_0000,
        }
    }
}

// ---------------------------------------------------------------------------
// OverlayLabel
// ---------------------------------------------------------------------------

/// What the floating indicator displays for one offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLabel {
    /// Formatted amount, e.g. `"R$ 15.50"`.
    pub value_text: String,
    /// Tier token, e.g. `"VERDE"`.
    pub status_text: String,
    pub color: IndicatorColor,
}

impl OverlayLabel {
    pub fn new(value: f64, tier: Tier) -> Self {
        Self {
            value_text: format!("R$ {:.2}", value),
            status_text: tier.as_str().to_string(),
            color: IndicatorColor::for_tier(tier),
        }
    }
}

impl fmt::Display for OverlayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value_text, self.status_text)
    }
}

// ---------------------------------------------------------------------------
// Built-in presenters
// ---------------------------------------------------------------------------

/// Logs each label at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn show(&self, value: f64, tier: Tier) {
        log::info!("{}", OverlayLabel::new(value, tier));
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show(&self, _value: f64, _tier: Tier) {}
}
