//! Ride offer profitability gauge.
//!
//! Turns ride offers observed on screen into a value-per-km rate, classifies
//! the rate into a [`Tier`], keeps a bounded newest-first history on local
//! disk and hands the latest result to a [`Presenter`].
//!
//! # Quick start
//!
//! ```no_run
//! use fare_gauge::FareGauge;
//!
//! let gauge = FareGauge::builder().data_dir("/tmp/fare-gauge").build().unwrap();
//!
//! // Classify and record an offer directly
//! let outcome = gauge.process_offer(15.50, 5.0).unwrap();
//! println!("{}", outcome.record);
//!
//! // Or feed raw screen text
//! gauge.observe_text("R$ 6,00 · 6,0 km").unwrap();
//!
//! for line in gauge.history_lines() {
//!     println!("{line}");
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod history;
pub mod models;
pub mod prefs;
pub mod presenter;

#[cfg(feature = "async")]
pub use async_client::AsyncFareGauge;
pub use classifier::classify;
pub use error::{FareGaugeError, Result};
pub use extract::{ScreenEvent, ScreenNode, TextNode};
pub use history::HistoryStore;
pub use models::{OfferRecord, Tier};
pub use prefs::Preferences;
pub use presenter::{LogPresenter, NullPresenter, OverlayLabel, Presenter};

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// FareGaugeBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FareGauge`].
///
/// Use [`FareGauge::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](FareGaugeBuilder::build).
pub struct FareGaugeBuilder {
    data_dir: Option<PathBuf>,
    namespace: String,
    presenter: Box<dyn Presenter>,
}

impl Default for FareGaugeBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            namespace: config::DEFAULT_NAMESPACE.to_string(),
            presenter: Box::new(LogPresenter),
        }
    }
}

impl FareGaugeBuilder {
    /// Set the directory the history is stored in.
    ///
    /// If not set, the platform-appropriate local data directory is used
    /// (e.g. `~/.local/share/fare-gauge` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the key-value namespace name. Defaults to `driver_prefs`.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Set the presenter that receives each classified offer.
    ///
    /// Defaults to [`LogPresenter`].
    pub fn presenter<P: Presenter + 'static>(mut self, presenter: P) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    /// Build the gauge, opening (and creating if needed) the data directory.
    pub fn build(self) -> Result<FareGauge> {
        let prefs = Preferences::open(self.data_dir, &self.namespace)?;
        Ok(FareGauge {
            history: HistoryStore::new(prefs),
            presenter: self.presenter,
        })
    }
}

// ---------------------------------------------------------------------------
// FareGauge
// ---------------------------------------------------------------------------

/// Result of processing one offer.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferOutcome {
    pub record: OfferRecord,
    /// `false` when the offer repeated the newest history entry and was not stored again.
    pub recorded: bool,
}

/// Orchestrates extraction, classification, history and presentation.
///
/// Created via [`FareGauge::builder()`].
pub struct FareGauge {
    history: HistoryStore,
    presenter: Box<dyn Presenter>,
}

impl FareGauge {
    /// Create a new builder for configuring the gauge.
    pub fn builder() -> FareGaugeBuilder {
        FareGaugeBuilder::default()
    }

    /// Classify an offer, record it and present it.
    ///
    /// The offer is presented even when the history suppressed it as a
    /// repeat of the newest entry.
    pub fn process_offer(&self, value: f64, distance: f64) -> Result<OfferOutcome> {
        let record = OfferRecord::capture(value, distance)?;
        let recorded = self.history.append(record.clone())?;
        self.presenter.show(record.value(), record.classification());

        log::debug!(
            "Captured offer: R$ {} over {} km -> {} (recorded: {})",
            value,
            distance,
            record.classification(),
            recorded
        );
        Ok(OfferOutcome { record, recorded })
    }

    /// Extract an offer from one text fragment and process it.
    ///
    /// Returns `Ok(None)` when the text holds no complete offer or the
    /// extracted pair cannot be classified (e.g. a `0,0 km` distance).
    pub fn observe_text(&self, text: &str) -> Result<Option<OfferOutcome>> {
        let Some((value, distance)) = extract::extract_offer(text) else {
            return Ok(None);
        };
        if let Err(e) = classifier::validate(value, distance) {
            log::debug!("Skipping fragment {:?}: {}", text, e);
            return Ok(None);
        }
        self.process_offer(value, distance).map(Some)
    }

    /// Handle a screen event by scanning the host's screen tree.
    ///
    /// Events other than content/state changes are ignored. Every text
    /// fragment in the tree is observed in depth-first order.
    pub fn on_screen_event<N: ScreenNode>(
        &self,
        event: ScreenEvent,
        root: N,
    ) -> Result<Vec<OfferOutcome>> {
        if !event.triggers_scan() {
            return Ok(Vec::new());
        }
        let mut outcomes = Vec::new();
        for fragment in extract::collect_fragments(root) {
            if let Some(outcome) = self.observe_text(&fragment)? {
                outcomes.push(outcome);
            }
        }
        Ok(outcomes)
    }

    /// Stored history, newest first.
    pub fn history(&self) -> Vec<OfferRecord> {
        self.history.load_all()
    }

    /// History formatted for a list view, newest first.
    pub fn history_lines(&self) -> Vec<String> {
        self.history().iter().map(ToString::to_string).collect()
    }

    /// Drop all stored history.
    pub fn clear_history(&self) -> Result<()> {
        self.history.clear()
    }

    /// Return a reference to the underlying [`HistoryStore`].
    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    /// Consume the gauge.
    ///
    /// Equivalent to dropping it: every write is already on disk when the
    /// call that made it returns, so there is nothing to flush.
    pub fn close(self) {
        drop(self);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for FareGauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FareGauge(store={}, entries={})",
            self.history.path().display(),
            self.history.len()
        )
    }
}
