//! Async wrapper around [`FareGauge`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all gauge operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free of the
//! history file reads and writes.
//!
//! # Example
//!
//! ```no_run
//! use fare_gauge::AsyncFareGauge;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gauge = AsyncFareGauge::builder().build().await.unwrap();
//!
//!     let outcome = gauge.process_offer(15.50, 5.0).await.unwrap();
//!     println!("{}", outcome.record);
//!
//!     // Run any sync gauge method via closure
//!     let lines = gauge.run(|g| Ok(g.history_lines())).await.unwrap();
//! }
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::{FareGaugeError, Result};
use crate::presenter::Presenter;
use crate::{FareGauge, FareGaugeBuilder, OfferOutcome, OfferRecord};

// ---------------------------------------------------------------------------
// AsyncFareGaugeBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncFareGauge`] instance.
#[derive(Default)]
pub struct AsyncFareGaugeBuilder {
    inner: FareGaugeBuilder,
}

impl AsyncFareGaugeBuilder {
    /// Set the directory the history is stored in.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.data_dir(path);
        self
    }

    /// Set the key-value namespace name.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.inner = self.inner.namespace(namespace);
        self
    }

    /// Set the presenter that receives each classified offer.
    pub fn presenter<P: Presenter + 'static>(mut self, presenter: P) -> Self {
        self.inner = self.inner.presenter(presenter);
        self
    }

    /// Build the async gauge.
    ///
    /// Opening the data directory runs on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncFareGauge> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let gauge = inner.build()?;
            Ok(AsyncFareGauge {
                inner: Arc::new(Mutex::new(gauge)),
            })
        })
        .await
        .map_err(|e| FareGaugeError::Runtime(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncFareGauge
// ---------------------------------------------------------------------------

/// Async wrapper around [`FareGauge`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`], one at a time.
pub struct AsyncFareGauge {
    inner: Arc<Mutex<FareGauge>>,
}

impl AsyncFareGauge {
    /// Create a new builder for configuring the async gauge.
    pub fn builder() -> AsyncFareGaugeBuilder {
        AsyncFareGaugeBuilder::default()
    }

    /// Run a sync gauge operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FareGauge) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let gauge = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = gauge
                .lock()
                .map_err(|_| FareGaugeError::Runtime("gauge lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| FareGaugeError::Runtime(format!("Task join error: {e}")))?
    }

    /// Classify, record and present an offer asynchronously.
    pub async fn process_offer(&self, value: f64, distance: f64) -> Result<OfferOutcome> {
        self.run(move |g| g.process_offer(value, distance)).await
    }

    /// Extract and process an offer from a text fragment asynchronously.
    pub async fn observe_text(&self, text: &str) -> Result<Option<OfferOutcome>> {
        let text = text.to_string();
        self.run(move |g| g.observe_text(&text)).await
    }

    /// Stored history, newest first.
    pub async fn history(&self) -> Result<Vec<OfferRecord>> {
        self.run(|g| Ok(g.history())).await
    }
}
