//! Shared test fixtures for the fare-gauge integration tests.
//!
//! Stores and gauges are created inside a `tempfile::TempDir`; callers must
//! keep the returned `TempDir` alive for the duration of the test.

use fare_gauge::{FareGauge, HistoryStore, OfferRecord, Preferences, Presenter, Tier};
use std::sync::{Arc, Mutex};

pub const NAMESPACE: &str = "driver_prefs";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Open a `HistoryStore` in a fresh temporary directory.
pub fn setup_store() -> (HistoryStore, tempfile::TempDir) {
    init_logging();
    let tmp_dir = tempfile::tempdir().unwrap();
    let prefs = open_prefs(&tmp_dir);
    (HistoryStore::new(prefs), tmp_dir)
}

/// Open the fixture namespace inside `dir`.
pub fn open_prefs(dir: &tempfile::TempDir) -> Preferences {
    Preferences::open(Some(dir.path().to_path_buf()), NAMESPACE).unwrap()
}

/// Build a `FareGauge` with a recording presenter in a fresh temporary directory.
pub fn setup_gauge() -> (FareGauge, RecordingPresenter, tempfile::TempDir) {
    init_logging();
    let tmp_dir = tempfile::tempdir().unwrap();
    let presenter = RecordingPresenter::default();
    let gauge = FareGauge::builder()
        .data_dir(tmp_dir.path())
        .namespace(NAMESPACE)
        .presenter(presenter.clone())
        .build()
        .unwrap();
    (gauge, presenter, tmp_dir)
}

/// Record with a fixed capture time.
pub fn record(value: f64, distance: f64, captured_at: i64) -> OfferRecord {
    OfferRecord::new(value, distance, captured_at).unwrap()
}

/// Presenter that remembers every `(value, tier)` it was shown.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    shown: Arc<Mutex<Vec<(f64, Tier)>>>,
}

impl RecordingPresenter {
    pub fn shown(&self) -> Vec<(f64, Tier)> {
        self.shown.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn show(&self, value: f64, tier: Tier) {
        self.shown.lock().unwrap().push((value, tier));
    }
}
