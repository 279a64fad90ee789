use std::path::PathBuf;

/// Namespace of the local key-value store the history lives in.
pub const DEFAULT_NAMESPACE: &str = "driver_prefs";

/// Key under which the serialized history array is stored.
pub const HISTORY_KEY: &str = "offers_history";

/// Maximum number of offers kept in the history.
pub const MAX_HISTORY: usize = 50;

/// Rates strictly below this are `Tier::Low`.
pub const LOW_RATE_THRESHOLD: f64 = 1.5;

/// Rates strictly above this are `Tier::High`.
pub const HIGH_RATE_THRESHOLD: f64 = 2.2;

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("fare-gauge")
    } else {
        PathBuf::from(".fare-gauge")
    }
}
