//! Bounded, newest-first offer history persisted in a [`Preferences`] namespace.
//!
//! The whole history is one JSON array string under [`HISTORY_KEY`]. Appends
//! are read-modify-write transactions serialized by the store's mutex, and
//! each write atomically replaces the stored document.

use std::sync::{Mutex, MutexGuard};

use crate::config::{HISTORY_KEY, MAX_HISTORY};
use crate::error::{FareGaugeError, Result};
use crate::models::OfferRecord;
use crate::prefs::Preferences;

/// Durable history of classified offers, newest first, at most
/// [`MAX_HISTORY`] entries.
pub struct HistoryStore {
    prefs: Mutex<Preferences>,
}

impl HistoryStore {
    /// Wrap an opened preferences namespace.
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs: Mutex::new(prefs),
        }
    }

    /// Record an offer at the head of the history.
    ///
    /// Returns `Ok(false)` without writing when the current newest record has
    /// the same value and distance: the same on-screen offer fires many
    /// observation events while it stays visible. Only the head is compared,
    /// so an offer seen again after other offers is recorded again.
    pub fn append(&self, record: OfferRecord) -> Result<bool> {
        let prefs = self.lock();
        let mut history = load_or_empty(&prefs);

        if history.first().is_some_and(|last| last.same_offer(&record)) {
            return Ok(false);
        }

        history.insert(0, record);
        history.truncate(MAX_HISTORY);

        let serialized = serde_json::to_string(&history)?;
        prefs.put_string(HISTORY_KEY, &serialized)?;
        Ok(true)
    }

    /// All stored records, newest first.
    ///
    /// Returns an empty history when nothing is stored or when the stored
    /// data cannot be parsed.
    pub fn load_all(&self) -> Vec<OfferRecord> {
        load_or_empty(&self.lock())
    }

    /// The newest record, if any.
    pub fn latest(&self) -> Option<OfferRecord> {
        self.load_all().into_iter().next()
    }

    pub fn len(&self) -> usize {
        self.load_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored record.
    pub fn clear(&self) -> Result<()> {
        self.lock().remove(HISTORY_KEY)
    }

    /// Path of the namespace document backing this store.
    pub fn path(&self) -> std::path::PathBuf {
        self.lock().path()
    }

    fn lock(&self) -> MutexGuard<'_, Preferences> {
        // Preferences carries no in-memory state to corrupt.
        self.prefs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read and parse the stored history.
fn read_history(prefs: &Preferences) -> Result<Vec<OfferRecord>> {
    let raw = match prefs.get_string(HISTORY_KEY)? {
        Some(raw) => raw,
        None => return Ok(Vec::new()),
    };
    serde_json::from_str(&raw).map_err(|e| FareGaugeError::PersistenceCorrupt(e.to_string()))
}

fn load_or_empty(prefs: &Preferences) -> Vec<OfferRecord> {
    match read_history(prefs) {
        Ok(history) => history,
        Err(e) => {
            log::warn!(
                "Ignoring stored offer history in {}: {}",
                prefs.path().display(),
                e
            );
            Vec::new()
        }
    }
}
