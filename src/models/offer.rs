use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classifier;
use crate::error::{FareGaugeError, Result};
use crate::models::Tier;

// ---------------------------------------------------------------------------
// OfferRecord — One captured ride proposal
// ---------------------------------------------------------------------------

/// A single classified ride offer as kept in the history.
///
/// Records are immutable once built. [`OfferRecord::new`] derives the tier
/// from `(value, distance)`; the only other source of records is
/// deserialization of previously stored history, which rejects records whose
/// value or distance could not have been classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredOffer")]
pub struct OfferRecord {
    #[serde(rename = "valor")]
    value: f64,
    #[serde(rename = "distancia")]
    distance: f64,
    classification: Tier,
    #[serde(rename = "timestamp")]
    captured_at: i64,
}

impl OfferRecord {
    /// Build a record captured at `captured_at` (epoch milliseconds).
    ///
    /// Fails with `InvalidInput` if the pair cannot be classified
    /// (non-positive distance, negative value, non-finite numbers).
    pub fn new(value: f64, distance: f64, captured_at: i64) -> Result<Self> {
        let classification = classifier::classify(value, distance)?;
        Ok(Self {
            value,
            distance,
            classification,
            captured_at,
        })
    }

    /// Build a record stamped with the current wall-clock time.
    pub fn capture(value: f64, distance: f64) -> Result<Self> {
        Self::new(value, distance, Utc::now().timestamp_millis())
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn classification(&self) -> Tier {
        self.classification
    }

    /// Capture time in epoch milliseconds.
    pub fn captured_at(&self) -> i64 {
        self.captured_at
    }

    /// Capture time as a UTC datetime, if the stored millisecond value is in range.
    pub fn captured_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.captured_at)
    }

    /// Value per kilometre.
    pub fn rate(&self) -> f64 {
        self.value / self.distance
    }

    /// True if `other` describes the same observed offer (same value and distance).
    pub fn same_offer(&self, other: &OfferRecord) -> bool {
        self.value == other.value && self.distance == other.distance
    }

    /// Serialize to the stored JSON object form.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse one stored JSON object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }
}

/// Stored shape of an [`OfferRecord`], checked before it becomes one.
#[derive(Deserialize)]
struct StoredOffer {
    valor: f64,
    distancia: f64,
    classification: Tier,
    timestamp: i64,
}

impl TryFrom<StoredOffer> for OfferRecord {
    type Error = FareGaugeError;

    fn try_from(stored: StoredOffer) -> Result<Self> {
        classifier::validate(stored.valor, stored.distancia)?;
        Ok(Self {
            value: stored.valor,
            distance: stored.distancia,
            classification: stored.classification,
            captured_at: stored.timestamp,
        })
    }
}

impl fmt::Display for OfferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R$ {:.2} - {:.1} km - {}",
            self.value, self.distance, self.classification
        )
    }
}
