//! Offer profitability classification.
//!
//! An offer's rate is its value divided by its distance in kilometres. The
//! rate is split into three tiers by two fixed thresholds with strict
//! comparisons, so both threshold values themselves land in `Medium`.

use crate::config::{HIGH_RATE_THRESHOLD, LOW_RATE_THRESHOLD};
use crate::error::{FareGaugeError, Result};
use crate::models::Tier;

/// Validate an offer's value and distance.
///
/// Distance must be finite and strictly positive; value must be finite and
/// non-negative.
pub fn validate(value: f64, distance: f64) -> Result<()> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(FareGaugeError::InvalidInput(format!(
            "distance must be a positive number of km, got {}",
            distance
        )));
    }
    if !value.is_finite() || value < 0.0 {
        return Err(FareGaugeError::InvalidInput(format!(
            "value must be a non-negative amount, got {}",
            value
        )));
    }
    Ok(())
}

/// Value per kilometre for a validated offer.
pub fn rate(value: f64, distance: f64) -> Result<f64> {
    validate(value, distance)?;
    Ok(value / distance)
}

/// Classify an offer into a [`Tier`].
///
/// - `rate < 1.5` is `Low`
/// - `rate > 2.2` is `High`
/// - anything else (including exactly 1.5 and 2.2) is `Medium`
pub fn classify(value: f64, distance: f64) -> Result<Tier> {
    Ok(tier_for_rate(rate(value, distance)?))
}

/// Map an already computed rate to its tier.
pub fn tier_for_rate(rate: f64) -> Tier {
    if rate < LOW_RATE_THRESHOLD {
        Tier::Low
    } else if rate > HIGH_RATE_THRESHOLD {
        Tier::High
    } else {
        Tier::Medium
    }
}
