use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Tier — Profitability classification of an offer
// ---------------------------------------------------------------------------

/// Three-way profitability tier derived from an offer's rate (value per km).
///
/// Serialized with the tokens found in existing stored histories
/// (`VERMELHO`, `AMARELO`, `VERDE`). The English names are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "VERMELHO", alias = "LOW")]
    Low,
    #[serde(rename = "AMARELO", alias = "MEDIUM")]
    Medium,
    #[serde(rename = "VERDE", alias = "HIGH")]
    High,
}

impl Tier {
    /// Stored token for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "VERMELHO",
            Tier::Medium => "AMARELO",
            Tier::High => "VERDE",
        }
    }

    /// English label (`LOW`, `MEDIUM`, `HIGH`).
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "LOW",
            Tier::Medium => "MEDIUM",
            Tier::High => "HIGH",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
