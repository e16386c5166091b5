pub mod alert;
pub mod company;
pub mod contract;
pub mod currency;
pub mod decimal_text;
pub mod market;
pub mod news;
pub mod portfolio;
pub mod recommendation;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier handed out by the store's shared sequential allocator.
pub type Id = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }

    /// +1 / -1 / 0 contribution of a single article to a news sentiment average.
    pub fn weight(self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Negative => -1.0,
            Sentiment::Neutral => 0.0,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
