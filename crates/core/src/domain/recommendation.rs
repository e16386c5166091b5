use crate::domain::{decimal_text, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TIMING_IMMEDIATE: &str = "Immediate";
pub const TIMING_NEXT_DAYS: &str = "Next 24-48 hours";
pub const TIMING_WAIT_FX: &str = "Wait for better FX rates";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        })
    }
}

/// Output of the recommendation scorer for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub signal: Signal,
    pub confidence: u8,
    pub target_price: f64,
    pub reasoning: String,
    pub fx_advantage: f64,
    pub optimal_timing: String,
    /// Composite score the signal was resolved from.
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    pub id: Id,
    pub company_id: Id,
    pub signal: Signal,
    #[serde(with = "decimal_text")]
    pub confidence: u8,
    #[serde(default, with = "decimal_text::option")]
    pub target_price: Option<f64>,
    pub reasoning: String,
    #[serde(default, with = "decimal_text::option")]
    pub fx_advantage: Option<f64>,
    #[serde(default)]
    pub optimal_timing: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendation {
    pub company_id: Id,
    pub signal: Signal,
    pub confidence: u8,
    pub target_price: Option<f64>,
    pub reasoning: String,
    pub fx_advantage: Option<f64>,
    pub optimal_timing: Option<String>,
}

impl NewRecommendation {
    pub fn from_result(company_id: Id, result: &RecommendationResult) -> Self {
        Self {
            company_id,
            signal: result.signal,
            confidence: result.confidence,
            target_price: Some(result.target_price),
            reasoning: result.reasoning.clone(),
            fx_advantage: Some(result.fx_advantage),
            optimal_timing: Some(result.optimal_timing.clone()),
        }
    }
}
