use crate::domain::Sentiment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Simulated market state for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub ticker: String,
    pub price: f64,
    pub volume: u64,
    pub sentiment: Sentiment,
    /// Percent, within `[0, 50]`.
    pub volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPrice {
    pub ticker: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub currency: String,
    #[serde(rename = "priceInTWD")]
    pub price_in_base: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl FromStr for TradeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TradeAction::Buy),
            "SELL" => Ok(TradeAction::Sell),
            other => Err(format!("unknown trade action: {other}")),
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingAnalysis {
    pub recommended: bool,
    pub reason: String,
    pub optimal_window: String,
    pub fx_advantage: f64,
}

/// Simulated macro readings used by market monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroReading {
    pub ten_year_yield: f64,
    pub two_year_yield: f64,
    pub vix: f64,
    pub sentiment: String,
}

impl MacroReading {
    pub fn is_yield_curve_inverted(&self) -> bool {
        self.two_year_yield > self.ten_year_yield
    }
}
