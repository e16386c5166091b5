use crate::domain::{decimal_text, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Currency portfolio totals and FX impact are reported in.
pub const BASE_CURRENCY: &str = "TWD";

/// Store key of a currency pair (`USD-TWD`).
pub fn pair_key(from_currency: &str, to_currency: &str) -> String {
    format!("{from_currency}-{to_currency}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRateRecord {
    pub id: Id,
    pub from_currency: String,
    pub to_currency: String,
    #[serde(with = "decimal_text")]
    pub rate: f64,
    #[serde(with = "decimal_text")]
    pub change: f64,
    #[serde(with = "decimal_text")]
    pub change_percent: f64,
    #[serde(rename = "forecast24h", default)]
    pub forecast_24h: Option<String>,
    #[serde(default)]
    pub volatility_risk: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CurrencyRateRecord {
    pub fn key(&self) -> String {
        pair_key(&self.from_currency, &self.to_currency)
    }

    /// Upsert payload carrying this record's current values.
    pub fn to_update(&self) -> RateUpdate {
        RateUpdate {
            from_currency: self.from_currency.clone(),
            to_currency: self.to_currency.clone(),
            rate: self.rate,
            change: self.change,
            change_percent: self.change_percent,
            forecast_24h: self.forecast_24h.clone(),
            volatility_risk: self.volatility_risk.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateUpdate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
    pub change: f64,
    pub change_percent: f64,
    pub forecast_24h: Option<String>,
    pub volatility_risk: Option<String>,
}

impl RateUpdate {
    pub fn key(&self) -> String {
        pair_key(&self.from_currency, &self.to_currency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bullish,
    Bearish,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Bullish => "BULLISH",
            Trend::Bearish => "BEARISH",
            Trend::Stable => "STABLE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for VolatilityRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolatilityRisk::Low => "LOW",
            VolatilityRisk::Medium => "MEDIUM",
            VolatilityRisk::High => "HIGH",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyForecast {
    pub pair: String,
    pub current_rate: f64,
    #[serde(rename = "predicted24h")]
    pub predicted_24h: f64,
    pub confidence: u8,
    pub trend: Trend,
    pub volatility_risk: VolatilityRisk,
}

impl CurrencyForecast {
    /// `"BULLISH (0.24)"`: trend plus the projected 24h delta.
    pub fn forecast_label(&self) -> String {
        format!(
            "{} ({:.2})",
            self.trend,
            self.predicted_24h - self.current_rate
        )
    }

    /// `"LOW (82%)"`: risk bucket plus confidence.
    pub fn risk_label(&self) -> String {
        format!("{} ({}%)", self.volatility_risk, self.confidence)
    }
}

/// Conversion factors from a currency into [`BASE_CURRENCY`].
#[derive(Debug, Clone, PartialEq)]
pub struct FxTable {
    rates: HashMap<String, f64>,
}

impl FxTable {
    pub fn new() -> Self {
        let mut rates = HashMap::new();
        rates.insert(BASE_CURRENCY.to_string(), 1.0);
        Self { rates }
    }

    /// Rates the dashboard starts with before the first refresh.
    pub fn seeded() -> Self {
        let mut table = Self::new();
        table.set("USD", 31.245);
        table.set("AUD", 20.467);
        table.set("JPY", 0.2089);
        table
    }

    pub fn set(&mut self, currency: &str, rate: f64) {
        self.rates.insert(currency.to_string(), rate);
    }

    pub fn get(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    /// Factor for `currency`, falling back to 1 for unknown currencies.
    pub fn rate_of(&self, currency: &str) -> f64 {
        self.get(currency).unwrap_or(1.0)
    }
}

impl Default for FxTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, f64)> for FxTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (currency, rate) in iter {
            table.set(&currency, rate);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_currency_converts_at_par() {
        let fx = FxTable::seeded();
        assert_eq!(fx.rate_of("USD"), 31.245);
        assert_eq!(fx.rate_of("TWD"), 1.0);
        assert_eq!(fx.rate_of("CHF"), 1.0);
        assert_eq!(fx.get("CHF"), None);
    }

    #[test]
    fn forecast_labels() {
        let f = CurrencyForecast {
            pair: "USD/TWD".to_string(),
            current_rate: 31.0,
            predicted_24h: 31.2449,
            confidence: 82,
            trend: Trend::Bullish,
            volatility_risk: VolatilityRisk::Medium,
        };
        assert_eq!(f.forecast_label(), "BULLISH (0.24)");
        assert_eq!(f.risk_label(), "MEDIUM (82%)");
    }

    #[test]
    fn rate_record_uses_text_decimals() {
        let r = CurrencyRateRecord {
            id: 4,
            from_currency: "USD".to_string(),
            to_currency: "TWD".to_string(),
            rate: 31.245,
            change: 0.12,
            change_percent: 0.38,
            forecast_24h: None,
            volatility_risk: None,
            updated_at: Utc::now(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["rate"], "31.245");
        assert_eq!(v["changePercent"], "0.38");
        assert!(v.get("forecast24h").is_some());
        assert_eq!(r.key(), "USD-TWD");
    }
}
