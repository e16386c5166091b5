//! Stand-in 24h currency projection. Only the output schema and ranges are
//! stable; the internals are a random walk around the recent change.

use crate::domain::currency::{CurrencyForecast, CurrencyRateRecord, Trend, VolatilityRisk};
use crate::random::RandomSource;

const TREND_THRESHOLD: f64 = 0.01;
const MAX_VOLATILITY: f64 = 0.02;
const HIGH_RISK_VOLATILITY: f64 = 0.015;
const MEDIUM_RISK_VOLATILITY: f64 = 0.008;
const CONFIDENCE_FLOOR: f64 = 70.0;
const CONFIDENCE_SPAN: f64 = 25.0;

pub fn trend_of(change: f64) -> Trend {
    if change > TREND_THRESHOLD {
        Trend::Bullish
    } else if change < -TREND_THRESHOLD {
        Trend::Bearish
    } else {
        Trend::Stable
    }
}

pub fn risk_of(volatility: f64) -> VolatilityRisk {
    if volatility > HIGH_RISK_VOLATILITY {
        VolatilityRisk::High
    } else if volatility > MEDIUM_RISK_VOLATILITY {
        VolatilityRisk::Medium
    } else {
        VolatilityRisk::Low
    }
}

/// Draws volatility, noise and confidence, in that order.
pub fn predict(rate: &CurrencyRateRecord, rng: &dyn RandomSource) -> CurrencyForecast {
    let volatility = rng.next_f64() * MAX_VOLATILITY;
    let noise = (rng.next_f64() - 0.5) * volatility;
    let confidence = (CONFIDENCE_FLOOR + rng.next_f64() * CONFIDENCE_SPAN)
        .floor()
        .min(CONFIDENCE_FLOOR + CONFIDENCE_SPAN - 1.0);

    CurrencyForecast {
        pair: format!("{}/{}", rate.from_currency, rate.to_currency),
        current_rate: rate.rate,
        predicted_24h: rate.rate + rate.change * 2.0 + noise,
        confidence: confidence as u8,
        trend: trend_of(rate.change),
        volatility_risk: risk_of(volatility),
    }
}
