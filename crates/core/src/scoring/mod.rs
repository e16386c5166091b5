//! Calculators that turn market, news, FX and position inputs into signals and
//! valuations. None of them touch the store.

pub mod dividends;
pub mod forecast;
pub mod recommendation;
pub mod timing;
pub mod valuation;

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
