use crate::domain::portfolio::{DividendProjection, PortfolioSummary};
use chrono::{DateTime, Duration, Utc};

const DEFAULT_YIELD_PERCENT: f64 = 2.0;
const PAYMENTS_PER_YEAR: f64 = 4.0;
const NEXT_PAYMENT_DAYS: i64 = 30;

/// Trailing dividend yield in percent.
pub fn dividend_yield(ticker: &str) -> f64 {
    match ticker {
        "AAPL" => 0.52,
        "TSLA" => 0.0,
        "FMG" => 8.5,
        _ => DEFAULT_YIELD_PERCENT,
    }
}

pub fn project_dividends(summary: &PortfolioSummary, now: DateTime<Utc>) -> DividendProjection {
    let annual: f64 = summary
        .positions
        .iter()
        .map(|p| p.current_value * dividend_yield(&p.company.ticker) / 100.0)
        .sum();

    let yield_percent = if summary.total_value > 0.0 {
        annual / summary.total_value * 100.0
    } else {
        0.0
    };

    DividendProjection {
        annual_dividend: annual,
        yield_percent,
        next_payment: annual / PAYMENTS_PER_YEAR,
        next_payment_date: now + Duration::days(NEXT_PAYMENT_DAYS),
    }
}
