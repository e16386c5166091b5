use super::Store;
use crate::domain::company::{Financials, NewCeoProfile, NewCompany};
use crate::domain::currency::RateUpdate;

fn company(name: &str, ticker: &str, sector: &str, currency: &str, f: [f64; 5]) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        ticker: ticker.to_string(),
        sector: sector.to_string(),
        currency: currency.to_string(),
        financials: Some(Financials {
            cash_reserves: Some(f[0]),
            annual_revenue: Some(f[1]),
            annual_profit: Some(f[2]),
            product_annual_revenue: Some(f[3]),
            annual_gross_profit: Some(f[4]),
        }),
    }
}

#[allow(clippy::too_many_arguments)]
fn executive(
    company_id: u64,
    name: &str,
    title: &str,
    tenure: u32,
    religion: &str,
    strategy: &str,
    leadership: &str,
    photo: &str,
) -> NewCeoProfile {
    NewCeoProfile {
        company_id,
        name: name.to_string(),
        title: title.to_string(),
        tenure,
        religion: religion.to_string(),
        strategy: strategy.to_string(),
        leadership: leadership.to_string(),
        photo_url: Some(format!(
            "https://images.unsplash.com/{photo}?w=150&h=150&fit=crop&crop=face"
        )),
    }
}

fn rate(from: &str, rate: f64, change: f64, pct: f64, forecast: &str, risk: &str) -> RateUpdate {
    RateUpdate {
        from_currency: from.to_string(),
        to_currency: "TWD".to_string(),
        rate,
        change,
        change_percent: pct,
        forecast_24h: Some(forecast.to_string()),
        volatility_risk: Some(risk.to_string()),
    }
}

pub(super) fn populate(store: &Store) {
    let apple = store.create_company(company(
        "Apple Inc.",
        "AAPL",
        "Technology",
        "USD",
        [62_000.0, 383_000.0, 100_000.0, 300_000.0, 170_000.0],
    ));
    let tesla = store.create_company(company(
        "Tesla Inc.",
        "TSLA",
        "Automotive",
        "USD",
        [22_000.0, 96_773.0, 1_535.0, 80_000.0, 20_000.0],
    ));
    let fortescue = store.create_company(company(
        "Fortescue Metals Group",
        "FMG",
        "Mining",
        "AUD",
        [4_900.0, 18_220.0, 5_700.0, 16_400.0, 9_547.0],
    ));

    store.create_ceo_profile(executive(
        apple.id,
        "Tim Cook",
        "CEO",
        13,
        "Christian",
        "Innovation-focused",
        "Transformational",
        "photo-1507003211169-0a1dd7228f2d",
    ));
    store.create_ceo_profile(executive(
        tesla.id,
        "Elon Musk",
        "CEO",
        15,
        "Other Religion",
        "Disruptive Growth",
        "Visionary",
        "photo-1472099645785-5658abf4ff4e",
    ));
    store.create_ceo_profile(executive(
        fortescue.id,
        "Andrew Forrest",
        "Executive Chairman",
        18,
        "Christian",
        "ESG-focused",
        "Sustainable",
        "photo-1560250097-0b93528c311a",
    ));

    store.upsert_currency_rate(rate(
        "USD",
        31.245,
        0.12,
        0.38,
        "Bullish (+0.8%)",
        "Low (12%)",
    ));
    store.upsert_currency_rate(rate(
        "JPY",
        0.2089,
        -0.003,
        -1.42,
        "Bearish (-0.5%)",
        "Medium (18%)",
    ));
    store.upsert_currency_rate(rate(
        "AUD",
        20.467,
        0.08,
        0.39,
        "Stable (+0.2%)",
        "Low (10%)",
    ));
}
