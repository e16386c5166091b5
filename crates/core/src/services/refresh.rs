use super::ai::AiService;
use super::financial::FinancialService;
use crate::domain::alert::MarketAlert;
use crate::domain::currency::{CurrencyForecast, CurrencyRateRecord};
use crate::domain::recommendation::AiRecommendation;
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const REFRESH_SUCCESS_MESSAGE: &str = "All data refreshed successfully";

/// What one full refresh produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    pub rates: Vec<CurrencyRateRecord>,
    pub recommendations: Vec<AiRecommendation>,
    pub alerts: Vec<MarketAlert>,
    pub forecasts: Vec<CurrencyForecast>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshReport {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

impl RefreshOutcome {
    pub fn report(&self) -> RefreshReport {
        RefreshReport {
            success: true,
            message: REFRESH_SUCCESS_MESSAGE.to_string(),
            timestamp: self.completed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Rates, then recommendations, then market monitoring, then forecasts. The
/// first failing step aborts the rest.
pub async fn refresh_all(
    ai: &AiService,
    financial: &FinancialService,
) -> anyhow::Result<RefreshOutcome> {
    let started = std::time::Instant::now();

    let rates = financial
        .update_currency_rates()
        .context("update currency rates")?;
    let recommendations = ai
        .generate_recommendations()
        .await
        .context("generate recommendations")?;
    let alerts = ai
        .monitor_market_conditions()
        .await
        .context("monitor market conditions")?;
    let forecasts = ai
        .forecast_currency_rates()
        .context("forecast currency rates")?;

    tracing::info!(
        rates = rates.len(),
        recommendations = recommendations.len(),
        alerts = alerts.len(),
        forecasts = forecasts.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "refresh complete"
    );

    Ok(RefreshOutcome {
        rates,
        recommendations,
        alerts,
        forecasts,
        completed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::currency::RateUpdate;
    use crate::notify::MemoryNotifier;
    use crate::random::ScriptedRandom;
    use crate::services::Services;
    use crate::storage::Store;
    use std::sync::Arc;

    fn services(store: Store) -> Services {
        Services::new(
            Arc::new(store),
            Arc::new(ScriptedRandom::constant(0.5)),
            Arc::new(MemoryNotifier::new()),
        )
    }

    #[tokio::test]
    async fn full_refresh_reports_success() {
        let services = services(Store::seeded());
        let outcome = services.refresh_all().await.unwrap();

        assert_eq!(outcome.rates.len(), 3);
        assert_eq!(outcome.forecasts.len(), 3);
        assert!(outcome.recommendations.is_empty());
        assert!(outcome.alerts.is_empty());

        let report = outcome.report();
        assert!(report.success);
        assert_eq!(report.message, "All data refreshed successfully");
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());

        // Forecast runs last, so its labels are what the store keeps.
        let usd = services.store.currency_rate("USD", "TWD").unwrap();
        assert_eq!(usd.volatility_risk.as_deref(), Some("MEDIUM (82%)"));
    }

    #[tokio::test]
    async fn corrupt_rate_aborts_before_later_steps() {
        let store = Store::seeded();
        store.upsert_currency_rate(RateUpdate {
            from_currency: "EUR".to_string(),
            to_currency: "TWD".to_string(),
            rate: 0.0,
            change: 0.0,
            change_percent: 0.0,
            forecast_24h: None,
            volatility_risk: None,
        });
        let services = services(store);

        let err = services.refresh_all().await.unwrap_err();
        assert!(format!("{err:#}").contains("update currency rates"));
        assert!(services.store.recommendations().is_empty());
    }
}
