use crate::domain::alert::{
    MarketAlert, NewMarketAlert, Severity, ALERT_CRASH_WARNING, ALERT_SENTIMENT,
};
use crate::domain::currency::{CurrencyForecast, BASE_CURRENCY};
use crate::domain::news::average_sentiment;
use crate::domain::recommendation::{AiRecommendation, NewRecommendation};
use crate::domain::Id;
use crate::feed::indicators::read_macro;
use crate::feed::market::MarketSimulator;
use crate::notify::{deliver, messages, Notifier};
use crate::random::RandomSource;
use crate::scoring::{forecast, recommendation};
use crate::storage::Store;
use std::sync::Arc;

const CRASH_VIX_LEVEL: f64 = 25.0;
const HIGH_VOLATILITY_VIX_LEVEL: f64 = 30.0;

pub struct AiService {
    store: Arc<Store>,
    market: MarketSimulator,
    rng: Arc<dyn RandomSource>,
    notifier: Arc<dyn Notifier>,
}

impl AiService {
    pub fn new(
        store: Arc<Store>,
        rng: Arc<dyn RandomSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            market: MarketSimulator::new(rng.clone()),
            rng,
            notifier,
        }
    }

    pub fn clear_market_cache(&self) {
        self.market.clear_cache();
    }

    /// Average article sentiment for a company, 0 without coverage.
    pub fn news_sentiment(&self, company_id: Id) -> f64 {
        average_sentiment(&self.store.news_for_company(company_id))
    }

    /// Latest percent move of `currency` against the base currency, 0 when the
    /// pair is not tracked.
    pub fn fx_impact(&self, currency: &str) -> f64 {
        self.store
            .currency_rate(currency, BASE_CURRENCY)
            .map(|r| r.change_percent)
            .unwrap_or(0.0)
    }

    /// Scores every company; stores confident results and notifies on the most
    /// confident ones. Returns what was stored.
    pub async fn generate_recommendations(&self) -> anyhow::Result<Vec<AiRecommendation>> {
        let mut stored = Vec::new();

        for company in self.store.companies() {
            let market = self.market.snapshot(&company.ticker);
            anyhow::ensure!(
                market.price.is_finite() && market.price > 0.0,
                "invalid market price for {}: {}",
                company.ticker,
                market.price
            );
            let news = self.news_sentiment(company.id);
            let fx = self.fx_impact(&company.currency);

            let result = recommendation::score(&market, news, fx, self.rng.as_ref());
            tracing::debug!(
                company_id = company.id,
                ticker = %company.ticker,
                score = result.score,
                signal = %result.signal,
                confidence = result.confidence,
                "scored company"
            );

            if !recommendation::should_persist(&result) {
                continue;
            }

            let saved = self
                .store
                .create_recommendation(NewRecommendation::from_result(company.id, &result));
            tracing::info!(
                company_id = company.id,
                recommendation_id = saved.id,
                signal = %saved.signal,
                confidence = saved.confidence,
                "stored recommendation"
            );

            if recommendation::should_notify(&result) {
                let note = messages::trading_recommendation(&company, &result);
                deliver(self.notifier.as_ref(), note).await;
            }
            stored.push(saved);
        }

        Ok(stored)
    }

    /// Projects every tracked pair and writes the labels back onto its record.
    pub fn forecast_currency_rates(&self) -> anyhow::Result<Vec<CurrencyForecast>> {
        let rates = self.store.currency_rates();
        let mut forecasts = Vec::with_capacity(rates.len());

        for rate in rates {
            anyhow::ensure!(
                rate.rate.is_finite() && rate.rate > 0.0,
                "invalid rate for {}: {}",
                rate.key(),
                rate.rate
            );
            let forecast = forecast::predict(&rate, self.rng.as_ref());

            let mut update = rate.to_update();
            update.forecast_24h = Some(forecast.forecast_label());
            update.volatility_risk = Some(forecast.risk_label());
            self.store.upsert_currency_rate(update);

            tracing::debug!(
                pair = %forecast.pair,
                trend = %forecast.trend,
                risk = %forecast.volatility_risk,
                confidence = forecast.confidence,
                "forecast currency pair"
            );
            forecasts.push(forecast);
        }

        Ok(forecasts)
    }

    /// Reads macro indicators and raises crash / volatility alerts.
    pub async fn monitor_market_conditions(&self) -> anyhow::Result<Vec<MarketAlert>> {
        let reading = read_macro(self.rng.as_ref());
        anyhow::ensure!(reading.vix.is_finite(), "VIX reading is not finite");
        tracing::debug!(
            ten_year = reading.ten_year_yield,
            two_year = reading.two_year_yield,
            vix = reading.vix,
            sentiment = %reading.sentiment,
            "macro reading"
        );

        let mut raised = Vec::new();

        if reading.is_yield_curve_inverted() && reading.vix > CRASH_VIX_LEVEL {
            let alert = self.store.create_alert(NewMarketAlert {
                kind: ALERT_CRASH_WARNING.to_string(),
                severity: Severity::High,
                title: "Market Crash Risk Elevated".to_string(),
                description: format!(
                    "Inverted yield curve and elevated VIX ({:.2}) indicate potential market correction within 6-18 months.",
                    reading.vix
                ),
                is_active: true,
            });
            tracing::warn!(alert_id = alert.id, vix = reading.vix, "crash warning raised");
            deliver(self.notifier.as_ref(), messages::crash_warning(&reading)).await;
            raised.push(alert);
        }

        if reading.vix > HIGH_VOLATILITY_VIX_LEVEL {
            let alert = self.store.create_alert(NewMarketAlert {
                kind: ALERT_SENTIMENT.to_string(),
                severity: Severity::Medium,
                title: "High Market Volatility".to_string(),
                description: format!(
                    "VIX elevated at {:.2}. Increased market uncertainty detected.",
                    reading.vix
                ),
                is_active: true,
            });
            tracing::info!(alert_id = alert.id, vix = reading.vix, "volatility alert raised");
            raised.push(alert);
        }

        Ok(raised)
    }

    /// Alert created by hand; HIGH severity alerts are also sent out.
    pub async fn raise_alert(&self, new: NewMarketAlert) -> MarketAlert {
        let alert = self.store.create_alert(new);
        if alert.severity == Severity::High {
            deliver(self.notifier.as_ref(), messages::market_alert(&alert)).await;
        }
        alert
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::news::NewNewsArticle;
    use crate::domain::recommendation::Signal;
    use crate::domain::Sentiment;
    use crate::notify::MemoryNotifier;
    use crate::random::ScriptedRandom;
    use chrono::Utc;

    fn service(draws: Vec<f64>) -> (AiService, Arc<Store>, Arc<MemoryNotifier>) {
        let store = Arc::new(Store::seeded());
        let notifier = Arc::new(MemoryNotifier::new());
        let ai = AiService::new(
            store.clone(),
            Arc::new(ScriptedRandom::new(draws)),
            notifier.clone(),
        );
        (ai, store, notifier)
    }

    fn article(company_id: Id, sentiment: Sentiment) -> NewNewsArticle {
        NewNewsArticle {
            title: "headline".to_string(),
            content: "body".to_string(),
            source: "wire".to_string(),
            company_id: Some(company_id),
            sentiment,
            published_at: Utc::now(),
        }
    }

    #[test]
    fn fx_impact_reads_change_percent_against_base() {
        let (ai, _, _) = service(vec![0.5]);
        assert_eq!(ai.fx_impact("JPY"), -1.42);
        assert_eq!(ai.fx_impact("USD"), 0.38);
        assert_eq!(ai.fx_impact("CHF"), 0.0);
    }

    #[tokio::test]
    async fn confident_buys_are_stored_and_notified() {
        // Every draw 0.9: positive sentiment, volatility 45 (penalised).
        let (ai, store, notifier) = service(vec![0.9]);
        for company in store.companies() {
            store.create_news_article(article(company.id, Sentiment::Positive));
        }

        let stored = ai.generate_recommendations().await.unwrap();
        // 30 + 25 - 10 = 45 for every company.
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|r| r.signal == Signal::Buy && r.confidence == 95));
        assert_eq!(store.recommendations().len(), 3);
        assert_eq!(notifier.sent().len(), 3);
        assert_eq!(notifier.sent()[0].subject, "BUY signal: AAPL");
    }

    #[tokio::test]
    async fn low_confidence_holds_are_not_stored() {
        // 0.5 draws: neutral sentiment, HOLD confidence 70.
        let (ai, store, notifier) = service(vec![0.5]);
        let stored = ai.generate_recommendations().await.unwrap();
        assert!(stored.is_empty());
        assert!(store.recommendations().is_empty());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn mid_confidence_holds_are_stored_silently() {
        // Five snapshot draws (neutral, volatility 25) then a HOLD draw of 0.6 → 72.
        let (ai, store, notifier) = service(vec![0.5, 0.5, 0.5, 0.5, 0.5, 0.6]);
        let stored = ai.generate_recommendations().await.unwrap();

        let confidences: Vec<_> = stored.iter().map(|r| r.confidence).collect();
        assert_eq!(confidences, vec![72, 72, 72]);
        assert!(stored.iter().all(|r| r.signal == Signal::Hold));
        assert_eq!(store.recommendations().len(), 3);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn snapshots_are_reused_across_runs() {
        let (ai, store, _) = service(vec![0.9]);
        for company in store.companies() {
            store.create_news_article(article(company.id, Sentiment::Positive));
        }
        let first = ai.generate_recommendations().await.unwrap();
        let second = ai.generate_recommendations().await.unwrap();
        assert_eq!(first.len(), second.len());
        let a: Vec<_> = first.iter().map(|r| r.target_price).collect();
        let b: Vec<_> = second.iter().map(|r| r.target_price).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn forecast_writes_labels_back() {
        // volatility 0.2 → 0.004 LOW, zero noise, confidence 70 + 12.5 → 82
        let (ai, store, _) = service(vec![0.2, 0.5, 0.5]);
        let forecasts = ai.forecast_currency_rates().unwrap();
        assert_eq!(forecasts.len(), 3);

        let usd = store.currency_rate("USD", "TWD").unwrap();
        let usd_forecast = &forecasts[0];
        assert_eq!(usd_forecast.pair, "USD/TWD");
        assert_eq!(usd.forecast_24h.as_deref(), Some(usd_forecast.forecast_label().as_str()));
        assert_eq!(usd.forecast_24h.as_deref(), Some("BULLISH (0.24)"));
        assert_eq!(usd.volatility_risk.as_deref(), Some("LOW (82%)"));
        assert_eq!(usd.rate, 31.245);

        let jpy = store.currency_rate("JPY", "TWD").unwrap();
        assert!(jpy.forecast_24h.unwrap().starts_with("STABLE"));
    }

    #[tokio::test]
    async fn inverted_curve_with_high_vix_raises_both_alerts() {
        // ten 4.5, two 4.95 (inverted), vix 15 + 0.9×20 = 33, mood draw.
        let (ai, store, notifier) = service(vec![0.0, 0.5, 0.9, 0.1]);
        let alerts = ai.monitor_market_conditions().await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, ALERT_CRASH_WARNING);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[1].kind, ALERT_SENTIMENT);
        assert_eq!(store.active_alerts().len(), 2);
        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(notifier.sent()[0].subject, "MARKET CRASH WARNING");
    }

    #[tokio::test]
    async fn calm_market_raises_nothing() {
        let (ai, store, notifier) = service(vec![0.99, 0.0, 0.1, 0.1]);
        assert!(ai.monitor_market_conditions().await.unwrap().is_empty());
        assert!(store.active_alerts().is_empty());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn manual_high_alert_notifies() {
        let (ai, _, notifier) = service(vec![0.5]);
        ai.raise_alert(NewMarketAlert {
            kind: "CUSTOM".to_string(),
            severity: Severity::Low,
            title: "low".to_string(),
            description: "d".to_string(),
            is_active: true,
        })
        .await;
        assert!(notifier.sent().is_empty());

        ai.raise_alert(NewMarketAlert {
            kind: "CUSTOM".to_string(),
            severity: Severity::High,
            title: "high".to_string(),
            description: "d".to_string(),
            is_active: true,
        })
        .await;
        assert_eq!(notifier.sent().len(), 1);
        assert_eq!(notifier.sent()[0].subject, "high");
    }
}
