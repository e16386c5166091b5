use crate::domain::currency::{CurrencyRateRecord, FxTable, BASE_CURRENCY};
use crate::domain::market::{StockPrice, TradeAction, TradingAnalysis};
use crate::domain::portfolio::{DividendProjection, PortfolioSummary};
use crate::domain::Id;
use crate::feed::prices::PriceFeed;
use crate::random::RandomSource;
use crate::scoring::{dividends, timing, valuation};
use crate::storage::Store;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Largest relative move applied to a stored rate per update (±0.05%).
const RATE_VARIATION_SPAN: f64 = 0.001;

pub struct FinancialService {
    store: Arc<Store>,
    prices: PriceFeed,
    fx: Mutex<FxTable>,
    rng: Arc<dyn RandomSource>,
}

impl FinancialService {
    pub fn new(store: Arc<Store>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            prices: PriceFeed::seeded(rng.clone()),
            fx: Mutex::new(FxTable::seeded()),
            rng,
        }
    }

    fn fx(&self) -> MutexGuard<'_, FxTable> {
        self.fx.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the conversion table currently used for valuations.
    pub fn fx_snapshot(&self) -> FxTable {
        self.fx().clone()
    }

    pub fn stock_price(&self, ticker: &str) -> Option<StockPrice> {
        let fx = self.fx_snapshot();
        self.prices.quote(ticker, &fx)
    }

    /// Values every position of `user_id` against one consistent set of quotes.
    pub fn portfolio_summary(&self, user_id: Id) -> PortfolioSummary {
        let positions = self.store.positions_for_user(user_id);
        let companies = self.store.companies();
        let fx = self.fx_snapshot();

        let mut quotes: HashMap<String, StockPrice> = HashMap::new();
        for position in &positions {
            let Some(company) = companies.iter().find(|c| c.id == position.company_id) else {
                continue;
            };
            if quotes.contains_key(&company.ticker) {
                continue;
            }
            if let Some(quote) = self.prices.quote(&company.ticker, &fx) {
                quotes.insert(company.ticker.clone(), quote);
            }
        }

        let summary = valuation::summarize(&positions, &companies, &quotes, &fx);
        tracing::debug!(
            user_id,
            positions = summary.positions.len(),
            total_value = summary.total_value,
            "valued portfolio"
        );
        summary
    }

    /// Nudges every stored rate by a small random amount and mirrors
    /// base-currency rates into the conversion table.
    pub fn update_currency_rates(&self) -> anyhow::Result<Vec<CurrencyRateRecord>> {
        let rates = self.store.currency_rates();
        let mut updated = Vec::with_capacity(rates.len());

        for rate in rates {
            anyhow::ensure!(
                rate.rate.is_finite() && rate.rate > 0.0,
                "invalid rate for {}: {}",
                rate.key(),
                rate.rate
            );
            let variation = (self.rng.next_f64() - 0.5) * RATE_VARIATION_SPAN;
            let new_rate = rate.rate * (1.0 + variation);
            let change = new_rate - rate.rate;

            let mut update = rate.to_update();
            update.rate = new_rate;
            update.change = change;
            update.change_percent = change / rate.rate * 100.0;
            let saved = self.store.upsert_currency_rate(update);

            if saved.to_currency == BASE_CURRENCY {
                self.fx().set(&saved.from_currency, saved.rate);
            }
            tracing::debug!(
                pair = %saved.key(),
                rate = saved.rate,
                change = saved.change,
                "updated rate"
            );
            updated.push(saved);
        }

        tracing::info!(count = updated.len(), "currency rates updated");
        Ok(updated)
    }

    pub fn trading_analysis(&self, ticker: &str, action: TradeAction) -> TradingAnalysis {
        let company = self.store.company_by_ticker(ticker);
        let rate = company
            .as_ref()
            .and_then(|c| self.store.currency_rate(&c.currency, BASE_CURRENCY));
        timing::analyze_trading_time(company.as_ref(), rate.as_ref(), action)
    }

    pub fn dividend_projections(&self, user_id: Id, now: DateTime<Utc>) -> DividendProjection {
        dividends::project_dividends(&self.portfolio_summary(user_id), now)
    }
}
