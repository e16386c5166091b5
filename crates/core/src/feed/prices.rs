use crate::domain::currency::FxTable;
use crate::domain::market::StockPrice;
use crate::random::RandomSource;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum relative move applied to a base price on each read (±1%).
const JITTER_SPAN: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct BasePrice {
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub currency: String,
}

/// Cached base prices with a uniform ±1% perturbation applied on every quote.
pub struct PriceFeed {
    rng: Arc<dyn RandomSource>,
    base: HashMap<String, BasePrice>,
}

impl PriceFeed {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self {
            rng,
            base: HashMap::new(),
        }
    }

    /// Feed preloaded with the dashboard's demo tickers.
    pub fn seeded(rng: Arc<dyn RandomSource>) -> Self {
        let mut feed = Self::new(rng);
        feed.insert("AAPL", 175.32, 2.45, 1.42, "USD");
        feed.insert("TSLA", 248.50, -8.22, -3.20, "USD");
        feed.insert("FMG", 24.67, 0.85, 3.57, "AUD");
        feed
    }

    pub fn insert(
        &mut self,
        ticker: &str,
        price: f64,
        change: f64,
        change_percent: f64,
        currency: &str,
    ) {
        self.base.insert(
            ticker.to_string(),
            BasePrice {
                price,
                change,
                change_percent,
                currency: currency.to_string(),
            },
        );
    }

    /// Live quote for `ticker`, or `None` when the ticker is not tracked.
    pub fn quote(&self, ticker: &str, fx: &FxTable) -> Option<StockPrice> {
        let base = self.base.get(ticker)?;

        let variation = (self.rng.next_f64() - 0.5) * JITTER_SPAN;
        let price = base.price * (1.0 + variation);
        let change = price - base.price;

        Some(StockPrice {
            ticker: ticker.to_string(),
            price,
            change,
            change_percent: change / base.price * 100.0,
            currency: base.currency.clone(),
            price_in_base: price * fx.rate_of(&base.currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn unknown_ticker_has_no_quote() {
        let feed = PriceFeed::seeded(Arc::new(ScriptedRandom::constant(0.5)));
        assert!(feed.quote("MSFT", &FxTable::seeded()).is_none());
    }

    #[test]
    fn neutral_draw_returns_base_price() {
        let feed = PriceFeed::seeded(Arc::new(ScriptedRandom::constant(0.5)));
        let q = feed.quote("AAPL", &FxTable::seeded()).unwrap();
        assert_eq!(q.price, 175.32);
        assert_eq!(q.change, 0.0);
        assert_eq!(q.currency, "USD");
        assert!((q.price_in_base - 175.32 * 31.245).abs() < 1e-9);
    }

    #[test]
    fn jitter_is_bounded_to_one_percent() {
        let feed = PriceFeed::seeded(Arc::new(ScriptedRandom::new(vec![0.0, 0.999_999])));
        let fx = FxTable::seeded();
        let low = feed.quote("FMG", &fx).unwrap();
        let high = feed.quote("FMG", &fx).unwrap();
        assert!((low.change_percent - -1.0).abs() < 1e-9);
        assert!(high.change_percent < 1.0 && high.change_percent > 0.99);
        assert!((low.price_in_base - low.price * 20.467).abs() < 1e-9);
    }
}
