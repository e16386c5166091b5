use crate::domain::market::MarketSnapshot;
use crate::domain::Sentiment;
use crate::random::RandomSource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Generates one snapshot per ticker and serves it from cache afterwards.
pub struct MarketSimulator {
    rng: Arc<dyn RandomSource>,
    cache: Mutex<HashMap<String, MarketSnapshot>>,
}

impl MarketSimulator {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self {
            rng,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, MarketSnapshot>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self, ticker: &str) -> MarketSnapshot {
        let mut cache = self.cache();
        if let Some(cached) = cache.get(ticker) {
            return cached.clone();
        }
        let snapshot = self.generate(ticker);
        tracing::debug!(
            ticker,
            price = snapshot.price,
            sentiment = %snapshot.sentiment,
            volatility = snapshot.volatility,
            "generated market snapshot"
        );
        cache.insert(ticker.to_string(), snapshot.clone());
        snapshot
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    fn generate(&self, ticker: &str) -> MarketSnapshot {
        let price = 100.0 + self.rng.next_f64() * 200.0;
        let volume = (self.rng.next_f64() * 1_000_000.0).floor() as u64;
        let sentiment = if self.rng.next_f64() > 0.6 {
            Sentiment::Positive
        } else if self.rng.next_f64() > 0.3 {
            Sentiment::Neutral
        } else {
            Sentiment::Negative
        };
        let volatility = self.rng.next_f64() * 50.0;

        MarketSnapshot {
            ticker: ticker.to_string(),
            price,
            volume,
            sentiment,
            volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn snapshots_are_cached_until_cleared() {
        let sim = MarketSimulator::new(Arc::new(ScriptedRandom::new(vec![
            0.5, 0.25, 0.9, 0.2, // first: positive
            0.1, 0.1, 0.5, 0.5, 0.8, // second: neutral
        ])));
        let first = sim.snapshot("AAPL");
        assert_eq!(first.price, 200.0);
        assert_eq!(first.volume, 250_000);
        assert_eq!(first.sentiment, Sentiment::Positive);
        assert_eq!(first.volatility, 10.0);
        assert_eq!(sim.snapshot("AAPL"), first);

        sim.clear_cache();
        let second = sim.snapshot("AAPL");
        assert_eq!(second.sentiment, Sentiment::Neutral);
        assert_eq!(second.volatility, 40.0);
    }

    #[test]
    fn low_draws_are_negative() {
        let sim = MarketSimulator::new(Arc::new(ScriptedRandom::constant(0.1)));
        let s = sim.snapshot("TSLA");
        assert_eq!(s.sentiment, Sentiment::Negative);
        assert!(s.price > 0.0);
        assert!((0.0..=50.0).contains(&s.volatility));
    }
}
