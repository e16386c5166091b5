use super::{lock, Store};
use crate::domain::currency::{pair_key, CurrencyRateRecord, RateUpdate};
use chrono::Utc;

impl Store {
    /// All pairs in creation order.
    pub fn currency_rates(&self) -> Vec<CurrencyRateRecord> {
        let mut rates: Vec<_> = lock(&self.currency_rates).values().cloned().collect();
        rates.sort_by_key(|r| r.id);
        rates
    }

    pub fn currency_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Option<CurrencyRateRecord> {
        lock(&self.currency_rates)
            .get(&pair_key(from_currency, to_currency))
            .cloned()
    }

    /// Inserts or replaces the pair's record, keeping the id of an existing one.
    pub fn upsert_currency_rate(&self, update: RateUpdate) -> CurrencyRateRecord {
        let key = update.key();
        let mut rates = lock(&self.currency_rates);
        let id = match rates.get(&key) {
            Some(existing) => existing.id,
            None => self.ids.next_id(),
        };
        let record = CurrencyRateRecord {
            id,
            from_currency: update.from_currency,
            to_currency: update.to_currency,
            rate: update.rate,
            change: update.change,
            change_percent: update.change_percent,
            forecast_24h: update.forecast_24h,
            volatility_risk: update.volatility_risk,
            updated_at: Utc::now(),
        };
        rates.insert(key, record.clone());
        record
    }
}
