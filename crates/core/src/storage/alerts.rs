use super::{lock, Store};
use crate::domain::alert::{MarketAlert, NewMarketAlert};
use crate::domain::Id;
use chrono::Utc;

impl Store {
    pub fn active_alerts(&self) -> Vec<MarketAlert> {
        lock(&self.alerts)
            .values()
            .filter(|a| a.is_active)
            .cloned()
            .collect()
    }

    pub fn create_alert(&self, new: NewMarketAlert) -> MarketAlert {
        let alert = MarketAlert {
            id: self.ids.next_id(),
            kind: new.kind,
            severity: new.severity,
            title: new.title,
            description: new.description,
            is_active: new.is_active,
            created_at: Utc::now(),
        };
        lock(&self.alerts).insert(alert.id, alert.clone());
        alert
    }

    /// Returns whether the alert exists; deactivating twice is not an error.
    pub fn deactivate_alert(&self, id: Id) -> bool {
        match lock(&self.alerts).get_mut(&id) {
            Some(alert) => {
                alert.is_active = false;
                true
            }
            None => false,
        }
    }
}
