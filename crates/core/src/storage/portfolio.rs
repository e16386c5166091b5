use super::{lock, Store};
use crate::domain::portfolio::{NewPosition, PortfolioPosition};
use crate::domain::Id;
use chrono::Utc;

impl Store {
    pub fn positions_for_user(&self, user_id: Id) -> Vec<PortfolioPosition> {
        lock(&self.positions)
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn position_for(&self, user_id: Id, company_id: Id) -> Option<PortfolioPosition> {
        lock(&self.positions)
            .values()
            .find(|p| p.user_id == user_id && p.company_id == company_id)
            .cloned()
    }

    pub fn create_position(&self, new: NewPosition) -> PortfolioPosition {
        let position = PortfolioPosition {
            id: self.ids.next_id(),
            user_id: new.user_id,
            company_id: new.company_id,
            shares: new.shares,
            average_cost: new.average_cost,
            purchase_currency: new.purchase_currency,
            created_at: Utc::now(),
        };
        lock(&self.positions).insert(position.id, position.clone());
        position
    }

    pub fn update_position(
        &self,
        id: Id,
        shares: f64,
        average_cost: f64,
    ) -> Option<PortfolioPosition> {
        let mut positions = lock(&self.positions);
        let position = positions.get_mut(&id)?;
        position.shares = shares;
        position.average_cost = average_cost;
        Some(position.clone())
    }

    /// Returns whether a position was removed.
    pub fn delete_position(&self, id: Id) -> bool {
        lock(&self.positions).remove(&id).is_some()
    }
}
