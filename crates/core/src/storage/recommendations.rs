use super::{lock, Store};
use crate::domain::recommendation::{AiRecommendation, NewRecommendation};
use crate::domain::Id;
use chrono::Utc;

impl Store {
    pub fn recommendations(&self) -> Vec<AiRecommendation> {
        lock(&self.recommendations).values().cloned().collect()
    }

    pub fn recommendations_for_company(&self, company_id: Id) -> Vec<AiRecommendation> {
        lock(&self.recommendations)
            .values()
            .filter(|r| r.company_id == company_id)
            .cloned()
            .collect()
    }

    pub fn create_recommendation(&self, new: NewRecommendation) -> AiRecommendation {
        let recommendation = AiRecommendation {
            id: self.ids.next_id(),
            company_id: new.company_id,
            signal: new.signal,
            confidence: new.confidence,
            target_price: new.target_price,
            reasoning: new.reasoning,
            fx_advantage: new.fx_advantage,
            optimal_timing: new.optimal_timing,
            created_at: Utc::now(),
        };
        lock(&self.recommendations).insert(recommendation.id, recommendation.clone());
        recommendation
    }
}
