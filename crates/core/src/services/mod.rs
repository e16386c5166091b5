pub mod ai;
pub mod financial;
pub mod refresh;

use crate::notify::Notifier;
use crate::random::RandomSource;
use crate::storage::Store;
use std::sync::Arc;

/// Everything a request handler or batch job needs, sharing one store, one
/// random source and one notification channel.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<Store>,
    pub ai: Arc<ai::AiService>,
    pub financial: Arc<financial::FinancialService>,
    pub notifier: Arc<dyn Notifier>,
}

impl Services {
    pub fn new(
        store: Arc<Store>,
        rng: Arc<dyn RandomSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let ai = ai::AiService::new(store.clone(), rng.clone(), notifier.clone());
        let financial = financial::FinancialService::new(store.clone(), rng);
        Self {
            store,
            ai: Arc::new(ai),
            financial: Arc::new(financial),
            notifier,
        }
    }

    pub async fn refresh_all(&self) -> anyhow::Result<refresh::RefreshOutcome> {
        refresh::refresh_all(&self.ai, &self.financial).await
    }
}
