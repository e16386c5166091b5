//! In-memory store: one mutex-guarded table per entity and a single sequential
//! id allocator shared by all tables.
//!
//! Every operation takes its table lock, copies owned values out and releases
//! it before returning, so callers never hold a guard across an `.await`.
//! Concurrent writers to the same key resolve as last-writer-wins.

mod alerts;
mod catalog;
mod news;
mod portfolio;
mod rates;
mod recommendations;
mod seed;

pub use news::DEFAULT_NEWS_LIMIT;

use crate::domain::alert::MarketAlert;
use crate::domain::company::{CeoProfile, Company};
use crate::domain::currency::CurrencyRateRecord;
use crate::domain::news::NewsArticle;
use crate::domain::portfolio::PortfolioPosition;
use crate::domain::recommendation::AiRecommendation;
use crate::domain::Id;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

type Table<T> = Mutex<BTreeMap<Id, T>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> Id {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    ids: IdAllocator,
    companies: Table<Company>,
    positions: Table<PortfolioPosition>,
    ceo_profiles: Table<CeoProfile>,
    recommendations: Table<AiRecommendation>,
    currency_rates: Mutex<HashMap<String, CurrencyRateRecord>>,
    alerts: Table<MarketAlert>,
    news: Table<NewsArticle>,
}

impl Store {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo companies, executives and currency pairs.
    pub fn seeded() -> Self {
        let store = Self::new();
        seed::populate(&store);
        store
    }
}
