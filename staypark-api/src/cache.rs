use staypark_admin::CatalogEntry;
use staypark_shared::{BookingType, DashboardStats};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct Cached<T> {
    value: T,
    stored_at: Instant,
}

#[derive(Default)]
struct CacheState {
    generation: u64,
    stats: Option<Cached<DashboardStats>>,
    catalog: HashMap<Option<BookingType>, Cached<Vec<CatalogEntry>>>,
}

/// Short-lived copies of dashboard stats and catalog pages.
///
/// Any successful write calls [`invalidate`](ReadCache::invalidate). A read that
/// started before an invalidation is not stored, so it cannot resurrect stale data.
pub struct ReadCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl ReadCache {
    /// A zero `ttl` turns caching off.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    pub async fn stats(&self) -> Option<DashboardStats> {
        let state = self.state.read().await;
        state
            .stats
            .as_ref()
            .filter(|cached| self.is_fresh(cached.stored_at))
            .map(|cached| cached.value)
    }

    pub async fn put_stats(&self, generation: u64, stats: DashboardStats) {
        let mut state = self.state.write().await;
        if state.generation == generation {
            state.stats = Some(Cached { value: stats, stored_at: Instant::now() });
        }
    }

    pub async fn catalog(&self, filter: Option<BookingType>) -> Option<Vec<CatalogEntry>> {
        let state = self.state.read().await;
        state
            .catalog
            .get(&filter)
            .filter(|cached| self.is_fresh(cached.stored_at))
            .map(|cached| cached.value.clone())
    }

    pub async fn put_catalog(&self, generation: u64, filter: Option<BookingType>, entries: Vec<CatalogEntry>) {
        let mut state = self.state.write().await;
        if state.generation == generation {
            state.catalog.insert(filter, Cached { value: entries, stored_at: Instant::now() });
        }
    }

    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.stats = None;
        state.catalog.clear();
    }

    fn is_fresh(&self, stored_at: Instant) -> bool {
        stored_at.elapsed() < self.ttl
    }
}
