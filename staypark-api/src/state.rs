use staypark_admin::{BookingCatalog, BookingStatusTransition, CustomerDirectory, StatsAggregator};
use staypark_core::DocumentStore;
use staypark_store::app_config::Config;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::ReadCache;

#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<StatsAggregator>,
    pub catalog: Arc<BookingCatalog>,
    pub transitions: Arc<BookingStatusTransition>,
    pub customers: Arc<CustomerDirectory>,
    pub cache: Arc<ReadCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        let layout = config.store.layout();

        Self {
            stats: Arc::new(
                StatsAggregator::new(store.clone(), layout.clone())
                    .with_max_concurrent(config.aggregation.max_concurrent_partitions),
            ),
            catalog: Arc::new(BookingCatalog::new(store.clone(), layout.clone())),
            transitions: Arc::new(BookingStatusTransition::new(store.clone(), layout.clone())),
            customers: Arc::new(CustomerDirectory::new(store, layout)),
            cache: Arc::new(ReadCache::new(Duration::from_secs(config.cache.ttl_seconds))),
        }
    }
}
