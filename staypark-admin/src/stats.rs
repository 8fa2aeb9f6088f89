use futures_util::stream::{self, StreamExt};
use serde_json::Value;
use staypark_core::{CollectionLayout, Document, DocumentStore, Fields, StoreError};
use staypark_shared::models::values::{coerce_amount, is_truthy};
use staypark_shared::{BookingStatus, BookingType, DashboardStats};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{AdminError, AdminResult};

/// A customer whose bookings could not be listed during aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionFailure {
    pub customer_id: String,
    pub error: StoreError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsReport {
    pub stats: DashboardStats,
    /// Sorted by customer id
    pub failed_partitions: Vec<PartitionFailure>,
}

/// Computes dashboard counters by walking every customer partition.
pub struct StatsAggregator {
    store: Arc<dyn DocumentStore>,
    layout: CollectionLayout,
    max_concurrent: usize,
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn DocumentStore>, layout: CollectionLayout) -> Self {
        Self {
            store,
            layout,
            max_concurrent: 8,
        }
    }

    /// Upper bound on partitions whose bookings are listed at the same time. Clamped to at least 1.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub async fn compute_stats(&self) -> AdminResult<DashboardStats> {
        self.compute_report().await.map(|report| report.stats)
    }

    /// Like [`compute_stats`](Self::compute_stats), also naming the partitions that were undercounted.
    ///
    /// Only a failure to list the customers themselves is an error. A customer whose
    /// bookings cannot be listed still counts as a user and contributes no bookings.
    pub async fn compute_report(&self) -> AdminResult<StatsReport> {
        let customers = self
            .store
            .list_partitions(&self.layout.customers)
            .await
            .map_err(AdminError::StoreUnavailable)?;
        debug!("Aggregating stats over {} customers", customers.len());

        let mut tallies: Vec<(String, DashboardStats, Option<StoreError>)> = stream::iter(customers)
            .map(|customer| self.tally_partition(customer))
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        // Merge in a fixed order so float sums do not depend on completion order.
        tallies.sort_by(|a, b| a.0.cmp(&b.0));

        let mut report = StatsReport::default();
        for (customer_id, stats, failure) in tallies {
            report.stats += stats;
            if let Some(error) = failure {
                report.failed_partitions.push(PartitionFailure { customer_id, error });
            }
        }

        debug!(
            "Stats: {} users, {} bookings, {} partitions failed",
            report.stats.total_users,
            report.stats.total_bookings,
            report.failed_partitions.len()
        );
        Ok(report)
    }

    async fn tally_partition(&self, customer: Document) -> (String, DashboardStats, Option<StoreError>) {
        let mut stats = DashboardStats {
            total_users: 1,
            active_users: u64::from(is_truthy(customer.fields.get("isActive"))),
            ..DashboardStats::default()
        };

        let parent = self.layout.customer_path(&customer.id);
        match self.store.list_nested(&parent, &self.layout.bookings).await {
            Ok(bookings) => {
                for booking in &bookings {
                    tally_booking(&mut stats, &booking.fields);
                }
                (customer.id, stats, None)
            }
            Err(error) => {
                warn!(
                    customer_id = %customer.id,
                    error = %error,
                    "Failed to list bookings, counting customer without them"
                );
                (customer.id, stats, Some(error))
            }
        }
    }
}

fn tally_booking(stats: &mut DashboardStats, fields: &Fields) {
    let text = |key: &str| fields.get(key).and_then(Value::as_str);

    stats.total_bookings += 1;
    if text("status") == Some(BookingStatus::Active.as_str()) {
        stats.active_bookings += 1;
    }
    match text("type") {
        Some(t) if t == BookingType::Hotel.as_str() => stats.hotel_bookings += 1,
        Some(t) if t == BookingType::Parking.as_str() => stats.parking_bookings += 1,
        _ => {}
    }
    stats.total_revenue += coerce_amount(fields.get("totalPrice"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fields, two_customer_store};
    use serde_json::json;
    use staypark_core::DocumentPath;
    use staypark_store::InMemoryDocumentStore;

    fn aggregator(store: Arc<InMemoryDocumentStore>) -> StatsAggregator {
        StatsAggregator::new(store, CollectionLayout::default())
    }

    #[tokio::test]
    async fn test_two_customer_scenario() {
        let stats = aggregator(Arc::new(two_customer_store()))
            .compute_stats()
            .await
            .unwrap();

        assert_eq!(
            stats,
            DashboardStats {
                total_users: 2,
                active_users: 1,
                total_bookings: 2,
                active_bookings: 1,
                total_revenue: 160.0,
                hotel_bookings: 1,
                parking_bookings: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_failed_partition_still_counts_customer() {
        let store = Arc::new(
            two_customer_store().with_document(
                "users/u2/bookings/b1",
                fields(json!({ "type": "parking", "status": "active", "totalPrice": 15 })),
            ),
        );
        store.fail_listings_under(DocumentPath::new("users/u1")).await;

        let report = aggregator(store).compute_report().await.unwrap();

        assert_eq!(report.stats.total_users, 2);
        assert_eq!(report.stats.active_users, 1);
        // Only u2's booking survives
        assert_eq!(report.stats.total_bookings, 1);
        assert_eq!(report.stats.active_bookings, 1);
        assert_eq!(report.stats.parking_bookings, 1);
        assert_eq!(report.stats.hotel_bookings, 0);
        assert_eq!(report.stats.total_revenue, 15.0);

        assert_eq!(report.failed_partitions.len(), 1);
        assert_eq!(report.failed_partitions[0].customer_id, "u1");
    }

    #[tokio::test]
    async fn test_customer_listing_failure_is_fatal() {
        let store = Arc::new(two_customer_store());
        store.set_unavailable(true).await;

        let err = aggregator(store).compute_stats().await.unwrap_err();
        assert!(matches!(err, AdminError::StoreUnavailable(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_non_numeric_prices_contribute_zero() {
        let store = InMemoryDocumentStore::new()
            .with_document("users/u1", fields(json!({})))
            .with_document("users/u1/bookings/a", fields(json!({ "totalPrice": 10.25 })))
            .with_document("users/u1/bookings/b", fields(json!({ "totalPrice": "4.75" })))
            .with_document("users/u1/bookings/c", fields(json!({ "totalPrice": "n/a" })))
            .with_document("users/u1/bookings/d", fields(json!({ "totalPrice": null })))
            .with_document("users/u1/bookings/e", fields(json!({})));

        let stats = aggregator(Arc::new(store)).compute_stats().await.unwrap();
        assert_eq!(stats.total_bookings, 5);
        assert_eq!(stats.total_revenue, 15.0);
        assert_eq!(stats.active_users, 0);
    }

    #[tokio::test]
    async fn test_status_counts_cover_every_booking() {
        let mut store = InMemoryDocumentStore::new();
        let statuses = ["pending", "active", "completed", "cancelled", "active"];
        for c in 0..3 {
            store = store.with_document(format!("users/c{}", c), fields(json!({ "isActive": c % 2 == 0 })));
            for (i, status) in statuses.iter().enumerate() {
                store = store.with_document(
                    format!("users/c{}/bookings/b{}", c, i),
                    fields(json!({ "status": status, "type": if i % 2 == 0 { "hotel" } else { "parking" } })),
                );
            }
        }

        let stats = aggregator(Arc::new(store))
            .with_max_concurrent(2)
            .compute_stats()
            .await
            .unwrap();

        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.total_bookings, 15);
        assert_eq!(stats.active_bookings, 6);
        assert_eq!(stats.hotel_bookings + stats.parking_bookings, stats.total_bookings);
    }

    #[tokio::test]
    async fn test_concurrency_limit_does_not_change_result() {
        let store = Arc::new(two_customer_store());
        let sequential = aggregator(store.clone()).with_max_concurrent(0).compute_stats().await.unwrap();
        let parallel = aggregator(store).with_max_concurrent(16).compute_stats().await.unwrap();
        assert_eq!(sequential, parallel);
    }

    #[tokio::test]
    async fn test_orphaned_bookings_are_not_counted() {
        // Bookings under a customer document that does not exist are invisible to the walk
        let store = two_customer_store().with_document(
            "users/ghost/bookings/b1",
            fields(json!({ "type": "hotel", "totalPrice": 999 })),
        );

        let stats = aggregator(Arc::new(store)).compute_stats().await.unwrap();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_revenue, 160.0);
    }
}
