use serde::Serialize;
use staypark_core::{CollectionLayout, Direction, DocumentPath, DocumentStore, LocatedDocument, ScanQuery};
use staypark_shared::{Booking, BookingType};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{AdminError, AdminResult};

/// One row of the flat booking catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    /// Unset when the storage path did not have the customer/booking shape
    pub customer_id: Option<String>,
    pub path: DocumentPath,
    #[serde(flatten)]
    pub booking: Booking,
}

/// Flattens every customer's bookings into one list, newest first.
pub struct BookingCatalog {
    store: Arc<dyn DocumentStore>,
    layout: CollectionLayout,
}

impl BookingCatalog {
    pub fn new(store: Arc<dyn DocumentStore>, layout: CollectionLayout) -> Self {
        Self { store, layout }
    }

    /// Runs a single cross-partition scan ordered by `createdAt` descending.
    ///
    /// A scan failure fails the whole listing. A document whose path does not
    /// resolve to an owner is kept with `customer_id` unset.
    pub async fn list_bookings(&self, filter: Option<BookingType>) -> AdminResult<Vec<CatalogEntry>> {
        let mut query = ScanQuery::default();
        if let Some(booking_type) = filter {
            query = query.where_eq("type", booking_type.as_str());
        }
        query = query.order_by("createdAt", Direction::Descending);

        let documents = self
            .store
            .scan_across_partitions(&self.layout.bookings, &query)
            .await
            .map_err(AdminError::StoreUnavailable)?;

        let entries: Vec<CatalogEntry> = documents.into_iter().map(|doc| self.to_entry(doc)).collect();
        debug!(
            "Catalog listed {} bookings (filter: {})",
            entries.len(),
            filter.map(|t| t.as_str()).unwrap_or("all")
        );
        Ok(entries)
    }

    fn to_entry(&self, doc: LocatedDocument) -> CatalogEntry {
        let customer_id = match self.layout.parse_booking_path(&doc.path) {
            Ok(key) => Some(key.customer_id),
            Err(error) => {
                warn!(path = %doc.path, error = %error, "Could not resolve customer from booking path");
                None
            }
        };

        CatalogEntry {
            id: doc.id().to_string(),
            customer_id,
            booking: Booking::from_fields(&doc.fields),
            path: doc.path,
        }
    }
}
