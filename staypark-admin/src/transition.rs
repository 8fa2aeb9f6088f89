use serde_json::{json, Value};
use staypark_core::{CollectionLayout, DocumentStore, Fields};
use staypark_shared::BookingStatus;
use std::sync::Arc;
use tracing::info;

use crate::{require_ids, AdminError, AdminResult};

/// Decides whether a booking may move from one status to another.
///
/// `from` is `None` when the stored status is missing or outside the vocabulary.
pub trait TransitionPolicy: Send + Sync {
    fn allows(&self, from: Option<BookingStatus>, to: BookingStatus) -> bool;
}

/// Any status may replace any other.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveTransitions;

impl TransitionPolicy for PermissiveTransitions {
    fn allows(&self, _from: Option<BookingStatus>, _to: BookingStatus) -> bool {
        true
    }
}

impl<F> TransitionPolicy for F
where
    F: Fn(Option<BookingStatus>, BookingStatus) -> bool + Send + Sync,
{
    fn allows(&self, from: Option<BookingStatus>, to: BookingStatus) -> bool {
        self(from, to)
    }
}

/// Overwrites the status of one booking after validating the request.
///
/// The existence check and the write are separate store calls. A concurrent
/// update landing between them is overwritten (last writer wins).
pub struct BookingStatusTransition {
    store: Arc<dyn DocumentStore>,
    layout: CollectionLayout,
    policy: Arc<dyn TransitionPolicy>,
}

impl BookingStatusTransition {
    pub fn new(store: Arc<dyn DocumentStore>, layout: CollectionLayout) -> Self {
        Self {
            store,
            layout,
            policy: Arc::new(PermissiveTransitions),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn TransitionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Sets `status` on `{customers}/{customer_id}/{bookings}/{booking_id}`.
    ///
    /// Re-applying the current status succeeds. Callers holding cached stats or
    /// catalog pages must treat success as invalidating them.
    pub async fn update_status(&self, customer_id: &str, booking_id: &str, new_status: &str) -> AdminResult<()> {
        let status: BookingStatus = new_status
            .parse()
            .map_err(|e: staypark_shared::UnknownVariant| AdminError::InvalidArgument(e.to_string()))?;
        require_ids(&[("customerId", customer_id), ("bookingId", booking_id)])?;

        let path = self.layout.booking_path(customer_id, booking_id);
        let current = self
            .store
            .get_document(&path)
            .await
            .map_err(AdminError::StoreUnavailable)?
            .ok_or_else(|| AdminError::NotFound(format!("Booking document not found: {}", path)))?;

        let from = current
            .get("status")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<BookingStatus>().ok());
        if !self.policy.allows(from, status) {
            return Err(AdminError::InvalidTransition {
                from: from.map(|s| s.as_str()).unwrap_or("unset").to_string(),
                to: status.to_string(),
            });
        }

        let mut patch = Fields::new();
        patch.insert("status".to_string(), json!(status.as_str()));
        self.store.update_document(&path, patch).await?;

        info!(
            customer_id,
            booking_id,
            from = from.map(|s| s.as_str()).unwrap_or("unset"),
            to = %status,
            "Booking status updated"
        );
        Ok(())
    }
}
