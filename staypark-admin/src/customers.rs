use serde_json::json;
use staypark_core::{CollectionLayout, DocumentStore, Fields};
use staypark_shared::Customer;
use std::sync::Arc;
use tracing::info;

use crate::{require_ids, AdminError, AdminResult};

/// Customer listing and account activation.
pub struct CustomerDirectory {
    store: Arc<dyn DocumentStore>,
    layout: CollectionLayout,
}

impl CustomerDirectory {
    pub fn new(store: Arc<dyn DocumentStore>, layout: CollectionLayout) -> Self {
        Self { store, layout }
    }

    pub async fn list_customers(&self) -> AdminResult<Vec<Customer>> {
        let documents = self
            .store
            .list_partitions(&self.layout.customers)
            .await
            .map_err(AdminError::StoreUnavailable)?;

        Ok(documents
            .iter()
            .map(|doc| Customer::from_fields(doc.id.clone(), &doc.fields))
            .collect())
    }

    /// Overwrites `isActive` on an existing customer.
    pub async fn set_active(&self, customer_id: &str, is_active: bool) -> AdminResult<()> {
        require_ids(&[("customerId", customer_id)])?;

        let mut patch = Fields::new();
        patch.insert("isActive".to_string(), json!(is_active));
        self.store
            .update_document(&self.layout.customer_path(customer_id), patch)
            .await?;

        info!(customer_id, is_active, "Customer activation changed");
        Ok(())
    }
}
