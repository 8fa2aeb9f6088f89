//! Booking aggregation and administration over customer partitions.
//!
//! Reads are best-effort where a partial answer is still useful (dashboard
//! counters) and all-or-nothing where it is not (the flat catalog). Writes
//! fail closed.

pub mod catalog;
pub mod customers;
pub mod stats;
pub mod transition;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{BookingCatalog, CatalogEntry};
pub use customers::CustomerDirectory;
pub use stats::{PartitionFailure, StatsAggregator, StatsReport};
pub use transition::{BookingStatusTransition, PermissiveTransitions, TransitionPolicy};

use staypark_core::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("{0}")]
    StoreUnavailable(#[source] StoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl From<StoreError> for AdminError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => AdminError::NotFound(path),
            other => AdminError::StoreUnavailable(other),
        }
    }
}

pub type AdminResult<T> = Result<T, AdminError>;

/// Identifiers become path segments, so they must be non-blank and slash-free.
pub(crate) fn require_ids(ids: &[(&str, &str)]) -> AdminResult<()> {
    let missing: Vec<&str> = ids
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(AdminError::InvalidArgument(format!(
            "{} required",
            missing.join(" and ")
        )));
    }

    if let Some((name, value)) = ids.iter().find(|(_, value)| value.contains('/')) {
        return Err(AdminError::InvalidArgument(format!(
            "{} must not contain '/': {}",
            name, value
        )));
    }

    Ok(())
}
