//! JSON seed files for the in-memory store.
//!
//! ```json
//! { "documents": { "users/u1": { "isActive": true }, "users/u1/bookings/b1": { "type": "hotel" } } }
//! ```

use serde::Deserialize;
use staypark_core::{DocumentPath, Fields};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::memory::InMemoryDocumentStore;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Fixture path does not address a document: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Deserialize)]
struct Fixture {
    documents: BTreeMap<String, Fields>,
}

impl InMemoryDocumentStore {
    pub fn from_fixture_str(json: &str) -> Result<Self, FixtureError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let mut store = InMemoryDocumentStore::new();

        for (raw, fields) in fixture.documents {
            let path = DocumentPath::new(raw);
            let segments = path.segments();
            if segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty()) {
                return Err(FixtureError::InvalidPath(path.to_string()));
            }
            store = store.with_document(path.as_str(), fields);
        }

        Ok(store)
    }

    pub async fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FixtureError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let store = Self::from_fixture_str(&json)?;
        info!("Seeded {} documents from {}", store.len().await, path.display());
        Ok(store)
    }
}
