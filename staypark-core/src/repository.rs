use async_trait::async_trait;
use serde_json::Value;

use crate::document::{Document, DocumentPath, Fields, LocatedDocument};
use crate::StoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Equality predicate on a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub equals: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanQuery {
    pub filter: Option<FieldFilter>,
    pub order_by: Option<OrderBy>,
}

impl ScanQuery {
    pub fn where_eq(mut self, field: impl Into<String>, equals: impl Into<Value>) -> Self {
        self.filter = Some(FieldFilter {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }
}

/// Hierarchical document store holding customer partitions and their nested collections.
///
/// Every read is a point-in-time snapshot. Implementations own timeouts and retries;
/// callers surface whatever error comes back.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents of a top-level collection
    async fn list_partitions(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// All documents of the collection `collection` nested under `parent`
    async fn list_nested(&self, parent: &DocumentPath, collection: &str) -> StoreResult<Vec<Document>>;

    /// Documents of every collection named `collection`, whatever their parent.
    ///
    /// When the query orders by a field, documents lacking that field are not returned.
    async fn scan_across_partitions(
        &self,
        collection: &str,
        query: &ScanQuery,
    ) -> StoreResult<Vec<LocatedDocument>>;

    async fn get_document(&self, path: &DocumentPath) -> StoreResult<Option<Fields>>;

    /// Merges `patch` into an existing document. Fails with `NotFound` if it does not exist.
    async fn update_document(&self, path: &DocumentPath, patch: Fields) -> StoreResult<()>;
}
