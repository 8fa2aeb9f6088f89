use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use staypark_core::{
    Direction, Document, DocumentPath, DocumentStore, Fields, LocatedDocument, ScanQuery,
    StoreError, StoreResult,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Faults {
    unavailable: bool,
    failing_listings: HashSet<DocumentPath>,
}

/// Document store kept in process memory.
///
/// Documents are keyed by their full path, so a nested document can exist
/// without its parent, the same as in hosted hierarchical stores. Faults can
/// be injected to exercise degraded paths: the whole store going away, or the
/// nested listings under one parent failing.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<DocumentPath, Fields>>,
    faults: RwLock<Faults>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding for tests and fixtures.
    pub fn with_document(mut self, path: impl Into<String>, fields: Fields) -> Self {
        self.documents.get_mut().insert(DocumentPath::new(path), fields);
        self
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn set_unavailable(&self, unavailable: bool) {
        self.faults.write().await.unavailable = unavailable;
    }

    /// Makes every nested listing under `parent` fail until faults are cleared.
    pub async fn fail_listings_under(&self, parent: DocumentPath) {
        self.faults.write().await.failing_listings.insert(parent);
    }

    pub async fn clear_faults(&self) {
        *self.faults.write().await = Faults::default();
    }

    /// Number of trait calls received, successful or not.
    pub fn call_count(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of writes actually applied.
    pub fn write_count(&self) -> usize {
        self.writes.load(AtomicOrdering::SeqCst)
    }

    async fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.faults.read().await.unavailable {
            return Err(StoreError::Unavailable("in-memory store marked unavailable".to_string()));
        }
        Ok(())
    }
}

/// Two RFC 3339 timestamps compare as instants, other strings byte-wise.
fn compare_strings(a: &str, b: &str) -> Ordering {
    match (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Cross-type ordering: null < bool < number < string < array < object.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => compare_strings(x, y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_partitions(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.enter().await?;
        let documents = self.documents.read().await;

        Ok(documents
            .iter()
            .filter(|(path, _)| path.depth() == 2 && path.collection() == Some(collection))
            .map(|(path, fields)| Document {
                id: path.id().to_string(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn list_nested(&self, parent: &DocumentPath, collection: &str) -> StoreResult<Vec<Document>> {
        self.enter().await?;
        if self.faults.read().await.failing_listings.contains(parent) {
            return Err(StoreError::Unavailable(format!(
                "listing {}/{} failed",
                parent, collection
            )));
        }

        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|(path, _)| {
                path.collection() == Some(collection) && path.parent().as_ref() == Some(parent)
            })
            .map(|(path, fields)| Document {
                id: path.id().to_string(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn scan_across_partitions(
        &self,
        collection: &str,
        query: &ScanQuery,
    ) -> StoreResult<Vec<LocatedDocument>> {
        self.enter().await?;
        let documents = self.documents.read().await;

        let mut matches: Vec<LocatedDocument> = documents
            .iter()
            .filter(|(path, _)| path.depth() % 2 == 0 && path.collection() == Some(collection))
            .filter(|(_, fields)| match &query.filter {
                Some(filter) => fields.get(&filter.field) == Some(&filter.equals),
                None => true,
            })
            .filter(|(_, fields)| match &query.order_by {
                Some(order) => fields.contains_key(&order.field),
                None => true,
            })
            .map(|(path, fields)| LocatedDocument {
                path: path.clone(),
                fields: fields.clone(),
            })
            .collect();

        if let Some(order) = &query.order_by {
            // Stable sort: ties stay in path order.
            matches.sort_by(|a, b| {
                let ordering = compare_values(&a.fields[&order.field], &b.fields[&order.field]);
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        debug!("Scan over {} returned {} documents", collection, matches.len());
        Ok(matches)
    }

    async fn get_document(&self, path: &DocumentPath) -> StoreResult<Option<Fields>> {
        self.enter().await?;
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn update_document(&self, path: &DocumentPath, patch: Fields) -> StoreResult<()> {
        self.enter().await?;
        let mut documents = self.documents.write().await;
        let fields = documents
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;

        fields.extend(patch);
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);
        debug!("Updated document {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn seeded() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
            .with_document("users/u1", fields(json!({"isActive": true})))
            .with_document("users/u2", fields(json!({})))
            .with_document("users/u1/bookings/b1", fields(json!({"type": "hotel", "createdAt": "2026-01-02T00:00:00Z"})))
            .with_document("users/u1/bookings/b2", fields(json!({"type": "parking", "createdAt": "2026-01-05T00:00:00Z"})))
            .with_document("users/u2/bookings/b1", fields(json!({"type": "hotel", "createdAt": "2026-01-03T00:00:00Z"})))
            .with_document("users/u3/bookings/b9", fields(json!({"type": "hotel"})))
            .with_document("users/u1/payments/p1", fields(json!({"createdAt": "2026-01-09T00:00:00Z"})))
    }

    #[tokio::test]
    async fn test_list_partitions_skips_nested_documents() {
        let store = seeded();
        let users = store.list_partitions("users").await.unwrap();
        let ids: Vec<_> = users.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[tokio::test]
    async fn test_list_nested_only_returns_named_collection() {
        let store = seeded();
        let bookings = store
            .list_nested(&DocumentPath::new("users/u1"), "bookings")
            .await
            .unwrap();
        let ids: Vec<_> = bookings.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2"]);
    }

    #[tokio::test]
    async fn test_scan_orders_and_filters() {
        let store = seeded();
        let query = ScanQuery::default()
            .where_eq("type", "hotel")
            .order_by("createdAt", Direction::Descending);

        let hits = store.scan_across_partitions("bookings", &query).await.unwrap();
        let paths: Vec<_> = hits.iter().map(|d| d.path.as_str()).collect();
        // u3/b9 carries no createdAt and drops out of the ordered scan
        assert_eq!(paths, vec!["users/u2/bookings/b1", "users/u1/bookings/b1"]);
    }

    #[tokio::test]
    async fn test_unordered_scan_includes_every_partition() {
        let store = seeded();
        let hits = store
            .scan_across_partitions("bookings", &ScanQuery::default())
            .await
            .unwrap();
        assert_eq!(hits.len(), 4);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = seeded();
        let path = DocumentPath::new("users/u1/bookings/b1");
        store
            .update_document(&path, fields(json!({"status": "cancelled"})))
            .await
            .unwrap();

        let doc = store.get_document(&path).await.unwrap().unwrap();
        assert_eq!(doc["status"], "cancelled");
        assert_eq!(doc["type"], "hotel");
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = seeded();
        let err = store
            .update_document(&DocumentPath::new("users/u9/bookings/b1"), Fields::new())
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("users/u9/bookings/b1".to_string()));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_injected_faults() {
        let store = seeded();
        store.fail_listings_under(DocumentPath::new("users/u1")).await;
        assert!(store.list_nested(&DocumentPath::new("users/u1"), "bookings").await.is_err());
        assert!(store.list_nested(&DocumentPath::new("users/u2"), "bookings").await.is_ok());

        store.set_unavailable(true).await;
        assert!(matches!(
            store.list_partitions("users").await,
            Err(StoreError::Unavailable(_))
        ));

        store.clear_faults().await;
        assert!(store.list_partitions("users").await.is_ok());
    }

    #[tokio::test]
    async fn test_scan_orders_timestamps_as_instants() {
        let store = InMemoryDocumentStore::new()
            .with_document("users/u1/bookings/a", fields(json!({"createdAt": "2026-10-05T12:00:00.500Z"})))
            .with_document("users/u1/bookings/b", fields(json!({"createdAt": "2026-10-05T12:00:00Z"})))
            .with_document("users/u2/bookings/c", fields(json!({"createdAt": "2026-10-05T13:00:00+02:00"})));
        let query = ScanQuery::default().order_by("createdAt", Direction::Descending);

        let hits = store.scan_across_partitions("bookings", &query).await.unwrap();
        let ids: Vec<_> = hits.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_compare_values_across_types() {
        assert_eq!(compare_values(&json!(null), &json!(1)), Ordering::Less);
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!(5), &json!("5")), Ordering::Less);
        assert_eq!(
            compare_values(&json!("2026-01-01T10:00:00+02:00"), &json!("2026-01-01T09:00:00Z")),
            Ordering::Less
        );
        assert_eq!(compare_values(&json!("not-a-date"), &json!("2026-01-01T09:00:00Z")), Ordering::Greater);
    }
}
