use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field map of a single document
pub type Fields = Map<String, Value>;

/// Slash-separated structural address, e.g. `users/u1/bookings/b7`.
///
/// Even-length paths address documents, odd-length paths address collections.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Wraps a raw path as reported by the store. No shape is enforced.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        Self(joined)
    }

    /// Path of the document `id` inside collection `collection` under this document.
    pub fn child(&self, collection: &str, id: &str) -> Self {
        Self(format!("{}/{}/{}", self.0, collection, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> Vec<&str> {
        self.0.split('/').collect()
    }

    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    /// Last segment: the document id.
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Name of the collection directly holding the document.
    pub fn collection(&self) -> Option<&str> {
        self.0.rsplit('/').nth(1)
    }

    /// Path of the document owning the collection this document lives in.
    pub fn parent(&self) -> Option<DocumentPath> {
        let segments = self.segments();
        if segments.len() < 4 {
            return None;
        }
        Some(Self::from_segments(&segments[..segments.len() - 2]))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document returned by a collection listing
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// A document returned by a cross-partition scan, tagged with where it lives
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedDocument {
    pub path: DocumentPath,
    pub fields: Fields,
}

impl LocatedDocument {
    pub fn id(&self) -> &str {
        self.path.id()
    }
}
