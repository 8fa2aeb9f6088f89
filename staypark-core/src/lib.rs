pub mod document;
pub mod layout;
pub mod repository;

pub use document::{Document, DocumentPath, Fields, LocatedDocument};
pub use layout::{BookingKey, CollectionLayout, PathParseError};
pub use repository::{Direction, DocumentStore, FieldFilter, OrderBy, ScanQuery};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Invalid document path: {0}")]
    InvalidPath(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
