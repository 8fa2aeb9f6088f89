use serde::Deserialize;

use crate::document::DocumentPath;

/// Names of the two collections making up the customer/booking hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionLayout {
    #[serde(default = "default_customers")]
    pub customers: String,
    #[serde(default = "default_bookings")]
    pub bookings: String,
}

fn default_customers() -> String { "users".to_string() }
fn default_bookings() -> String { "bookings".to_string() }

impl Default for CollectionLayout {
    fn default() -> Self {
        Self {
            customers: default_customers(),
            bookings: default_bookings(),
        }
    }
}

/// Global identity of a booking: the owning customer plus the id inside that partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub customer_id: String,
    pub booking_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    #[error("Expected 4 path segments, found {depth} in {path}")]
    WrongDepth { path: String, depth: usize },
    #[error("Expected collection {expected} but found {found} in {path}")]
    UnexpectedCollection {
        path: String,
        expected: String,
        found: String,
    },
    #[error("Empty identifier segment in {path}")]
    EmptySegment { path: String },
}

impl CollectionLayout {
    pub fn new(customers: impl Into<String>, bookings: impl Into<String>) -> Self {
        Self {
            customers: customers.into(),
            bookings: bookings.into(),
        }
    }

    pub fn customer_path(&self, customer_id: &str) -> DocumentPath {
        DocumentPath::from_segments(&[self.customers.as_str(), customer_id])
    }

    pub fn booking_path(&self, customer_id: &str, booking_id: &str) -> DocumentPath {
        self.customer_path(customer_id).child(&self.bookings, booking_id)
    }

    /// Recovers the owning customer from a booking's structural path.
    ///
    /// The only accepted shape is `{customers}/{customer_id}/{bookings}/{booking_id}`.
    pub fn parse_booking_path(&self, path: &DocumentPath) -> Result<BookingKey, PathParseError> {
        let segments = path.segments();
        if segments.len() != 4 {
            return Err(PathParseError::WrongDepth {
                path: path.to_string(),
                depth: segments.len(),
            });
        }

        for (found, expected) in [(segments[0], &self.customers), (segments[2], &self.bookings)] {
            if found != expected {
                return Err(PathParseError::UnexpectedCollection {
                    path: path.to_string(),
                    expected: expected.clone(),
                    found: found.to_string(),
                });
            }
        }

        if segments[1].is_empty() || segments[3].is_empty() {
            return Err(PathParseError::EmptySegment { path: path.to_string() });
        }

        Ok(BookingKey {
            customer_id: segments[1].to_string(),
            booking_id: segments[3].to_string(),
        })
    }
}
