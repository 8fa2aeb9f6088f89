pub mod models;
pub mod pii;

pub use models::booking::{Booking, BookingStatus, BookingType, UnknownVariant};
pub use models::customer::Customer;
pub use models::stats::DashboardStats;
