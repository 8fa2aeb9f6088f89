pub mod booking;
pub mod customer;
pub mod stats;
pub mod values;
