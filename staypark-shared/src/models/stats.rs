use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Cross-partition dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_bookings: u64,
    pub active_bookings: u64,
    pub total_revenue: f64,
    pub hotel_bookings: u64,
    pub parking_bookings: u64,
}

impl AddAssign for DashboardStats {
    fn add_assign(&mut self, other: Self) {
        self.total_users += other.total_users;
        self.active_users += other.active_users;
        self.total_bookings += other.total_bookings;
        self.active_bookings += other.active_bookings;
        self.total_revenue += other.total_revenue;
        self.hotel_bookings += other.hotel_bookings;
        self.parking_bookings += other.parking_bookings;
    }
}
