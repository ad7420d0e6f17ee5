use serde::Serialize;
use sqlx::FromRow;
use super::booking::Booking;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct TypeCount {
    pub event_type: String,
    pub count: i64,
}

/// One month of activity, keyed as "YYYY-MM".
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct MonthCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct MonthRevenue {
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct PeriodCounts {
    pub users: i64,
    pub bookings: i64,
    pub revenue: f64,
}

/// Raw inputs for the admin stats endpoint. Growth percentages are derived
/// from the two periods by the reporting helpers, not stored.
#[derive(Debug, Serialize, Clone)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_vendors: i64,
    pub total_events: i64,
    pub total_bookings: i64,
    pub total_revenue: f64,
    pub current_month: PeriodCounts,
    pub previous_month: PeriodCounts,
}

#[derive(Debug, Serialize, Clone)]
pub struct PlatformTrends {
    pub monthly_signups: Vec<MonthCount>,
    pub monthly_bookings: Vec<MonthCount>,
    pub monthly_revenue: Vec<MonthRevenue>,
}

#[derive(Debug, Serialize, Clone)]
pub struct UserAnalytics {
    pub events_by_status: Vec<StatusCount>,
    pub bookings_by_status: Vec<StatusCount>,
    pub revenue_spent: f64,
    pub monthly_events: Vec<MonthCount>,
    pub average_budget: f64,
    pub top_event_types: Vec<TypeCount>,
    pub upcoming_events: i64,
}

#[derive(Debug, Serialize, Clone)]
pub struct VendorAnalytics {
    pub bookings_by_status: Vec<StatusCount>,
    pub revenue_earned: f64,
    pub monthly_bookings: Vec<MonthCount>,
    pub recent_bookings: Vec<Booking>,
    pub rating: f64,
    pub review_count: i64,
}
