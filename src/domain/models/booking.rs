use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const STATUSES: &[&str] = &["PENDING", "CONFIRMED", "CANCELLED"];

pub fn is_valid_status(status: &str) -> bool {
    STATUSES.contains(&status)
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub account_id: String,
    pub vendor_id: String,
    pub event_id: String,
    pub service_date: NaiveDate,
    pub amount: f64,
    pub status: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub account_id: String,
    pub vendor_id: String,
    pub event_id: String,
    pub service_date: NaiveDate,
    pub amount: f64,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: params.account_id,
            vendor_id: params.vendor_id,
            event_id: params.event_id,
            service_date: params.service_date,
            amount: params.amount,
            status: "PENDING".to_string(),
            description: params.description,
            notes: params.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Forward-only lifecycle. CANCELLED is terminal, CONFIRMED may only be
/// cancelled, and nothing re-enters PENDING.
pub fn transition_allowed(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        ("PENDING", "CONFIRMED") | ("PENDING", "CANCELLED") | ("CONFIRMED", "CANCELLED")
    )
}

/// Booking row joined with the counterpart vendor's public fields.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct BookingWithVendor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub vendor_name: String,
    pub vendor_category: String,
}
