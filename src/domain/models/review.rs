use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Review {
    pub id: String,
    pub account_id: String,
    pub vendor_id: String,
    pub booking_id: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(account_id: String, vendor_id: String, booking_id: String, rating: i32, comment: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            account_id,
            vendor_id,
            booking_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Review row joined with the reviewer's display name.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct ReviewWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub author_name: String,
}

/// A booking annotated with its review, if one was written. Backs the
/// "reviewable bookings" listing.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct ReviewableBooking {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: super::booking::Booking,
    pub vendor_name: String,
    pub review_id: Option<String>,
    pub review_rating: Option<i32>,
}
