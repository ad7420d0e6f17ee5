use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const STATUSES: &[&str] = &["DRAFT", "PLANNING", "CONFIRMED", "COMPLETED", "CANCELLED"];

pub fn is_valid_status(status: &str) -> bool {
    STATUSES.contains(&status)
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub account_id: String,
    pub title: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub guest_count: i64,
    pub budget: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub account_id: String,
    pub title: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub guest_count: i64,
    pub budget: f64,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: params.account_id,
            title: params.title,
            event_type: params.event_type,
            event_date: params.event_date,
            location: params.location,
            guest_count: params.guest_count,
            budget: params.budget,
            status: "DRAFT".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}
