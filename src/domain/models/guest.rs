use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const RSVP_STATUSES: &[&str] = &["PENDING", "CONFIRMED", "DECLINED"];

pub fn is_valid_rsvp(status: &str) -> bool {
    RSVP_STATUSES.contains(&status)
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: String,
    pub plus_one: bool,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    pub fn new(event_id: String, name: String, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            email,
            phone,
            rsvp_status: "PENDING".to_string(),
            plus_one: false,
            created_at: Utc::now(),
        }
    }
}

/// Confirmed headcount for a roster. A plus-one counts as one extra seat.
pub fn confirmed_headcount(guests: &[Guest]) -> i64 {
    guests.iter()
        .filter(|g| g.rsvp_status == "CONFIRMED")
        .map(|g| if g.plus_one { 2 } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest(rsvp: &str, plus_one: bool) -> Guest {
        let mut g = Guest::new("ev".into(), "G".into(), None, None);
        g.rsvp_status = rsvp.to_string();
        g.plus_one = plus_one;
        g
    }

    #[test]
    fn test_headcount_counts_plus_ones() {
        let roster = vec![
            guest("CONFIRMED", true),
            guest("CONFIRMED", false),
            guest("PENDING", true),
            guest("DECLINED", false),
        ];
        assert_eq!(confirmed_headcount(&roster), 3);
    }
}
