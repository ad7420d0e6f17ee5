use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_vendor: bool,
    pub is_active: bool,
    pub reset_otp: Option<String>,
    pub reset_otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(name: String, email: String, password_hash: String, is_vendor: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            is_vendor,
            is_active: true,
            reset_otp: None,
            reset_otp_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            is_vendor: self.is_vendor,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// Public view of an account. Never carries the credential hash.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct AccountProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_vendor: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
