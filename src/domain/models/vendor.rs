use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

pub const CATEGORIES: &[&str] = &[
    "venue", "catering", "photography", "videography",
    "music", "decoration", "transport", "other",
];

pub fn is_valid_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Vendor {
    pub id: String,
    pub account_id: String,
    pub business_name: String,
    pub category: String,
    pub description: Option<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub image_url: Option<String>,
    pub portfolio_images: Json<Vec<String>>,
    pub is_verified: bool,
    pub is_available: bool,
    pub rating: f64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewVendorParams {
    pub account_id: String,
    pub business_name: String,
    pub category: String,
    pub description: Option<String>,
    pub price_min: f64,
    pub price_max: f64,
}

impl Vendor {
    pub fn new(params: NewVendorParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: params.account_id,
            business_name: params.business_name,
            category: params.category,
            description: params.description,
            price_min: params.price_min,
            price_max: params.price_max,
            image_url: None,
            portfolio_images: Json(Vec::new()),
            is_verified: false,
            is_available: true,
            rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Vendor row joined with the owning account's public identity.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct VendorWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub vendor: Vendor,
    pub owner_name: String,
    pub owner_email: String,
}
