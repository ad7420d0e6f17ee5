use crate::domain::{models::vendor::{Vendor, VendorWithOwner}, ports::VendorRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresVendorRepo {
    pool: PgPool,
}

impl PostgresVendorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendorRepository for PostgresVendorRepo {
    async fn create(&self, vendor: &Vendor) -> Result<Vendor, AppError> {
        sqlx::query_as::<_, Vendor>(
            "INSERT INTO vendors (id, account_id, business_name, category, description, price_min, price_max, image_url, portfolio_images, is_verified, is_available, rating, review_count, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING *"
        )
            .bind(&vendor.id).bind(&vendor.account_id).bind(&vendor.business_name).bind(&vendor.category)
            .bind(&vendor.description).bind(vendor.price_min).bind(vendor.price_max).bind(&vendor.image_url)
            .bind(&vendor.portfolio_images).bind(vendor.is_verified).bind(vendor.is_available)
            .bind(vendor.rating).bind(vendor.review_count).bind(vendor.created_at).bind(vendor.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vendor>, AppError> {
        sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_account(&self, account_id: &str) -> Result<Option<Vendor>, AppError> {
        sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE account_id = $1").bind(account_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_with_owner(&self, id: &str) -> Result<Option<VendorWithOwner>, AppError> {
        sqlx::query_as::<_, VendorWithOwner>(
            "SELECT v.*, a.name AS owner_name, a.email AS owner_email
             FROM vendors v JOIN accounts a ON a.id = v.account_id
             WHERE v.id = $1"
        )
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_with_owner(&self) -> Result<Vec<VendorWithOwner>, AppError> {
        sqlx::query_as::<_, VendorWithOwner>(
            "SELECT v.*, a.name AS owner_name, a.email AS owner_email
             FROM vendors v JOIN accounts a ON a.id = v.account_id
             ORDER BY v.created_at DESC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, vendor: &Vendor) -> Result<Vendor, AppError> {
        sqlx::query_as::<_, Vendor>(
            "UPDATE vendors SET business_name=$1, category=$2, description=$3, price_min=$4, price_max=$5, image_url=$6, portfolio_images=$7, is_verified=$8, is_available=$9, updated_at=$10
             WHERE id=$11
             RETURNING *"
        )
            .bind(&vendor.business_name).bind(&vendor.category).bind(&vendor.description)
            .bind(vendor.price_min).bind(vendor.price_max).bind(&vendor.image_url)
            .bind(&vendor.portfolio_images).bind(vendor.is_verified).bind(vendor.is_available)
            .bind(Utc::now()).bind(&vendor.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
