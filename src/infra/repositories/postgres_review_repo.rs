use crate::domain::{models::review::{Review, ReviewWithAuthor, ReviewableBooking}, ports::ReviewRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresReviewRepo {
    pool: PgPool,
}

impl PostgresReviewRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Keeps vendors.rating / vendors.review_count in step with the reviews
// table. Runs inside the caller's transaction.
const RECOMPUTE_VENDOR_SQL: &str =
    "UPDATE vendors SET
        rating = COALESCE((SELECT AVG(rating) FROM reviews WHERE vendor_id = vendors.id), 0.0),
        review_count = (SELECT COUNT(*) FROM reviews WHERE vendor_id = vendors.id),
        updated_at = $1
     WHERE id = $2";

#[async_trait]
impl ReviewRepository for PostgresReviewRepo {
    async fn create(&self, review: &Review) -> Result<Review, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let created = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (id, account_id, vendor_id, booking_id, rating, comment, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
            .bind(&review.id).bind(&review.account_id).bind(&review.vendor_id).bind(&review.booking_id)
            .bind(review.rating).bind(&review.comment).bind(review.created_at).bind(review.updated_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        sqlx::query(RECOMPUTE_VENDOR_SQL)
            .bind(Utc::now()).bind(&review.vendor_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, account_id: &str, id: &str) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE account_id = $1 AND id = $2").bind(account_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_booking(&self, booking_id: &str) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE booking_id = $1").bind(booking_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<ReviewWithAuthor>, AppError> {
        sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT r.*, a.name AS author_name
             FROM reviews r JOIN accounts a ON a.id = r.account_id
             WHERE r.vendor_id = $1
             ORDER BY r.created_at DESC"
        )
            .bind(vendor_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, review: &Review) -> Result<Review, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let updated = sqlx::query_as::<_, Review>(
            "UPDATE reviews SET rating = $1, comment = $2, updated_at = $3 WHERE id = $4 AND account_id = $5 RETURNING *"
        )
            .bind(review.rating).bind(&review.comment).bind(Utc::now())
            .bind(&review.id).bind(&review.account_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        sqlx::query(RECOMPUTE_VENDOR_SQL)
            .bind(Utc::now()).bind(&review.vendor_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn list_reviewable_bookings(&self, account_id: &str) -> Result<Vec<ReviewableBooking>, AppError> {
        sqlx::query_as::<_, ReviewableBooking>(
            "SELECT b.*, v.business_name AS vendor_name, r.id AS review_id, r.rating AS review_rating
             FROM bookings b
             JOIN vendors v ON v.id = b.vendor_id
             LEFT JOIN reviews r ON r.booking_id = b.id
             WHERE b.account_id = $1
             ORDER BY b.created_at DESC"
        )
            .bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn reconcile_vendor_aggregates(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE vendors SET
                rating = COALESCE((SELECT AVG(rating) FROM reviews WHERE vendor_id = vendors.id), 0.0),
                review_count = (SELECT COUNT(*) FROM reviews WHERE vendor_id = vendors.id)
             WHERE review_count != (SELECT COUNT(*) FROM reviews WHERE vendor_id = vendors.id)"
        )
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
