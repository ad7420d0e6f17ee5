use crate::domain::{models::booking::{Booking, BookingWithVendor}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, account_id, vendor_id, event_id, service_date, amount, status, description, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.account_id).bind(&booking.vendor_id).bind(&booking.event_id)
            .bind(booking.service_date).bind(booking.amount).bind(&booking.status)
            .bind(&booking.description).bind(&booking.notes).bind(booking.created_at).bind(booking.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_account(&self, account_id: &str, event_id: Option<&str>) -> Result<Vec<BookingWithVendor>, AppError> {
        match event_id {
            Some(event_id) => sqlx::query_as::<_, BookingWithVendor>(
                "SELECT b.*, v.business_name AS vendor_name, v.category AS vendor_category
                 FROM bookings b JOIN vendors v ON v.id = b.vendor_id
                 WHERE b.account_id = $1 AND b.event_id = $2
                 ORDER BY b.created_at DESC"
            )
                .bind(account_id).bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, BookingWithVendor>(
                "SELECT b.*, v.business_name AS vendor_name, v.category AS vendor_category
                 FROM bookings b JOIN vendors v ON v.id = b.vendor_id
                 WHERE b.account_id = $1
                 ORDER BY b.created_at DESC"
            )
                .bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE vendor_id = $1 ORDER BY created_at DESC").bind(vendor_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *")
            .bind(status).bind(Utc::now()).bind(id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
