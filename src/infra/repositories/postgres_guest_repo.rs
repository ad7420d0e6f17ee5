use crate::domain::{models::guest::Guest, ports::GuestRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresGuestRepo {
    pool: PgPool,
}

impl PostgresGuestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuestRepository for PostgresGuestRepo {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, event_id, name, email, phone, rsvp_status, plus_one, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
            .bind(&guest.id).bind(&guest.event_id).bind(&guest.name).bind(&guest.email)
            .bind(&guest.phone).bind(&guest.rsvp_status).bind(guest.plus_one).bind(guest.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE event_id = $1 AND id = $2").bind(event_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE event_id = $1 ORDER BY created_at ASC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, guest: &Guest) -> Result<Guest, AppError> {
        sqlx::query_as::<_, Guest>(
            "UPDATE guests SET name=$1, email=$2, phone=$3, rsvp_status=$4, plus_one=$5
             WHERE id=$6 AND event_id=$7
             RETURNING *"
        )
            .bind(&guest.name).bind(&guest.email).bind(&guest.phone).bind(&guest.rsvp_status)
            .bind(guest.plus_one).bind(&guest.id).bind(&guest.event_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1 AND event_id = $2").bind(id).bind(event_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Guest not found".into())); }
        Ok(())
    }
}
