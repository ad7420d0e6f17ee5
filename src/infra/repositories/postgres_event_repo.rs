use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, account_id, title, event_type, event_date, location, guest_count, budget, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.account_id).bind(&event.title).bind(&event.event_type)
            .bind(event.event_date).bind(&event.location).bind(event.guest_count).bind(event.budget)
            .bind(&event.status).bind(event.created_at).bind(event.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, account_id: &str, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE account_id = $1 AND id = $2").bind(account_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE account_id = $1 ORDER BY event_date ASC").bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title=$1, event_type=$2, event_date=$3, location=$4, guest_count=$5, budget=$6, status=$7, updated_at=$8
             WHERE id=$9 AND account_id=$10
             RETURNING *"
        )
            .bind(&event.title).bind(&event.event_type).bind(event.event_date).bind(&event.location)
            .bind(event.guest_count).bind(event.budget).bind(&event.status).bind(Utc::now())
            .bind(&event.id).bind(&event.account_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, account_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND account_id = $2").bind(id).bind(account_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Event not found".into())); }
        Ok(())
    }
}
