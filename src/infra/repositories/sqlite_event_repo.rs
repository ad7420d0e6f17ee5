use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, account_id, title, event_type, event_date, location, guest_count, budget, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.account_id).bind(&event.title).bind(&event.event_type)
            .bind(event.event_date).bind(&event.location).bind(event.guest_count).bind(event.budget)
            .bind(&event.status).bind(event.created_at).bind(event.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, account_id: &str, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE account_id = ? AND id = ?").bind(account_id).bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE account_id = ? ORDER BY event_date ASC").bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title=?, event_type=?, event_date=?, location=?, guest_count=?, budget=?, status=?, updated_at=?
             WHERE id=? AND account_id=?
             RETURNING *"
        )
            .bind(&event.title).bind(&event.event_type).bind(event.event_date).bind(&event.location)
            .bind(event.guest_count).bind(event.budget).bind(&event.status).bind(Utc::now())
            .bind(&event.id).bind(&event.account_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, account_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ? AND account_id = ?").bind(id).bind(account_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Event not found".into())); }
        Ok(())
    }
}
