use crate::domain::{models::account::{Account, AccountProfile}, ports::AccountRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresAccountRepo {
    pool: PgPool,
}

impl PostgresAccountRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepo {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, name, email, password_hash, is_vendor, is_active, reset_otp, reset_otp_expires_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *"
        )
            .bind(&account.id).bind(&account.name).bind(&account.email).bind(&account.password_hash)
            .bind(account.is_vendor).bind(account.is_active).bind(&account.reset_otp)
            .bind(account.reset_otp_expires_at).bind(account.created_at).bind(account.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<AccountProfile>, AppError> {
        sqlx::query_as::<_, AccountProfile>(
            "SELECT id, name, email, is_vendor, is_active, created_at FROM accounts ORDER BY created_at DESC"
        )
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET name=$1, email=$2, password_hash=$3, is_vendor=$4, is_active=$5, reset_otp=$6, reset_otp_expires_at=$7, updated_at=$8
             WHERE id=$9
             RETURNING *"
        )
            .bind(&account.name).bind(&account.email).bind(&account.password_hash)
            .bind(account.is_vendor).bind(account.is_active).bind(&account.reset_otp)
            .bind(account.reset_otp_expires_at).bind(Utc::now()).bind(&account.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn clear_expired_reset_tickets(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE accounts SET reset_otp = NULL, reset_otp_expires_at = NULL
             WHERE reset_otp IS NOT NULL AND reset_otp_expires_at < $1"
        )
            .bind(now).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
