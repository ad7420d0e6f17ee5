use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::auth_service::AuthService;
use crate::infra::chat::http_chat_service::HttpChatService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::storage::http_storage_service::HttpStorageService;
use crate::infra::repositories::{
    postgres_account_repo::PostgresAccountRepo, postgres_vendor_repo::PostgresVendorRepo,
    postgres_event_repo::PostgresEventRepo, postgres_guest_repo::PostgresGuestRepo,
    postgres_booking_repo::PostgresBookingRepo, postgres_review_repo::PostgresReviewRepo,
    postgres_reporting_repo::PostgresReportingRepo,
    sqlite_account_repo::SqliteAccountRepo, sqlite_vendor_repo::SqliteVendorRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_guest_repo::SqliteGuestRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_review_repo::SqliteReviewRepo,
    sqlite_reporting_repo::SqliteReportingRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));
    let storage_service = Arc::new(HttpStorageService::new(
        config.storage_service_url.clone(),
        config.storage_service_token.clone(),
    ));
    let chat_service = Arc::new(HttpChatService::new(config.chat_service_url.clone()));
    let auth_service = Arc::new(AuthService::new(config.clone()));

    let mut tera = Tera::default();
    tera.add_raw_template("welcome.html", include_str!("../templates/welcome.html"))
        .expect("Failed to load welcome template");
    tera.add_raw_template("reset_code.html", include_str!("../templates/reset_code.html"))
        .expect("Failed to load reset code template");
    let templates = Arc::new(tera);

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            account_repo: Arc::new(PostgresAccountRepo::new(pool.clone())),
            vendor_repo: Arc::new(PostgresVendorRepo::new(pool.clone())),
            event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
            guest_repo: Arc::new(PostgresGuestRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            review_repo: Arc::new(PostgresReviewRepo::new(pool.clone())),
            reporting_repo: Arc::new(PostgresReportingRepo::new(pool.clone())),
            auth_service,
            email_service,
            storage_service,
            chat_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            account_repo: Arc::new(SqliteAccountRepo::new(pool.clone())),
            vendor_repo: Arc::new(SqliteVendorRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepo::new(pool.clone())),
            reporting_repo: Arc::new(SqliteReportingRepo::new(pool.clone())),
            auth_service,
            email_service,
            storage_service,
            chat_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
