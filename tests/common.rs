use planora_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::repositories::{
        sqlite_account_repo::SqliteAccountRepo,
        sqlite_vendor_repo::SqliteVendorRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_guest_repo::SqliteGuestRepo,
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_review_repo::SqliteReviewRepo,
        sqlite_reporting_repo::SqliteReportingRepo,
    },
    domain::services::auth_service::AuthService,
    domain::ports::{ChatService, EmailService, StorageService},
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    Router,
};
use std::str::FromStr;
use async_trait::async_trait;
use tera::Tera;
use tower::ServiceExt;
use serde_json::Value;

pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, _recipient: &str, _subject: &str, _html_body: &str) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct MockStorageService;

#[async_trait]
impl StorageService for MockStorageService {
    async fn upload(&self, filename: &str, _content_type: &str, _bytes: Vec<u8>) -> Result<String, AppError> {
        Ok(format!("https://cdn.test/{}", filename))
    }

    async fn delete(&self, _url: &str) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct MockChatService;

#[async_trait]
impl ChatService for MockChatService {
    async fn relay(&self, message: &str, _session_id: &str, _context: Option<&Value>) -> Result<Value, AppError> {
        Ok(serde_json::json!({ "reply": format!("Mock reply to: {}", message) }))
    }
}

pub struct FailingChatService;

#[async_trait]
impl ChatService for FailingChatService {
    async fn relay(&self, _message: &str, _session_id: &str, _context: Option<&Value>) -> Result<Value, AppError> {
        Err(AppError::ServiceUnavailable("Assistant is currently unavailable".into()))
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_chat_service(Arc::new(MockChatService)).await
    }

    pub async fn with_chat_service(chat_service: Arc<dyn ChatService>) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template("welcome.html", "<html>Mock welcome for {{ name }}</html>").unwrap();
        tera.add_raw_template("reset_code.html", "<html>Mock code {{ code }}</html>").unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret-not-for-production".to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_email: "admin@planora.test".to_string(),
            admin_password: "admin-password-1".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            storage_service_url: "http://localhost".to_string(),
            storage_service_token: "token".to_string(),
            chat_service_url: "http://localhost".to_string(),
        };

        let auth_service = Arc::new(AuthService::new(config.clone()));

        let state = Arc::new(AppState {
            config: config.clone(),
            account_repo: Arc::new(SqliteAccountRepo::new(pool.clone())),
            vendor_repo: Arc::new(SqliteVendorRepo::new(pool.clone())),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            review_repo: Arc::new(SqliteReviewRepo::new(pool.clone())),
            reporting_repo: Arc::new(SqliteReportingRepo::new(pool.clone())),
            auth_service,
            email_service: Arc::new(MockEmailService),
            storage_service: Arc::new(MockStorageService),
            chat_service,
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    async fn session_from_response(response: axum::response::Response) -> AuthHeaders {
        if !response.status().is_success() {
            panic!("Auth request failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start + end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["data"]["csrf_token"].as_str()
            .expect("No csrf_token in body")
            .to_string();

        AuthHeaders { access_token, csrf_token }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str, is_vendor: bool) -> AuthHeaders {
        let payload = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "is_vendor": is_vendor
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        Self::session_from_response(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        Self::session_from_response(response).await
    }

    pub async fn admin_login(&self) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": "admin@planora.test",
            "password": "admin-password-1"
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/admin-login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        Self::session_from_response(response).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
