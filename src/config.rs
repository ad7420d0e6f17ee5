use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub admin_email: String,
    pub admin_password: String,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub storage_service_url: String,
    pub storage_service_token: String,
    pub chat_service_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.planora.local".to_string()),
            admin_email: env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set"),
            admin_password: env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            storage_service_url: env::var("STORAGE_SERVICE_URL").unwrap_or_else(|_| "http://localhost:9000/api/v1/objects".to_string()),
            storage_service_token: env::var("STORAGE_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            chat_service_url: env::var("CHAT_SERVICE_URL").unwrap_or_else(|_| "http://localhost:7000/api/v1/chat".to_string()),
        }
    }
}
