use crate::domain::models::auth::Claims;
use crate::error::AppError;
use crate::config::Config;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};

pub struct AuthService {
    config: Config,
    encoding_key: EncodingKey,
}

pub struct IssuedSession {
    pub access_token: String,
    pub csrf_token: String,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        Self { config, encoding_key }
    }

    /// Issues an HS256 session token for the given subject. Every session
    /// carries a fresh CSRF token that mutating requests must echo back.
    pub fn issue(&self, subject: &str, role: &str, ttl: Duration) -> Result<IssuedSession, AppError> {
        let csrf_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let now = Utc::now();
        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: subject.to_string(),
            role: role.to_string(),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            csrf_token: csrf_token.clone(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok(IssuedSession { access_token, csrf_token })
    }

    /// 6-digit numeric password-reset code.
    pub fn generate_reset_code(&self) -> String {
        format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32))
    }
}
