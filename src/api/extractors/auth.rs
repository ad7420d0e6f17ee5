use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::state::AppState;
use crate::error::AppError;
use crate::domain::models::account::Account;
use crate::domain::models::auth::{Claims, ROLE_ADMIN};
use std::sync::Arc;
use tower_cookies::Cookies;
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::Span;

/// The authenticated account behind the request. Loads the account row so
/// deactivation takes effect immediately, not at token expiry.
pub struct AuthUser(pub Account);

/// A session carrying the administrator role claim. Admin sessions are not
/// backed by an account row.
pub struct AdminUser(pub Claims);

fn extract_token(parts: &Parts) -> Result<String, AppError> {
    if let Some(cookies) = parts.extensions.get::<Cookies>()
        && let Some(cookie) = cookies.get("access_token") {
        return Ok(cookie.value().to_string());
    }

    parts.headers.get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AppError::Unauthorized)
}

fn decode_claims(parts: &Parts, state: &Arc<AppState>) -> Result<Claims, AppError> {
    let token = extract_token(parts)?;

    let decoding_key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.set_issuer(&[state.config.auth_issuer.clone()]);

    let token_data = decode::<Claims>(&token, &decoding_key, &validation)
        .map_err(|_| AppError::Unauthorized)?;

    let method = &parts.method;
    if method != "GET" && method != "HEAD" && method != "OPTIONS" {
        let csrf_header_val = parts.headers.get("X-CSRF-Token")
            .ok_or(AppError::Forbidden("Missing CSRF token".into()))?
            .to_str()
            .map_err(|_| AppError::Forbidden("Invalid CSRF token".into()))?;

        if csrf_header_val != token_data.claims.csrf_token {
            return Err(AppError::Forbidden("Invalid CSRF token".into()));
        }
    }

    Ok(token_data.claims)
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let claims = decode_claims(parts, state)?;

        let account = state.account_repo.find_by_id(&claims.sub).await?
            .ok_or(AppError::Unauthorized)?;

        if !account.is_active {
            return Err(AppError::Forbidden("Account is deactivated".into()));
        }

        Span::current().record("account_id", &account.id);

        Ok(AuthUser(account))
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let claims = decode_claims(parts, state)?;

        if claims.role != ROLE_ADMIN {
            return Err(AppError::Forbidden("Administrator access required".into()));
        }

        Span::current().record("account_id", &claims.sub);

        Ok(AdminUser(claims))
    }
}
