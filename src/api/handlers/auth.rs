use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{AdminLoginRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, SendResetOtpRequest};
use crate::api::dtos::responses::{ok, ok_message};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::account::Account;
use crate::domain::models::auth::{AuthResponse, ROLE_ADMIN, ROLE_USER};
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::SameSite;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use chrono::{Duration, Utc};
use tracing::{info, warn};

const PASSWORD_MIN_LEN: usize = 8;
const RESET_OTP_VALID_MINUTES: i64 = 15;
const REGISTER_SESSION_DAYS: i64 = 7;
const LOGIN_SESSION_HOURS: i64 = 24;

// Same body for known and unknown emails so the endpoint cannot be used to
// probe which addresses are registered.
const RESET_REQUEST_MESSAGE: &str = "If that email is registered, a reset code has been sent";

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}

fn set_session_cookie(cookies: &Cookies, token: &str, max_age: time::Duration) {
    let mut cookie = Cookie::new("access_token", token.to_string());
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(max_age);
    cookies.add(cookie);
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if !is_valid_email(&payload.email) {
        return Err(AppError::Validation("A valid email address is required".into()));
    }
    if payload.password.len() < PASSWORD_MIN_LEN {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }

    if state.account_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("An account with this email already exists".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let account = Account::new(payload.name, payload.email, password_hash, payload.is_vendor);
    let created = state.account_repo.create(&account).await?;

    let session = state.auth_service.issue(&created.id, ROLE_USER, Duration::days(REGISTER_SESSION_DAYS))?;
    set_session_cookie(&cookies, &session.access_token, time::Duration::days(REGISTER_SESSION_DAYS));

    // Best effort. The account is already committed; a mail outage must not
    // fail the registration.
    let mut ctx = tera::Context::new();
    ctx.insert("name", &created.name);
    ctx.insert("is_vendor", &created.is_vendor);
    match state.templates.render("welcome.html", &ctx) {
        Ok(body) => {
            if let Err(e) = state.email_service.send(&created.email, "Welcome to Planora", &body).await {
                warn!("Welcome email for {} failed: {}", created.id, e);
            }
        }
        Err(e) => warn!("Welcome template render failed: {}", e),
    }

    info!("Account registered: {}", created.id);

    Ok((StatusCode::CREATED, ok(AuthResponse {
        csrf_token: session.csrf_token,
        user: created.profile(),
    })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.password.len() < PASSWORD_MIN_LEN {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }

    let account = state.account_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::NotFound("No account registered with this email".into()))?;

    if !account.is_active {
        return Err(AppError::Forbidden("Account is deactivated".into()));
    }

    let parsed_hash = PasswordHash::new(&account.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let session = state.auth_service.issue(&account.id, ROLE_USER, Duration::hours(LOGIN_SESSION_HOURS))?;
    set_session_cookie(&cookies, &session.access_token, time::Duration::hours(LOGIN_SESSION_HOURS));

    info!("Account logged in: {}", account.id);

    Ok(ok(AuthResponse {
        csrf_token: session.csrf_token,
        user: account.profile(),
    }))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build(("access_token", "")).path("/").into());
    info!("Session cleared");
    Ok(ok_message("Logged out"))
}

pub async fn is_authenticated(AuthUser(account): AuthUser) -> Result<impl IntoResponse, AppError> {
    Ok(ok(account.profile()))
}

pub async fn send_reset_otp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendResetOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }

    match state.account_repo.find_by_email(&payload.email).await? {
        Some(mut account) => {
            let code = state.auth_service.generate_reset_code();
            account.reset_otp = Some(code.clone());
            account.reset_otp_expires_at = Some(Utc::now() + Duration::minutes(RESET_OTP_VALID_MINUTES));
            state.account_repo.update(&account).await?;

            let mut ctx = tera::Context::new();
            ctx.insert("name", &account.name);
            ctx.insert("code", &code);
            ctx.insert("valid_minutes", &RESET_OTP_VALID_MINUTES);
            match state.templates.render("reset_code.html", &ctx) {
                Ok(body) => {
                    if let Err(e) = state.email_service.send(&account.email, "Your password reset code", &body).await {
                        warn!("Reset code email for {} failed: {}", account.id, e);
                    }
                }
                Err(e) => warn!("Reset template render failed: {}", e),
            }

            info!("Reset code issued for account {}", account.id);
        }
        None => {
            info!("Reset requested for unknown email");
        }
    }

    Ok(ok_message(RESET_REQUEST_MESSAGE))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.otp.trim().is_empty() {
        return Err(AppError::Validation("Reset code is required".into()));
    }
    if payload.new_password.len() < PASSWORD_MIN_LEN {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }

    let mut account = state.account_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Validation("Invalid or expired reset code".into()))?;

    let valid = match (&account.reset_otp, account.reset_otp_expires_at) {
        (Some(code), Some(expires)) => *code == payload.otp && expires > Utc::now(),
        _ => false,
    };
    if !valid {
        return Err(AppError::Validation("Invalid or expired reset code".into()));
    }

    account.password_hash = hash_password(&payload.new_password)?;
    account.reset_otp = None;
    account.reset_otp_expires_at = None;
    state.account_repo.update(&account).await?;

    info!("Password reset for account {}", account.id);

    Ok(ok_message("Password has been reset"))
}

pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email != state.config.admin_email || payload.password != state.config.admin_password {
        return Err(AppError::Unauthorized);
    }

    let session = state.auth_service.issue("admin", ROLE_ADMIN, Duration::hours(LOGIN_SESSION_HOURS))?;
    set_session_cookie(&cookies, &session.access_token, time::Duration::hours(LOGIN_SESSION_HOURS));

    info!("Administrator logged in");

    Ok(ok(serde_json::json!({
        "csrf_token": session.csrf_token,
        "access_token": session.access_token,
        "role": ROLE_ADMIN,
    })))
}
