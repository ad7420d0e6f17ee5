use axum::{extract::State, response::IntoResponse};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::responses::ok;
use crate::api::extractors::auth::AuthUser;
use std::sync::Arc;

pub async fn user_analytics(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let analytics = state.reporting_repo.user_analytics(&account.id).await?;
    Ok(ok(analytics))
}

pub async fn vendor_analytics(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let vendor = state.vendor_repo.find_by_account(&account.id).await?
        .ok_or(AppError::NotFound("Vendor profile not found".into()))?;

    let analytics = state.reporting_repo.vendor_analytics(&vendor.id).await?;
    Ok(ok(analytics))
}
