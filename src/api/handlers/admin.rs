use axum::{extract::{Path, State}, response::IntoResponse};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::responses::ok;
use crate::api::extractors::auth::AdminUser;
use crate::domain::services::reporting::{growth_rate, growth_rate_f64};
use std::sync::Arc;
use tracing::info;

pub async fn platform_stats(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.reporting_repo.platform_stats().await?;

    let growth = serde_json::json!({
        "users": growth_rate(stats.previous_month.users, stats.current_month.users),
        "bookings": growth_rate(stats.previous_month.bookings, stats.current_month.bookings),
        "revenue": growth_rate_f64(stats.previous_month.revenue, stats.current_month.revenue),
    });

    Ok(ok(serde_json::json!({
        "total_users": stats.total_users,
        "total_vendors": stats.total_vendors,
        "total_events": stats.total_events,
        "total_bookings": stats.total_bookings,
        "total_revenue": stats.total_revenue,
        "current_month": stats.current_month,
        "previous_month": stats.previous_month,
        "growth": growth,
    })))
}

pub async fn platform_analytics(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let trends = state.reporting_repo.platform_trends(12).await?;
    Ok(ok(trends))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let accounts = state.account_repo.list().await?;
    Ok(ok(accounts))
}

pub async fn list_vendors(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let vendors = state.vendor_repo.list_with_owner().await?;
    Ok(ok(vendors))
}

pub async fn toggle_user_status(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut account = state.account_repo.find_by_id(&account_id).await?
        .ok_or(AppError::NotFound("Account not found".into()))?;

    account.is_active = !account.is_active;
    let updated = state.account_repo.update(&account).await?;

    info!("Account {} active flag set to {}", updated.id, updated.is_active);
    Ok(ok(updated.profile()))
}

pub async fn toggle_vendor_verification(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(vendor_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut vendor = state.vendor_repo.find_by_id(&vendor_id).await?
        .ok_or(AppError::NotFound("Vendor not found".into()))?;

    vendor.is_verified = !vendor.is_verified;
    let updated = state.vendor_repo.update(&vendor).await?;

    info!("Vendor {} verified flag set to {}", updated.id, updated.is_verified);
    Ok(ok(updated))
}
