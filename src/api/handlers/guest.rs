use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{CreateGuestRequest, UpdateGuestRequest};
use crate::api::dtos::responses::ok;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::guest::{self, confirmed_headcount, Guest};
use std::sync::Arc;
use tracing::info;

// Guests are only reachable through an event the caller owns.
async fn guard_event(state: &AppState, account_id: &str, event_id: &str) -> Result<(), AppError> {
    state.event_repo.find_by_id(account_id, event_id).await?
        .map(|_| ())
        .ok_or(AppError::NotFound("Event not found".into()))
}

pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    guard_event(&state, &account.id, &event_id).await?;

    let guests = state.guest_repo.list_by_event(&event_id).await?;
    let headcount = confirmed_headcount(&guests);

    Ok(ok(serde_json::json!({
        "guests": guests,
        "confirmed_headcount": headcount,
    })))
}

pub async fn add_guest(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    guard_event(&state, &account.id, &event_id).await?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Guest name is required".into()));
    }

    let created = state.guest_repo.create(&Guest::new(
        event_id.clone(),
        payload.name,
        payload.email,
        payload.phone,
    )).await?;

    info!("Guest added to event {}: {}", event_id, created.id);

    Ok((StatusCode::CREATED, ok(created)))
}

pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path((event_id, guest_id)): Path<(String, String)>,
    Json(payload): Json<UpdateGuestRequest>,
) -> Result<impl IntoResponse, AppError> {
    guard_event(&state, &account.id, &event_id).await?;

    let mut entry = state.guest_repo.find_by_id(&event_id, &guest_id).await?
        .ok_or(AppError::NotFound("Guest not found".into()))?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Guest name cannot be blank".into()));
        }
        entry.name = name;
    }
    if let Some(email) = payload.email {
        entry.email = Some(email);
    }
    if let Some(phone) = payload.phone {
        entry.phone = Some(phone);
    }
    if let Some(rsvp) = payload.rsvp_status {
        if !guest::is_valid_rsvp(&rsvp) {
            return Err(AppError::Validation(format!("Unknown RSVP status: {}", rsvp)));
        }
        entry.rsvp_status = rsvp;
    }
    if let Some(plus_one) = payload.plus_one {
        entry.plus_one = plus_one;
    }

    let updated = state.guest_repo.update(&entry).await?;
    info!("Guest updated: {}", updated.id);
    Ok(ok(updated))
}

pub async fn remove_guest(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path((event_id, guest_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    guard_event(&state, &account.id, &event_id).await?;

    state.guest_repo.delete(&event_id, &guest_id).await?;
    info!("Guest removed: {}", guest_id);
    Ok(ok(serde_json::json!({"status": "deleted"})))
}
