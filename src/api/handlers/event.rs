use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::api::dtos::responses::ok;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::event::{self, Event, NewEventParams};
use std::sync::Arc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    if payload.event_type.trim().is_empty() {
        return Err(AppError::Validation("Event type is required".into()));
    }

    let created = state.event_repo.create(&Event::new(NewEventParams {
        account_id: account.id.clone(),
        title: payload.title,
        event_type: payload.event_type,
        event_date: payload.event_date,
        location: payload.location,
        guest_count: payload.guest_count.unwrap_or(0),
        budget: payload.budget.unwrap_or(0.0),
    })).await?;

    info!("Event created: {} by account {}", created.id, account.id);

    Ok((StatusCode::CREATED, ok(created)))
}

pub async fn list_my_events(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_by_account(&account.id).await?;
    Ok(ok(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&account.id, &event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(ok(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&account.id, &event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be blank".into()));
        }
        event.title = title;
    }
    if let Some(event_type) = payload.event_type {
        event.event_type = event_type;
    }
    if let Some(event_date) = payload.event_date {
        event.event_date = event_date;
    }
    if let Some(location) = payload.location {
        event.location = Some(location);
    }
    if let Some(guest_count) = payload.guest_count {
        event.guest_count = guest_count;
    }
    if let Some(budget) = payload.budget {
        event.budget = budget;
    }
    if let Some(status) = payload.status {
        if !event::is_valid_status(&status) {
            return Err(AppError::Validation(format!("Unknown event status: {}", status)));
        }
        event.status = status;
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);
    Ok(ok(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.event_repo.delete(&account.id, &event_id).await?;
    info!("Event deleted: {}", event_id);
    Ok(ok(serde_json::json!({"status": "deleted"})))
}
