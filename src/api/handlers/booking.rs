use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{BookingListQuery, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::api::dtos::responses::ok;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::{self, Booking, NewBookingParams};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let vendor = state.vendor_repo.find_by_id(&payload.vendor_id).await?
        .ok_or(AppError::NotFound("Vendor not found".into()))?;

    // The event must belong to the caller; booking against someone else's
    // event reads as not-found, same as the event endpoints.
    state.event_repo.find_by_id(&account.id, &payload.event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let amount = payload.amount.unwrap_or(0.0);
    if amount < 0.0 {
        return Err(AppError::Validation("Amount cannot be negative".into()));
    }

    let created = state.booking_repo.create(&Booking::new(NewBookingParams {
        account_id: account.id.clone(),
        vendor_id: vendor.id.clone(),
        event_id: payload.event_id,
        service_date: payload.service_date,
        amount,
        description: payload.description,
        notes: payload.notes,
    })).await?;

    info!("Booking created: {} for vendor {}", created.id, vendor.id);

    Ok((StatusCode::CREATED, ok(created)))
}

pub async fn list_my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Query(query): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_account(&account.id, query.event_id.as_deref()).await?;
    Ok(ok(bookings))
}

pub async fn list_vendor_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let vendor = state.vendor_repo.find_by_account(&account.id).await?
        .ok_or(AppError::NotFound("Vendor profile not found".into()))?;

    let bookings = state.booking_repo.list_by_vendor(&vendor.id).await?;
    Ok(ok(bookings))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !booking::is_valid_status(&payload.status) {
        return Err(AppError::Validation(format!("Unknown booking status: {}", payload.status)));
    }

    let current = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    // Either side of the booking may move it: the customer who placed it or
    // the owner of the vendor it addresses.
    let is_owner = current.account_id == account.id;
    let is_counterpart_vendor = match state.vendor_repo.find_by_account(&account.id).await? {
        Some(vendor) => vendor.id == current.vendor_id,
        None => false,
    };
    if !is_owner && !is_counterpart_vendor {
        return Err(AppError::NotFound("Booking not found".into()));
    }

    if !booking::transition_allowed(&current.status, &payload.status) {
        warn!("Rejected booking transition {} -> {} for {}", current.status, payload.status, booking_id);
        return Err(AppError::Conflict(format!(
            "Cannot change booking status from {} to {}", current.status, payload.status
        )));
    }

    let updated = state.booking_repo.update_status(&booking_id, &payload.status).await?;
    info!("Booking {} moved to {}", updated.id, updated.status);
    Ok(ok(updated))
}
