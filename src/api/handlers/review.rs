use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{EditReviewRequest, SubmitReviewRequest};
use crate::api::dtos::responses::ok;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::review::Review;
use std::sync::Arc;
use tracing::info;

fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation("Rating must be between 1 and 5".into()));
    }
    Ok(())
}

pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_rating(payload.rating)?;

    let booking = state.booking_repo.find_by_id(&payload.booking_id).await?
        .filter(|b| b.account_id == account.id)
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    // Friendly pre-check; the unique index on booking_id is the real guard.
    if state.review_repo.find_by_booking(&booking.id).await?.is_some() {
        return Err(AppError::Conflict("A review already exists for this booking".into()));
    }

    let created = state.review_repo.create(&Review::new(
        account.id.clone(),
        booking.vendor_id.clone(),
        booking.id.clone(),
        payload.rating,
        payload.comment,
    )).await?;

    info!("Review submitted: {} for vendor {}", created.id, created.vendor_id);

    Ok((StatusCode::CREATED, ok(created)))
}

pub async fn edit_review(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Path(review_id): Path<String>,
    Json(payload): Json<EditReviewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut review = state.review_repo.find_by_id(&account.id, &review_id).await?
        .ok_or(AppError::NotFound("Review not found".into()))?;

    if let Some(rating) = payload.rating {
        validate_rating(rating)?;
        review.rating = rating;
    }
    if let Some(comment) = payload.comment {
        review.comment = comment;
    }

    let updated = state.review_repo.update(&review).await?;
    info!("Review updated: {}", updated.id);
    Ok(ok(updated))
}

pub async fn list_reviewable_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.review_repo.list_reviewable_bookings(&account.id).await?;
    Ok(ok(bookings))
}
