use axum::{extract::{Multipart, Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{CreateVendorRequest, RemovePortfolioImageRequest, UpdateVendorRequest};
use crate::api::dtos::responses::ok;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::vendor::{self, NewVendorParams, Vendor};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn list_vendors(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let vendors = state.vendor_repo.list_with_owner().await?;
    Ok(ok(vendors))
}

pub async fn get_vendor(
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let vendor = state.vendor_repo.find_with_owner(&vendor_id).await?
        .ok_or(AppError::NotFound("Vendor not found".into()))?;
    Ok(ok(vendor))
}

pub async fn create_vendor(
    State(state): State<Arc<AppState>>,
    AuthUser(mut account): AuthUser,
    Json(payload): Json<CreateVendorRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.business_name.trim().is_empty() {
        return Err(AppError::Validation("Business name is required".into()));
    }
    if !vendor::is_valid_category(&payload.category) {
        return Err(AppError::Validation(format!("Unknown category: {}", payload.category)));
    }

    let price_min = payload.price_min.unwrap_or(0.0);
    let price_max = payload.price_max.unwrap_or(price_min);
    if price_min < 0.0 || price_min > price_max {
        return Err(AppError::Validation("price_min must be non-negative and not exceed price_max".into()));
    }

    // Friendly pre-check; the unique index on account_id is the real guard.
    if state.vendor_repo.find_by_account(&account.id).await?.is_some() {
        return Err(AppError::Conflict("A vendor profile already exists for this account".into()));
    }

    let created = state.vendor_repo.create(&Vendor::new(NewVendorParams {
        account_id: account.id.clone(),
        business_name: payload.business_name,
        category: payload.category,
        description: payload.description,
        price_min,
        price_max,
    })).await?;

    if !account.is_vendor {
        account.is_vendor = true;
        state.account_repo.update(&account).await?;
    }

    info!("Vendor profile created: {} for account {}", created.id, account.id);

    Ok((StatusCode::CREATED, ok(created)))
}

async fn own_vendor(state: &AppState, account_id: &str) -> Result<Vendor, AppError> {
    state.vendor_repo.find_by_account(account_id).await?
        .ok_or(AppError::NotFound("Vendor profile not found".into()))
}

pub async fn update_vendor(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Json(payload): Json<UpdateVendorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut vendor = own_vendor(&state, &account.id).await?;

    if let Some(name) = payload.business_name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Business name cannot be blank".into()));
        }
        vendor.business_name = name;
    }
    if let Some(category) = payload.category {
        if !vendor::is_valid_category(&category) {
            return Err(AppError::Validation(format!("Unknown category: {}", category)));
        }
        vendor.category = category;
    }
    if let Some(description) = payload.description {
        vendor.description = Some(description);
    }
    if let Some(min) = payload.price_min {
        vendor.price_min = min;
    }
    if let Some(max) = payload.price_max {
        vendor.price_max = max;
    }
    if vendor.price_min < 0.0 || vendor.price_min > vendor.price_max {
        return Err(AppError::Validation("price_min must be non-negative and not exceed price_max".into()));
    }
    if let Some(available) = payload.is_available {
        vendor.is_available = available;
    }

    let updated = state.vendor_repo.update(&vendor).await?;
    info!("Vendor profile updated: {}", updated.id);
    Ok(ok(updated))
}

async fn read_upload(field: axum::extract::multipart::Field<'_>) -> Result<(String, String, Vec<u8>), AppError> {
    let filename = field.file_name().unwrap_or("upload.bin").to_string();
    let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
    let bytes = field.bytes().await
        .map_err(|_| AppError::Validation("Failed to read uploaded file".into()))?;
    Ok((filename, content_type, bytes.to_vec()))
}

pub async fn upload_vendor_image(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut vendor = own_vendor(&state, &account.id).await?;

    let field = multipart.next_field().await
        .map_err(|_| AppError::Validation("Invalid multipart payload".into()))?
        .ok_or(AppError::Validation("No file provided".into()))?;

    let (filename, content_type, bytes) = read_upload(field).await?;
    let url = state.storage_service.upload(&filename, &content_type, bytes).await?;

    vendor.image_url = Some(url);
    let updated = state.vendor_repo.update(&vendor).await?;

    info!("Profile image updated for vendor {}", updated.id);
    Ok(ok(updated))
}

pub async fn upload_portfolio_images(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut vendor = own_vendor(&state, &account.id).await?;

    let mut uploaded = 0usize;
    while let Some(field) = multipart.next_field().await
        .map_err(|_| AppError::Validation("Invalid multipart payload".into()))?
    {
        let (filename, content_type, bytes) = read_upload(field).await?;
        let url = state.storage_service.upload(&filename, &content_type, bytes).await?;
        vendor.portfolio_images.0.push(url);
        uploaded += 1;
    }

    if uploaded == 0 {
        return Err(AppError::Validation("No files provided".into()));
    }

    let updated = state.vendor_repo.update(&vendor).await?;
    info!("Added {} portfolio images for vendor {}", uploaded, updated.id);
    Ok(ok(updated))
}

pub async fn remove_portfolio_image(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
    Json(payload): Json<RemovePortfolioImageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut vendor = own_vendor(&state, &account.id).await?;

    let before = vendor.portfolio_images.0.len();
    vendor.portfolio_images.0.retain(|u| u != &payload.url);
    if vendor.portfolio_images.0.len() == before {
        return Err(AppError::NotFound("Image not found in portfolio".into()));
    }

    let updated = state.vendor_repo.update(&vendor).await?;

    // The reference is already gone; a failed blob delete only leaks storage.
    if let Err(e) = state.storage_service.delete(&payload.url).await {
        warn!("Blob delete failed for {}: {}", payload.url, e);
    }

    info!("Removed portfolio image for vendor {}", updated.id);
    Ok(ok(updated))
}

pub async fn vendor_dashboard(
    State(state): State<Arc<AppState>>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let vendor = own_vendor(&state, &account.id).await?;
    let analytics = state.reporting_repo.vendor_analytics(&vendor.id).await?;
    Ok(ok(serde_json::json!({
        "vendor": vendor,
        "analytics": analytics,
    })))
}

pub async fn list_vendor_reviews(
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.vendor_repo.find_by_id(&vendor_id).await?.is_none() {
        return Err(AppError::NotFound("Vendor not found".into()));
    }
    let reviews = state.review_repo.list_by_vendor(&vendor_id).await?;
    Ok(ok(reviews))
}
