use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, analytics, auth, booking, chat, event, guest, health, review, vendor};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/admin-login", post(auth::admin_login))
        .route("/api/v1/auth/is-auth", get(auth::is_authenticated))
        .route("/api/v1/auth/send-reset-otp", post(auth::send_reset_otp))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))

        // Vendor directory
        .route("/api/v1/vendors", get(vendor::list_vendors).post(vendor::create_vendor))
        .route("/api/v1/vendors/me", put(vendor::update_vendor))
        .route("/api/v1/vendors/me/image", post(vendor::upload_vendor_image))
        .route("/api/v1/vendors/me/portfolio", post(vendor::upload_portfolio_images).delete(vendor::remove_portfolio_image))
        .route("/api/v1/vendors/me/dashboard", get(vendor::vendor_dashboard))
        .route("/api/v1/vendors/{vendor_id}", get(vendor::get_vendor))
        .route("/api/v1/vendors/{vendor_id}/reviews", get(vendor::list_vendor_reviews))

        // Events & guest roster
        .route("/api/v1/events", post(event::create_event).get(event::list_my_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/v1/events/{event_id}/guests", get(guest::list_guests).post(guest::add_guest))
        .route("/api/v1/events/{event_id}/guests/{guest_id}", put(guest::update_guest).delete(guest::remove_guest))

        // Booking ledger
        .route("/api/v1/bookings", post(booking::create_booking).get(booking::list_my_bookings))
        .route("/api/v1/bookings/vendor", get(booking::list_vendor_bookings))
        .route("/api/v1/bookings/{booking_id}/status", put(booking::update_booking_status))

        // Reviews
        .route("/api/v1/reviews", post(review::submit_review))
        .route("/api/v1/reviews/my-bookings", get(review::list_reviewable_bookings))
        .route("/api/v1/reviews/{review_id}", put(review::edit_review))

        // Admin panel
        .route("/api/v1/admin/stats", get(admin::platform_stats))
        .route("/api/v1/admin/analytics", get(admin::platform_analytics))
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/vendors", get(admin::list_vendors))
        .route("/api/v1/admin/users/{account_id}/toggle-status", put(admin::toggle_user_status))
        .route("/api/v1/admin/vendors/{vendor_id}/toggle-verification", put(admin::toggle_vendor_verification))

        // Dashboards
        .route("/api/v1/analytics/user", get(analytics::user_analytics))
        .route("/api/v1/analytics/vendor", get(analytics::vendor_analytics))

        // Assistant relay
        .route("/api/v1/chat", post(chat::post_message))
        .route("/api/v1/chat/suggestions", get(chat::quick_suggestions))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        account_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
