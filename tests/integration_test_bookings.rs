mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a customer and a vendor, creates the vendor profile and one
/// customer event. Returns (customer, vendor owner, vendor id, event id).
async fn marketplace_setup(app: &TestApp) -> (AuthHeaders, AuthHeaders, String, String) {
    let alice = app.register("Alice", "alice@example.com", "password123", false).await;
    let carla = app.register("Carla", "carla@example.com", "password123", true).await;

    let vendor = parse_body(app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/vendors")
            .header(header::COOKIE, format!("access_token={}", carla.access_token))
            .header("X-CSRF-Token", &carla.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "business_name": "Carla Catering", "category": "catering",
                "price_min": 100.0, "price_max": 5000.0
            }).to_string())).unwrap()
    ).await.unwrap()).await;
    let vendor_id = vendor["data"]["id"].as_str().unwrap().to_string();

    let event = parse_body(app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", alice.access_token))
            .header("X-CSRF-Token", &alice.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "title": "Wedding", "event_type": "Wedding", "event_date": "2025-06-01"
            }).to_string())).unwrap()
    ).await.unwrap()).await;
    let event_id = event["data"]["id"].as_str().unwrap().to_string();

    (alice, carla, vendor_id, event_id)
}

async fn create_booking(app: &TestApp, auth: &AuthHeaders, vendor_id: &str, event_id: &str, amount: f64) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/bookings")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "vendor_id": vendor_id, "event_id": event_id,
                "service_date": "2025-06-01", "amount": amount,
                "description": "Full catering"
            }).to_string())).unwrap()
    ).await.unwrap()
}

async fn update_status(app: &TestApp, auth: &AuthHeaders, booking_id: &str, status: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/bookings/{}/status", booking_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"status": status}).to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_booking_unknown_vendor_not_found_and_not_persisted() {
    let app = TestApp::new().await;
    let (alice, _, _, event_id) = marketplace_setup(&app).await;

    let res = create_booking(&app, &alice, "no-such-vendor", &event_id, 500.0).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let list = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/bookings")
            .header(header::COOKIE, format!("access_token={}", alice.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_someone_elses_event_not_found() {
    let app = TestApp::new().await;
    let (_, carla, vendor_id, event_id) = marketplace_setup(&app).await;

    // Carla tries to book against Alice's event.
    let res = create_booking(&app, &carla, &vendor_id, &event_id, 500.0).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_confirmation_flow() {
    let app = TestApp::new().await;
    let (alice, carla, vendor_id, event_id) = marketplace_setup(&app).await;

    let created = parse_body(create_booking(&app, &alice, &vendor_id, &event_id, 500.0).await).await;
    assert_eq!(created["data"]["status"], "PENDING");
    let booking_id = created["data"]["id"].as_str().unwrap().to_string();

    // Alice's listing is joined with vendor public fields.
    let mine = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/bookings?event_id={}", event_id))
            .header(header::COOKIE, format!("access_token={}", alice.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(mine["data"][0]["vendor_name"], "Carla Catering");

    // The counterpart vendor confirms.
    let confirmed = update_status(&app, &carla, &booking_id, "CONFIRMED").await;
    assert_eq!(confirmed.status(), StatusCode::OK);

    let vendor_list = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/bookings/vendor")
            .header(header::COOKIE, format!("access_token={}", carla.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(vendor_list["data"][0]["status"], "CONFIRMED");

    // Confirmed revenue shows up in platform stats.
    let admin = app.admin_login().await;
    let stats = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/stats")
            .header("Authorization", format!("Bearer {}", admin.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(stats["data"]["total_revenue"], 500.0);
}

#[tokio::test]
async fn test_pending_and_cancelled_excluded_from_revenue() {
    let app = TestApp::new().await;
    let (alice, carla, vendor_id, event_id) = marketplace_setup(&app).await;

    let confirmed = parse_body(create_booking(&app, &alice, &vendor_id, &event_id, 500.0).await).await;
    update_status(&app, &carla, confirmed["data"]["id"].as_str().unwrap(), "CONFIRMED").await;

    // One stays pending, one is cancelled.
    create_booking(&app, &alice, &vendor_id, &event_id, 111.0).await;
    let cancelled = parse_body(create_booking(&app, &alice, &vendor_id, &event_id, 222.0).await).await;
    update_status(&app, &alice, cancelled["data"]["id"].as_str().unwrap(), "CANCELLED").await;

    let admin = app.admin_login().await;
    let stats = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/stats")
            .header("Authorization", format!("Bearer {}", admin.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(stats["data"]["total_revenue"], 500.0);
    assert_eq!(stats["data"]["total_bookings"], 3);
}

#[tokio::test]
async fn test_illegal_transitions_rejected() {
    let app = TestApp::new().await;
    let (alice, carla, vendor_id, event_id) = marketplace_setup(&app).await;

    let created = parse_body(create_booking(&app, &alice, &vendor_id, &event_id, 500.0).await).await;
    let booking_id = created["data"]["id"].as_str().unwrap().to_string();

    assert_eq!(update_status(&app, &carla, &booking_id, "CANCELLED").await.status(), StatusCode::OK);

    // Cancelled is terminal.
    let revive = update_status(&app, &carla, &booking_id, "CONFIRMED").await;
    assert_eq!(revive.status(), StatusCode::CONFLICT);
    let back = update_status(&app, &carla, &booking_id, "PENDING").await;
    assert_eq!(back.status(), StatusCode::CONFLICT);

    // The row is untouched.
    let vendor_list = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/bookings/vendor")
            .header(header::COOKIE, format!("access_token={}", carla.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(vendor_list["data"][0]["status"], "CANCELLED");
}

#[tokio::test]
async fn test_unknown_status_word_rejected() {
    let app = TestApp::new().await;
    let (alice, _, vendor_id, event_id) = marketplace_setup(&app).await;

    let created = parse_body(create_booking(&app, &alice, &vendor_id, &event_id, 500.0).await).await;
    let booking_id = created["data"]["id"].as_str().unwrap().to_string();

    let res = update_status(&app, &alice, &booking_id, "APPROVED").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unrelated_account_cannot_touch_booking() {
    let app = TestApp::new().await;
    let (alice, _, vendor_id, event_id) = marketplace_setup(&app).await;
    let mallory = app.register("Mallory", "mallory@example.com", "password123", false).await;

    let created = parse_body(create_booking(&app, &alice, &vendor_id, &event_id, 500.0).await).await;
    let booking_id = created["data"]["id"].as_str().unwrap().to_string();

    let res = update_status(&app, &mallory, &booking_id, "CONFIRMED").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vendor_listing_requires_vendor_profile() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", "alice@example.com", "password123", false).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/bookings/vendor")
            .header(header::COOKIE, format!("access_token={}", alice.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
