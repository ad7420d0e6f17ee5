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

fn status_count(list: &Value, status: &str) -> i64 {
    list.as_array().unwrap().iter()
        .find(|e| e["status"] == status)
        .map(|e| e["count"].as_i64().unwrap())
        .unwrap_or(0)
}

async fn post_json(app: &TestApp, auth: &AuthHeaders, uri: &str, payload: Value) -> Value {
    parse_body(app.router.clone().oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()).await
}

async fn get_authed(app: &TestApp, auth: &AuthHeaders, uri: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_user_analytics() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", "alice@example.com", "password123", false).await;
    let carla = app.register("Carla", "carla@example.com", "password123", true).await;

    let vendor = post_json(&app, &carla, "/api/v1/vendors", json!({
        "business_name": "Carla Catering", "category": "catering"
    })).await;
    let vendor_id = vendor["data"]["id"].as_str().unwrap().to_string();

    // Two wedding events (one far future), one birthday.
    let wedding = post_json(&app, &alice, "/api/v1/events", json!({
        "title": "Wedding", "event_type": "Wedding", "event_date": "2099-06-01", "budget": 10000.0
    })).await;
    post_json(&app, &alice, "/api/v1/events", json!({
        "title": "Anniversary", "event_type": "Wedding", "event_date": "2020-06-01", "budget": 2000.0
    })).await;
    post_json(&app, &alice, "/api/v1/events", json!({
        "title": "Birthday", "event_type": "Birthday", "event_date": "2099-01-01", "budget": 0.0
    })).await;
    let event_id = wedding["data"]["id"].as_str().unwrap().to_string();

    // One confirmed booking worth 500, one pending.
    let booking = post_json(&app, &alice, "/api/v1/bookings", json!({
        "vendor_id": vendor_id, "event_id": event_id, "service_date": "2099-06-01", "amount": 500.0
    })).await;
    post_json(&app, &alice, "/api/v1/bookings", json!({
        "vendor_id": vendor_id, "event_id": event_id, "service_date": "2099-06-01", "amount": 300.0
    })).await;

    let booking_id = booking["data"]["id"].as_str().unwrap();
    app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/bookings/{}/status", booking_id))
            .header(header::COOKIE, format!("access_token={}", carla.access_token))
            .header("X-CSRF-Token", &carla.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"status": "CONFIRMED"}).to_string())).unwrap()
    ).await.unwrap();

    let res = get_authed(&app, &alice, "/api/v1/analytics/user").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let data = &body["data"];

    assert_eq!(status_count(&data["events_by_status"], "DRAFT"), 3);
    assert_eq!(status_count(&data["bookings_by_status"], "CONFIRMED"), 1);
    assert_eq!(status_count(&data["bookings_by_status"], "PENDING"), 1);
    assert_eq!(data["revenue_spent"], 500.0);
    assert_eq!(data["average_budget"], 4000.0);
    assert_eq!(data["upcoming_events"], 2);
    assert_eq!(data["top_event_types"][0]["event_type"], "Wedding");
    assert_eq!(data["top_event_types"][0]["count"], 2);
    // All three events were created just now, in one calendar month.
    assert_eq!(data["monthly_events"].as_array().unwrap().len(), 1);
    assert_eq!(data["monthly_events"][0]["count"], 3);
}

#[tokio::test]
async fn test_vendor_analytics() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", "alice@example.com", "password123", false).await;
    let carla = app.register("Carla", "carla@example.com", "password123", true).await;

    let vendor = post_json(&app, &carla, "/api/v1/vendors", json!({
        "business_name": "Carla Catering", "category": "catering"
    })).await;
    let vendor_id = vendor["data"]["id"].as_str().unwrap().to_string();

    let event = post_json(&app, &alice, "/api/v1/events", json!({
        "title": "Wedding", "event_type": "Wedding", "event_date": "2099-06-01"
    })).await;
    let event_id = event["data"]["id"].as_str().unwrap().to_string();

    let booking = post_json(&app, &alice, "/api/v1/bookings", json!({
        "vendor_id": vendor_id, "event_id": event_id, "service_date": "2099-06-01", "amount": 750.0
    })).await;
    let booking_id = booking["data"]["id"].as_str().unwrap();

    app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/v1/bookings/{}/status", booking_id))
            .header(header::COOKIE, format!("access_token={}", carla.access_token))
            .header("X-CSRF-Token", &carla.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"status": "CONFIRMED"}).to_string())).unwrap()
    ).await.unwrap();

    let res = get_authed(&app, &carla, "/api/v1/analytics/vendor").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let data = &body["data"];

    assert_eq!(data["revenue_earned"], 750.0);
    assert_eq!(status_count(&data["bookings_by_status"], "CONFIRMED"), 1);
    assert_eq!(data["recent_bookings"].as_array().unwrap().len(), 1);
    assert_eq!(data["review_count"], 0);
}

#[tokio::test]
async fn test_vendor_analytics_requires_profile() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", "alice@example.com", "password123", false).await;

    let res = get_authed(&app, &alice, "/api/v1/analytics/vendor").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vendor_dashboard_bundle() {
    let app = TestApp::new().await;
    let carla = app.register("Carla", "carla@example.com", "password123", true).await;
    post_json(&app, &carla, "/api/v1/vendors", json!({
        "business_name": "Carla Catering", "category": "catering"
    })).await;

    let res = get_authed(&app, &carla, "/api/v1/vendors/me/dashboard").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["vendor"]["business_name"], "Carla Catering");
    assert_eq!(body["data"]["analytics"]["revenue_earned"], 0.0);
}
