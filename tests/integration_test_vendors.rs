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

async fn create_vendor(app: &TestApp, auth: &AuthHeaders, name: &str, category: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/vendors")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "business_name": name,
                "category": category,
                "description": "Full service",
                "price_min": 500.0,
                "price_max": 5000.0
            }).to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_create_vendor_profile() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;

    let res = create_vendor(&app, &auth, "Carla Catering", "catering").await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["data"]["business_name"], "Carla Catering");
    assert_eq!(body["data"]["is_verified"], false);
    assert_eq!(body["data"]["rating"], 0.0);

    // The owning account is flagged as a vendor.
    let me = parse_body(app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/auth/is-auth")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()).await;
    assert_eq!(me["data"]["is_vendor"], true);
}

#[tokio::test]
async fn test_second_vendor_profile_conflicts() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;

    assert_eq!(create_vendor(&app, &auth, "First", "catering").await.status(), StatusCode::CREATED);
    assert_eq!(create_vendor(&app, &auth, "Second", "music").await.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_vendor_validation() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;

    let bad_category = create_vendor(&app, &auth, "Shop", "plumbing").await;
    assert_eq!(bad_category.status(), StatusCode::BAD_REQUEST);

    let bad_prices = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/vendors")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "business_name": "Shop", "category": "venue",
                "price_min": 900.0, "price_max": 100.0
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(bad_prices.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_vendor_partial() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;
    create_vendor(&app, &auth, "Carla Catering", "catering").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/api/v1/vendors/me")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "description": "Weddings a speciality",
                "price_max": 9000.0,
                "is_available": false
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["business_name"], "Carla Catering");
    assert_eq!(body["data"]["description"], "Weddings a speciality");
    assert_eq!(body["data"]["price_max"], 9000.0);
    assert_eq!(body["data"]["is_available"], false);
}

#[tokio::test]
async fn test_listing_includes_owner_identity() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;
    create_vendor(&app, &auth, "Carla Catering", "catering").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/vendors")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let vendors = body["data"].as_array().unwrap();
    assert_eq!(vendors.len(), 1);
    assert_eq!(vendors[0]["owner_name"], "Carla");
    assert_eq!(vendors[0]["owner_email"], "carla@example.com");

    let unknown = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/vendors/does-not-exist")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_toggle_verification_is_admin_only() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;
    let created = parse_body(create_vendor(&app, &auth, "Carla Catering", "catering").await).await;
    let vendor_id = created["data"]["id"].as_str().unwrap().to_string();

    // A regular session is refused.
    let forbidden = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/admin/vendors/{}/toggle-verification", vendor_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let admin = app.admin_login().await;
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT")
            .uri(format!("/api/v1/admin/vendors/{}/toggle-verification", vendor_id))
            .header("Authorization", format!("Bearer {}", admin.access_token))
            .header("X-CSRF-Token", &admin.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["data"]["is_verified"], true);
}

fn multipart_body(boundary: &str, filename: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: image/png\r\n\r\nfake-png-bytes\r\n--{b}--\r\n",
        b = boundary, f = filename
    )
}

#[tokio::test]
async fn test_upload_profile_image() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;
    create_vendor(&app, &auth, "Carla Catering", "catering").await;

    let boundary = "----planora-test-boundary";
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/vendors/me/image")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(multipart_body(boundary, "logo.png"))).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["image_url"], "https://cdn.test/logo.png");
}

#[tokio::test]
async fn test_portfolio_add_and_remove() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;
    create_vendor(&app, &auth, "Carla Catering", "catering").await;

    let boundary = "----planora-test-boundary";
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/vendors/me/portfolio")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(multipart_body(boundary, "shot1.png"))).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["portfolio_images"], json!(["https://cdn.test/shot1.png"]));

    let removed = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri("/api/v1/vendors/me/portfolio")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"url": "https://cdn.test/shot1.png"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(removed.status(), StatusCode::OK);
    assert_eq!(parse_body(removed).await["data"]["portfolio_images"], json!([]));

    let missing = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri("/api/v1/vendors/me/portfolio")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"url": "https://cdn.test/ghost.png"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mutation_without_csrf_header_is_rejected() {
    let app = TestApp::new().await;
    let auth = app.register("Carla", "carla@example.com", "password123", true).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/vendors")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "business_name": "Sneaky", "category": "venue"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
