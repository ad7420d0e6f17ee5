use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_vendor: bool,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SendResetOtpRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct CreateVendorRequest {
    pub business_name: String,
    pub category: String,
    pub description: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateVendorRequest {
    pub business_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub is_available: Option<bool>,
}

#[derive(Deserialize)]
pub struct RemovePortfolioImageRequest {
    pub url: String,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub location: Option<String>,
    pub guest_count: Option<i64>,
    pub budget: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub event_type: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub guest_count: Option<i64>,
    pub budget: Option<f64>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateGuestRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateGuestRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub rsvp_status: Option<String>,
    pub plus_one: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub vendor_id: String,
    pub event_id: String,
    pub service_date: NaiveDate,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct BookingListQuery {
    pub event_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct SubmitReviewRequest {
    pub booking_id: String,
    pub rating: i32,
    pub comment: String,
}

#[derive(Deserialize)]
pub struct EditReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
    pub context: Option<serde_json::Value>,
}
