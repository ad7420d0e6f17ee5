use crate::domain::models::{
    account::{Account, AccountProfile},
    booking::{Booking, BookingWithVendor},
    event::Event,
    guest::Guest,
    reporting::{PlatformStats, PlatformTrends, UserAnalytics, VendorAnalytics},
    review::{Review, ReviewWithAuthor, ReviewableBooking},
    vendor::{Vendor, VendorWithOwner},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: &Account) -> Result<Account, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, AppError>;
    async fn list(&self) -> Result<Vec<AccountProfile>, AppError>;
    async fn update(&self, account: &Account) -> Result<Account, AppError>;
    async fn clear_expired_reset_tickets(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

#[async_trait]
pub trait VendorRepository: Send + Sync {
    async fn create(&self, vendor: &Vendor) -> Result<Vendor, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Vendor>, AppError>;
    async fn find_by_account(&self, account_id: &str) -> Result<Option<Vendor>, AppError>;
    async fn find_with_owner(&self, id: &str) -> Result<Option<VendorWithOwner>, AppError>;
    async fn list_with_owner(&self) -> Result<Vec<VendorWithOwner>, AppError>;
    async fn update(&self, vendor: &Vendor) -> Result<Vendor, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, account_id: &str, id: &str) -> Result<Option<Event>, AppError>;
    async fn list_by_account(&self, account_id: &str) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, account_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Guest>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Guest>, AppError>;
    async fn update(&self, guest: &Guest) -> Result<Guest, AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_account(&self, account_id: &str, event_id: Option<&str>) -> Result<Vec<BookingWithVendor>, AppError>;
    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<Booking, AppError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts the review and recomputes the vendor's rating/review-count
    /// inside the same transaction.
    async fn create(&self, review: &Review) -> Result<Review, AppError>;
    async fn find_by_id(&self, account_id: &str, id: &str) -> Result<Option<Review>, AppError>;
    async fn find_by_booking(&self, booking_id: &str) -> Result<Option<Review>, AppError>;
    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<ReviewWithAuthor>, AppError>;
    /// Same transactional aggregate recompute as `create`.
    async fn update(&self, review: &Review) -> Result<Review, AppError>;
    async fn list_reviewable_bookings(&self, account_id: &str) -> Result<Vec<ReviewableBooking>, AppError>;
    async fn reconcile_vendor_aggregates(&self) -> Result<u64, AppError>;
}

#[async_trait]
pub trait ReportingRepository: Send + Sync {
    async fn platform_stats(&self) -> Result<PlatformStats, AppError>;
    async fn platform_trends(&self, months: i64) -> Result<PlatformTrends, AppError>;
    async fn user_analytics(&self, account_id: &str) -> Result<UserAnalytics, AppError>;
    async fn vendor_analytics(&self, vendor_id: &str) -> Result<VendorAnalytics, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Uploads the bytes and returns the public URL of the stored object.
    async fn upload(&self, filename: &str, content_type: &str, bytes: Vec<u8>) -> Result<String, AppError>;
    async fn delete(&self, url: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn relay(&self, message: &str, session_id: &str, context: Option<&Value>) -> Result<Value, AppError>;
}
