use std::sync::Arc;
use crate::domain::ports::{
    AccountRepository, BookingRepository, ChatService, EmailService, EventRepository,
    GuestRepository, ReportingRepository, ReviewRepository, StorageService, VendorRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub account_repo: Arc<dyn AccountRepository>,
    pub vendor_repo: Arc<dyn VendorRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub guest_repo: Arc<dyn GuestRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub review_repo: Arc<dyn ReviewRepository>,
    pub reporting_repo: Arc<dyn ReportingRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub storage_service: Arc<dyn StorageService>,
    pub chat_service: Arc<dyn ChatService>,
    pub templates: Arc<Tera>,
}
