use serde::{Deserialize, Serialize};
use super::account::AccountProfile;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
    pub csrf_token: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub csrf_token: String,
    pub user: AccountProfile,
}
