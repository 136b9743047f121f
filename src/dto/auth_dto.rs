use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::jwt::JwtClaims;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 200))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminUser {
    pub username: String,
    pub role: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AdminUser,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: JwtClaims,
}
