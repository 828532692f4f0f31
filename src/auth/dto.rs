use serde::{Deserialize, Serialize};

use super::repo_types::{User, UserType};
use crate::ratings::repo_types::Rating;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response returned after login, register or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Someone's public profile with the ratings they received.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub ratings: Vec<Rating>,
    pub average_rating: Option<f64>,
}
