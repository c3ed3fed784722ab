use serde::{Deserialize, Serialize};
use validator::Validate;

// Login request del panel de administración
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
}

impl LoginResponse {
    pub fn bearer(token: String, expires_in: i64, username: String) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            username,
        }
    }
}
