use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::ApiResponse;
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AuthController {
    service: AuthService,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AuthService::new(&state.config, state.jwt.clone()),
        }
    }

    pub fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
        request.validate()?;
        let response = self.service.login(&request)?;
        Ok(ApiResponse::success_with_message(response, "Login exitoso"))
    }
}
