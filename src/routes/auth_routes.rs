use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedAdmin;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Login del panel; queda fuera del guard JWT
pub fn create_login_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn create_session_router() -> Router<AppState> {
    Router::new().route("/me", get(current_admin))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(&state);
    let response = controller.login(request)?;
    Ok(Json(response))
}

async fn current_admin(Extension(admin): Extension<AuthenticatedAdmin>) -> Json<Value> {
    Json(json!({
        "success": true,
        "username": admin.username,
    }))
}
