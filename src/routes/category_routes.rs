use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::category_controller::CategoryController;
use crate::dto::ApiResponse;
use crate::models::category::{Category, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_category_router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

pub fn create_admin_category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category))
        .route("/categories/:id", put(update_category).delete(delete_category))
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let controller = CategoryController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let controller = CategoryController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let controller = CategoryController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CategoryController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
