use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::craft_controller::CraftController;
use crate::dto::detail_dto::CraftDetailResponse;
use crate::dto::{ApiResponse, PaginatedResponse};
use crate::models::craft::{CraftFilters, CraftResponse, CreateCraftRequest, UpdateCraftRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_craft_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crafts))
        .route("/:slug", get(get_craft))
}

pub fn create_admin_craft_router() -> Router<AppState> {
    Router::new()
        .route("/crafts", post(create_craft))
        .route("/crafts/:id", put(update_craft).delete(delete_craft))
}

fn controller(state: &AppState) -> CraftController {
    CraftController::new(state.pool.clone(), state.media_url())
}

async fn list_crafts(
    State(state): State<AppState>,
    Query(filters): Query<CraftFilters>,
) -> Result<Json<PaginatedResponse<CraftResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_craft(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CraftDetailResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn create_craft(
    State(state): State<AppState>,
    Json(request): Json<CreateCraftRequest>,
) -> Result<Json<ApiResponse<CraftResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_craft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCraftRequest>,
) -> Result<Json<ApiResponse<CraftResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_craft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
