use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::activity_controller::ActivityController;
use crate::dto::detail_dto::ActivityDetailResponse;
use crate::dto::{ApiResponse, PaginatedResponse};
use crate::models::activity::{ActivityFilters, ActivityResponse, CreateActivityRequest, UpdateActivityRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_activity_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities))
        .route("/:slug", get(get_activity))
}

pub fn create_admin_activity_router() -> Router<AppState> {
    Router::new()
        .route("/activities", post(create_activity))
        .route("/activities/:id", put(update_activity).delete(delete_activity))
}

fn controller(state: &AppState) -> ActivityController {
    ActivityController::new(state.pool.clone(), state.media_url())
}

async fn list_activities(
    State(state): State<AppState>,
    Query(filters): Query<ActivityFilters>,
) -> Result<Json<PaginatedResponse<ActivityResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_activity(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ActivityDetailResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<Json<ApiResponse<ActivityResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<Json<ApiResponse<ActivityResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
