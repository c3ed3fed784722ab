use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::photo_controller::PhotoController;
use crate::dto::{ApiResponse, BulkActionResponse, BulkIdsRequest, PaginatedResponse};
use crate::models::photo::{CreatePhotoRequest, PhotoFilters, PhotoResponse, UpdatePhotoRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_photo_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_photos))
        .route("/:slug", get(get_photo))
}

pub fn create_admin_photo_router() -> Router<AppState> {
    Router::new()
        .route("/photos", post(create_photo))
        .route("/photos/feature", post(feature_photos))
        .route("/photos/unfeature", post(unfeature_photos))
        .route("/photos/:id", put(update_photo).delete(delete_photo))
}

fn controller(state: &AppState) -> PhotoController {
    PhotoController::new(state.pool.clone(), state.media_url())
}

async fn list_photos(
    State(state): State<AppState>,
    Query(filters): Query<PhotoFilters>,
) -> Result<Json<PaginatedResponse<PhotoResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_photo(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PhotoResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn create_photo(
    State(state): State<AppState>,
    Json(request): Json<CreatePhotoRequest>,
) -> Result<Json<ApiResponse<PhotoResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePhotoRequest>,
) -> Result<Json<ApiResponse<PhotoResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}

async fn feature_photos(
    State(state): State<AppState>,
    Json(request): Json<BulkIdsRequest>,
) -> Result<Json<ApiResponse<BulkActionResponse>>, AppError> {
    let response = controller(&state).set_featured(request, true).await?;
    Ok(Json(response))
}

async fn unfeature_photos(
    State(state): State<AppState>,
    Json(request): Json<BulkIdsRequest>,
) -> Result<Json<ApiResponse<BulkActionResponse>>, AppError> {
    let response = controller(&state).set_featured(request, false).await?;
    Ok(Json(response))
}
