use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::establishment_controller::EstablishmentController;
use crate::dto::detail_dto::EstablishmentDetailResponse;
use crate::dto::{ApiResponse, PaginatedResponse};
use crate::models::establishment::{
    CreateEstablishmentRequest, EstablishmentFilters, EstablishmentResponse, UpdateEstablishmentRequest,
};
use crate::models::feedback::{CreateCommentRequest, CreateRatingRequest, PublicComment, PublicRating};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_establishment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_establishments))
        .route("/:slug", get(get_establishment))
        .route("/:slug/ratings", post(rate_establishment))
        .route("/:slug/comments", post(comment_establishment))
}

pub fn create_admin_establishment_router() -> Router<AppState> {
    Router::new()
        .route("/establishments", post(create_establishment))
        .route("/establishments/:id", put(update_establishment).delete(delete_establishment))
}

fn controller(state: &AppState) -> EstablishmentController {
    EstablishmentController::new(state.pool.clone(), state.media_url())
}

async fn list_establishments(
    State(state): State<AppState>,
    Query(filters): Query<EstablishmentFilters>,
) -> Result<Json<PaginatedResponse<EstablishmentResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_establishment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EstablishmentDetailResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn rate_establishment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateRatingRequest>,
) -> Result<Json<ApiResponse<PublicRating>>, AppError> {
    let response = controller(&state).rate(&slug, request).await?;
    Ok(Json(response))
}

async fn comment_establishment(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<ApiResponse<PublicComment>>, AppError> {
    let response = controller(&state).comment(&slug, request).await?;
    Ok(Json(response))
}

async fn create_establishment(
    State(state): State<AppState>,
    Json(request): Json<CreateEstablishmentRequest>,
) -> Result<Json<ApiResponse<EstablishmentResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_establishment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEstablishmentRequest>,
) -> Result<Json<ApiResponse<EstablishmentResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_establishment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
