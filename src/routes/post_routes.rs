use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::post_controller::PostController;
use crate::dto::detail_dto::PostDetailResponse;
use crate::dto::{ApiResponse, PaginatedResponse};
use crate::models::feedback::{CreateCommentRequest, PublicComment};
use crate::models::post::{CreatePostRequest, PostFilters, PostResponse, UpdatePostRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_post_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/:slug", get(get_post))
        .route("/:slug/comments", post(comment_post))
}

pub fn create_admin_post_router() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
}

fn controller(state: &AppState) -> PostController {
    PostController::new(state.pool.clone(), state.media_url())
}

async fn list_posts(
    State(state): State<AppState>,
    Query(filters): Query<PostFilters>,
) -> Result<Json<PaginatedResponse<PostResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn comment_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<ApiResponse<PublicComment>>, AppError> {
    let response = controller(&state).comment(&slug, request).await?;
    Ok(Json(response))
}

async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
