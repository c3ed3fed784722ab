//! Moderación de comentarios y calificaciones, y bandeja de contacto

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::contact_controller::ContactController;
use crate::controllers::feedback_controller::{FeedbackController, ModerationAction};
use crate::dto::{ApiResponse, BulkActionResponse, BulkIdsRequest, PaginatedResponse};
use crate::models::contact::{ContactFilters, ContactMessage};
use crate::models::feedback::{Comment, ModerationFilters, Rating};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_moderation_router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments))
        .route("/comments/approve", post(approve_comments))
        .route("/comments/unapprove", post(unapprove_comments))
        .route("/comments/delete", post(delete_comments))
        .route("/ratings", get(list_ratings))
        .route("/ratings/approve", post(approve_ratings))
        .route("/ratings/unapprove", post(unapprove_ratings))
        .route("/ratings/delete", post(delete_ratings))
        .route("/contact", get(list_contact))
        .route("/contact/:id/read", put(mark_contact_read))
}

type BulkResult = Result<Json<ApiResponse<BulkActionResponse>>, AppError>;

async fn list_comments(
    State(state): State<AppState>,
    Query(filters): Query<ModerationFilters>,
) -> Result<Json<PaginatedResponse<Comment>>, AppError> {
    let controller = FeedbackController::new(state.pool.clone());
    let response = controller.comments(filters).await?;
    Ok(Json(response))
}

async fn moderate_comments(state: AppState, request: BulkIdsRequest, action: ModerationAction) -> BulkResult {
    let controller = FeedbackController::new(state.pool.clone());
    let response = controller.moderate_comments(request, action).await?;
    Ok(Json(response))
}

async fn approve_comments(State(state): State<AppState>, Json(request): Json<BulkIdsRequest>) -> BulkResult {
    moderate_comments(state, request, ModerationAction::Approve).await
}

async fn unapprove_comments(State(state): State<AppState>, Json(request): Json<BulkIdsRequest>) -> BulkResult {
    moderate_comments(state, request, ModerationAction::Unapprove).await
}

async fn delete_comments(State(state): State<AppState>, Json(request): Json<BulkIdsRequest>) -> BulkResult {
    moderate_comments(state, request, ModerationAction::Delete).await
}

async fn list_ratings(
    State(state): State<AppState>,
    Query(filters): Query<ModerationFilters>,
) -> Result<Json<PaginatedResponse<Rating>>, AppError> {
    let controller = FeedbackController::new(state.pool.clone());
    let response = controller.ratings(filters).await?;
    Ok(Json(response))
}

async fn moderate_ratings(state: AppState, request: BulkIdsRequest, action: ModerationAction) -> BulkResult {
    let controller = FeedbackController::new(state.pool.clone());
    let response = controller.moderate_ratings(request, action).await?;
    Ok(Json(response))
}

async fn approve_ratings(State(state): State<AppState>, Json(request): Json<BulkIdsRequest>) -> BulkResult {
    moderate_ratings(state, request, ModerationAction::Approve).await
}

async fn unapprove_ratings(State(state): State<AppState>, Json(request): Json<BulkIdsRequest>) -> BulkResult {
    moderate_ratings(state, request, ModerationAction::Unapprove).await
}

async fn delete_ratings(State(state): State<AppState>, Json(request): Json<BulkIdsRequest>) -> BulkResult {
    moderate_ratings(state, request, ModerationAction::Delete).await
}

async fn list_contact(
    State(state): State<AppState>,
    Query(filters): Query<ContactFilters>,
) -> Result<Json<PaginatedResponse<ContactMessage>>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn mark_contact_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ContactMessage>>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let response = controller.mark_read(id).await?;
    Ok(Json(response))
}
