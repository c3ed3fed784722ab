use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::transport_controller::TransportController;
use crate::dto::{ApiResponse, PaginatedResponse};
use crate::models::transport::{CreateTransportRequest, TransportFilters, TransportResponse, UpdateTransportRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_transport_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transport))
        .route("/:slug", get(get_transport))
}

pub fn create_admin_transport_router() -> Router<AppState> {
    Router::new()
        .route("/transport", post(create_transport))
        .route("/transport/:id", put(update_transport).delete(delete_transport))
}

fn controller(state: &AppState) -> TransportController {
    TransportController::new(state.pool.clone(), state.media_url())
}

async fn list_transport(
    State(state): State<AppState>,
    Query(filters): Query<TransportFilters>,
) -> Result<Json<PaginatedResponse<TransportResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_transport(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TransportResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn create_transport(
    State(state): State<AppState>,
    Json(request): Json<CreateTransportRequest>,
) -> Result<Json<ApiResponse<TransportResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_transport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTransportRequest>,
) -> Result<Json<ApiResponse<TransportResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_transport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
