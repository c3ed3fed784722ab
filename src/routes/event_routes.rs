use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::event_controller::EventController;
use crate::dto::{ApiResponse, PaginatedResponse};
use crate::models::event::{CreateEventRequest, EventFilters, EventResponse, UpdateEventRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_event_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/:slug", get(get_event))
}

pub fn create_admin_event_router() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/:id", put(update_event).delete(delete_event))
}

fn controller(state: &AppState) -> EventController {
    EventController::new(state.pool.clone(), state.media_url())
}

async fn list_events(
    State(state): State<AppState>,
    Query(filters): Query<EventFilters>,
) -> Result<Json<PaginatedResponse<EventResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<EventResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<ApiResponse<EventResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
