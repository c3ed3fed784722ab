use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::site_controller::SiteController;
use crate::dto::detail_dto::SiteDetailResponse;
use crate::dto::{ApiResponse, PaginatedResponse};
use crate::models::feedback::{CreateCommentRequest, PublicComment};
use crate::models::tourist_site::{
    CreateSiteImageRequest, CreateSiteRequest, SiteFilters, SiteImageResponse, SiteResponse, SiteSummary,
    UpdateSiteRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_site_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sites))
        .route("/:slug", get(get_site))
        .route("/:slug/comments", post(comment_site))
}

/// Lugares y su galería de imágenes
pub fn create_admin_site_router() -> Router<AppState> {
    Router::new()
        .route("/sites", post(create_site))
        .route("/sites/:id", put(update_site).delete(delete_site))
        .route("/sites/:id/images", get(list_images).post(add_image))
        .route("/images/:id/cover", put(set_cover))
        .route("/images/:id", delete(delete_image))
}

fn controller(state: &AppState) -> SiteController {
    SiteController::new(state.pool.clone(), state.media_url())
}

async fn list_sites(
    State(state): State<AppState>,
    Query(filters): Query<SiteFilters>,
) -> Result<Json<PaginatedResponse<SiteSummary>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_site(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SiteDetailResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn comment_site(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<ApiResponse<PublicComment>>, AppError> {
    let response = controller(&state).comment(&slug, request).await?;
    Ok(Json(response))
}

async fn create_site(
    State(state): State<AppState>,
    Json(request): Json<CreateSiteRequest>,
) -> Result<Json<ApiResponse<SiteResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_site(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSiteRequest>,
) -> Result<Json<ApiResponse<SiteResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_site(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}

async fn list_images(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
) -> Result<Json<Vec<SiteImageResponse>>, AppError> {
    let response = controller(&state).images(site_id).await?;
    Ok(Json(response))
}

async fn add_image(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Json(request): Json<CreateSiteImageRequest>,
) -> Result<Json<ApiResponse<SiteImageResponse>>, AppError> {
    let response = controller(&state).add_image(site_id, request).await?;
    Ok(Json(response))
}

async fn set_cover(
    State(state): State<AppState>,
    Path(image_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SiteImageResponse>>, AppError> {
    let response = controller(&state).set_cover(image_id).await?;
    Ok(Json(response))
}

async fn delete_image(
    State(state): State<AppState>,
    Path(image_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete_image(image_id).await?;
    Ok(Json(response))
}
