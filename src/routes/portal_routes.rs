//! Endpoints generales del portal: mapa, contadores y contacto

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::contact_controller::ContactController;
use crate::controllers::map_controller::MapController;
use crate::controllers::stats_controller::StatsController;
use crate::dto::map_dto::GeneralMapResponse;
use crate::dto::stats_dto::SiteCounters;
use crate::dto::ApiResponse;
use crate::models::contact::CreateContactRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_portal_router() -> Router<AppState> {
    Router::new()
        .route("/map", get(general_map))
        .route("/stats", get(site_counters))
        .route("/contact", post(send_contact))
}

async fn general_map(State(state): State<AppState>) -> Result<Json<GeneralMapResponse>, AppError> {
    let controller = MapController::new(state.pool.clone(), state.media_url());
    let response = controller.general().await?;
    Ok(Json(response))
}

async fn site_counters(State(state): State<AppState>) -> Result<Json<SiteCounters>, AppError> {
    let controller = StatsController::new(state.pool.clone(), state.cache.clone());
    let response = controller.counters().await?;
    Ok(Json(response))
}

async fn send_contact(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ContactController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}
