use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::search_controller::SearchController;
use crate::dto::search_dto::{SearchQuery, SearchResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_search_router() -> Router<AppState> {
    Router::new()
        .route("/", get(search))
        .route("/quick", get(quick_search))
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let controller = SearchController::new(state.pool.clone(), state.media_url());
    let response = controller.search(query).await?;
    Ok(Json(response))
}

async fn quick_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let controller = SearchController::new(state.pool.clone(), state.media_url());
    let response = controller.quick(query).await?;
    Ok(Json(response))
}
