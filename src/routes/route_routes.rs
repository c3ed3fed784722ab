use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_map_dto::{
    CompareQuery, ExportQuery, MarkerInfo, RouteComparison, RouteCoordinatesResponse, RouteDetailResponse,
    RouteListResponse, RouteTrace, ValidationReport,
};
use crate::dto::ApiResponse;
use crate::models::route::{
    CreatePointRequest, CreateRouteRequest, RouteFilters, RouteSummary, UpdatePointRequest, UpdateRouteRequest,
};
use crate::services::route_export::ExportedFile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes))
        .route("/coordinates", get(all_coordinates))
        .route("/compare", get(compare_routes))
        .route("/:slug", get(get_route))
        .route("/:slug/coordinates", get(route_coordinates))
        .route("/:slug/points/:id", get(route_point))
        .route("/:slug/validate", get(validate_route))
        .route("/:slug/export", get(export_route))
}

/// Rutas y sus puntos como colección hija
pub fn create_admin_route_router() -> Router<AppState> {
    Router::new()
        .route("/routes", post(create_route))
        .route("/routes/:id", put(update_route).delete(delete_route))
        .route("/routes/:id/points", get(list_points).post(create_point))
        .route("/routes/:id/points/:point_id", put(update_point).delete(delete_point))
}

fn controller(state: &AppState) -> RouteController {
    RouteController::new(state.pool.clone(), state.media_url())
}

/// Descarga con nombre de archivo y tipo de contenido del formato
fn download(file: ExportedFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response()
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<RouteListResponse>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn all_coordinates(State(state): State<AppState>) -> Result<Json<Vec<RouteTrace>>, AppError> {
    let response = controller(&state).all_coordinates().await?;
    Ok(Json(response))
}

async fn compare_routes(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<RouteComparison>, AppError> {
    let response = controller(&state).compare(&query.slugs).await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let response = controller(&state).detail(&slug).await?;
    Ok(Json(response))
}

async fn route_coordinates(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RouteCoordinatesResponse>, AppError> {
    let response = controller(&state).coordinates(&slug).await?;
    Ok(Json(response))
}

async fn route_point(
    State(state): State<AppState>,
    Path((slug, point_id)): Path<(String, Uuid)>,
) -> Result<Json<MarkerInfo>, AppError> {
    let response = controller(&state).point(&slug, point_id).await?;
    Ok(Json(response))
}

async fn validate_route(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ValidationReport>, AppError> {
    let response = controller(&state).validate(&slug).await?;
    Ok(Json(response))
}

async fn export_route(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let file = controller(&state).export(&slug, query.format.as_deref()).await?;
    Ok(download(file))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteSummary>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRouteRequest>,
) -> Result<Json<ApiResponse<RouteSummary>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}

async fn list_points(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
) -> Result<Json<Vec<MarkerInfo>>, AppError> {
    let response = controller(&state).points(route_id).await?;
    Ok(Json(response))
}

async fn create_point(
    State(state): State<AppState>,
    Path(route_id): Path<Uuid>,
    Json(request): Json<CreatePointRequest>,
) -> Result<Json<ApiResponse<MarkerInfo>>, AppError> {
    let response = controller(&state).create_point(route_id, request).await?;
    Ok(Json(response))
}

async fn update_point(
    State(state): State<AppState>,
    Path((route_id, point_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdatePointRequest>,
) -> Result<Json<ApiResponse<MarkerInfo>>, AppError> {
    let response = controller(&state).update_point(route_id, point_id, request).await?;
    Ok(Json(response))
}

async fn delete_point(
    State(state): State<AppState>,
    Path((route_id, point_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete_point(route_id, point_id).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_sets_attachment_headers() {
        let response = download(ExportedFile {
            content_type: "application/gpx+xml",
            filename: "ruta-del-cacao.gpx".to_string(),
            body: "<gpx/>".to_string(),
        });

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/gpx+xml");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ruta-del-cacao.gpx\""
        );
    }
}
