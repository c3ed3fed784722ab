use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::route_map_dto::{
    DifficultyFilter, ExportFormat, MarkerInfo, RouteComparison, RouteCoordinatesResponse, RouteDetailResponse,
    RouteListResponse, RouteTrace, ValidationReport,
};
use crate::dto::ApiResponse;
use crate::models::route::{
    order_in_use, CreatePointRequest, CreateRouteRequest, Difficulty, PointValues, Route, RouteFilters, RoutePoint,
    RouteSummary, UpdatePointRequest, UpdateRouteRequest,
};
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::tourist_site_repository::TouristSiteRepository;
use crate::services::route_export::{export_route, ExportedFile};
use crate::services::route_map;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppResult};

const SIMILAR_ROUTES: i64 = 3;

pub struct RouteController {
    routes: RouteRepository,
    sites: TouristSiteRepository,
    media: String,
}

/// Agrupar puntos por ruta conservando su orden
fn group_points(points: Vec<RoutePoint>) -> HashMap<Uuid, Vec<RoutePoint>> {
    let mut grouped: HashMap<Uuid, Vec<RoutePoint>> = HashMap::new();
    for point in points {
        grouped.entry(point.route_id).or_default().push(point);
    }
    grouped
}

/// El orden de un punto es único dentro de su ruta
fn ensure_order_free(existing: &[RoutePoint], order: i16, exclude: Option<Uuid>) -> AppResult<()> {
    if order_in_use(existing, order, exclude) {
        return Err(conflict_error("Punto de ruta", "orden", &order.to_string()));
    }
    Ok(())
}

impl RouteController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            routes: RouteRepository::new(pool.clone()),
            sites: TouristSiteRepository::new(pool),
            media: media.to_string(),
        }
    }

    /// Listado de rutas; una dificultad desconocida no filtra
    pub async fn list(&self, filters: RouteFilters) -> AppResult<RouteListResponse> {
        let requested = filters
            .dificultad
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let difficulty = requested.and_then(|value| value.parse::<Difficulty>().ok());

        let routes = self.routes.list(difficulty).await?;
        Ok(RouteListResponse {
            routes: routes
                .into_iter()
                .map(|route| RouteSummary::from((route, self.media.as_str())))
                .collect(),
            difficulty: requested.map(DifficultyFilter::new),
        })
    }

    /// Trazado de todas las rutas para el mapa general
    pub async fn all_coordinates(&self) -> AppResult<Vec<RouteTrace>> {
        let routes = self.routes.list(None).await?;
        let ids: Vec<Uuid> = routes.iter().map(|r| r.route.id).collect();
        let mut grouped = group_points(self.routes.points_for_routes(&ids).await?);

        Ok(routes
            .iter()
            .map(|row| {
                let points = grouped.remove(&row.route.id).unwrap_or_default();
                route_map::route_trace(&row.route, &points)
            })
            .collect())
    }

    pub async fn compare(&self, raw_slugs: &str) -> AppResult<RouteComparison> {
        let slugs = route_map::parse_compare_slugs(raw_slugs)?;
        let routes = self.routes.find_by_slugs(&slugs).await?;

        if routes.len() != slugs.len() {
            let missing: Vec<&str> = slugs
                .iter()
                .filter(|slug| !routes.iter().any(|route| &route.slug == *slug))
                .map(String::as_str)
                .collect();
            return Err(not_found_error("Ruta", &missing.join(", ")));
        }

        let ids: Vec<Uuid> = routes.iter().map(|r| r.id).collect();
        let mut grouped = group_points(self.routes.points_for_routes(&ids).await?);
        let with_points: Vec<(Route, Vec<RoutePoint>)> = routes
            .into_iter()
            .map(|route| {
                let points = grouped.remove(&route.id).unwrap_or_default();
                (route, points)
            })
            .collect();

        debug!("🗺️ Comparando {} rutas", with_points.len());
        Ok(route_map::compare_routes(&with_points))
    }

    /// Detalle con marcadores, configuración de mapa combinada, límites y rutas similares
    pub async fn detail(&self, slug: &str) -> AppResult<RouteDetailResponse> {
        let (route, points) = self.with_points(slug).await?;
        let similar = self.routes.similar(&route, SIMILAR_ROUTES).await?;

        let map_config = route_map::merged_map_config(&route, &points, &self.media);
        let center = route_map::compute_center(&points);
        let bounds = route_map::compute_bounds(&points);
        let markers = route_map::visible_markers(&points, &self.media);

        Ok(RouteDetailResponse {
            full_description: route.description.clone(),
            recommendations: route.recommendations.clone(),
            center,
            bounds,
            points: markers,
            map_config,
            similar_routes: similar
                .into_iter()
                .map(|row| RouteSummary::from((row, self.media.as_str())))
                .collect(),
            summary: RouteSummary::from_route(route, points.len() as i64, &self.media),
        })
    }

    pub async fn coordinates(&self, slug: &str) -> AppResult<RouteCoordinatesResponse> {
        let (route, points) = self.with_points(slug).await?;
        Ok(route_map::coordinates_response(&route, &points, &self.media))
    }

    pub async fn point(&self, slug: &str, point_id: Uuid) -> AppResult<MarkerInfo> {
        let route = self.find(slug).await?;
        let point = self
            .routes
            .find_point(route.id, point_id)
            .await?
            .ok_or_else(|| not_found_error("Punto de ruta", &point_id.to_string()))?;

        Ok(route_map::marker_info(&point, &self.media))
    }

    pub async fn validate(&self, slug: &str) -> AppResult<ValidationReport> {
        let (route, points) = self.with_points(slug).await?;
        let report = route_map::validation_report(&route, &points);

        info!(
            "🧭 Validación de '{}': {}/{} puntos válidos",
            route.slug, report.summary.valid_points, report.summary.total_points
        );
        Ok(report)
    }

    /// Exportar a JSON (por defecto), GPX o KML
    pub async fn export(&self, slug: &str, format: Option<&str>) -> AppResult<ExportedFile> {
        let format = match format.map(str::trim).filter(|f| !f.is_empty()) {
            Some(raw) => raw.parse::<ExportFormat>().map_err(|e| bad_request_error(&e))?,
            None => ExportFormat::Json,
        };

        let (route, points) = self.with_points(slug).await?;
        let file = export_route(&route, &points, format)?;

        info!("📤 Ruta '{}' exportada como {}", route.slug, format.extension());
        Ok(file)
    }

    async fn find(&self, slug: &str) -> AppResult<Route> {
        self.routes
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Ruta", slug))
    }

    async fn with_points(&self, slug: &str) -> AppResult<(Route, Vec<RoutePoint>)> {
        let route = self.find(slug).await?;
        let points = self.routes.points(route.id).await?;
        Ok((route, points))
    }

    // --- Administración ---

    pub async fn create(&self, request: CreateRouteRequest) -> AppResult<ApiResponse<RouteSummary>> {
        request.validate()?;

        let slug = slug_for("name", &request.name)?;
        if self.routes.slug_exists(&slug).await? {
            return Err(conflict_error("Ruta", "slug", &slug));
        }

        let route = self.routes.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            RouteSummary::from_route(route, 0, &self.media),
            "Ruta creada exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdateRouteRequest) -> AppResult<ApiResponse<RouteSummary>> {
        request.validate()?;

        let route = self
            .routes
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Ruta", &id.to_string()))?;
        let point_count = self.routes.points(route.id).await?.len() as i64;

        Ok(ApiResponse::success_with_message(
            RouteSummary::from_route(route, point_count, &self.media),
            "Ruta actualizada exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.routes.delete(id).await? {
            return Err(not_found_error("Ruta", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Ruta eliminada exitosamente"))
    }

    pub async fn points(&self, route_id: Uuid) -> AppResult<Vec<MarkerInfo>> {
        self.ensure_route(route_id).await?;
        let points = self.routes.points(route_id).await?;
        Ok(route_map::markers(&points, &self.media))
    }

    /// Crear un punto resolviendo nombre y coordenadas desde el lugar enlazado
    pub async fn create_point(&self, route_id: Uuid, request: CreatePointRequest) -> AppResult<ApiResponse<MarkerInfo>> {
        request.validate()?;
        self.ensure_route(route_id).await?;

        let site_coordinates = self.site_coordinates(request.site_id).await?;
        let values = request.into_values(site_coordinates);
        self.check_point(route_id, &values, None).await?;

        let point = self.routes.create_point(route_id, &values).await?;
        info!("📍 Punto {} añadido a la ruta {}", point.point_order, route_id);

        Ok(ApiResponse::success_with_message(
            route_map::marker_info(&point, &self.media),
            "Punto creado exitosamente",
        ))
    }

    pub async fn update_point(
        &self,
        route_id: Uuid,
        point_id: Uuid,
        request: UpdatePointRequest,
    ) -> AppResult<ApiResponse<MarkerInfo>> {
        request.validate()?;

        let current = self
            .routes
            .find_point(route_id, point_id)
            .await?
            .ok_or_else(|| not_found_error("Punto de ruta", &point_id.to_string()))?;

        let site_coordinates = self.site_coordinates(request.resolved_site_id(&current)).await?;
        let values = request.apply_to(&current, site_coordinates);
        self.check_point(route_id, &values, Some(point_id)).await?;

        let point = self.routes.update_point(point_id, &values).await?;
        Ok(ApiResponse::success_with_message(
            route_map::marker_info(&point, &self.media),
            "Punto actualizado exitosamente",
        ))
    }

    pub async fn delete_point(&self, route_id: Uuid, point_id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.routes.delete_point(route_id, point_id).await? {
            return Err(not_found_error("Punto de ruta", &point_id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Punto eliminado exitosamente"))
    }

    async fn ensure_route(&self, route_id: Uuid) -> AppResult<()> {
        self.routes
            .find_by_id(route_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| not_found_error("Ruta", &route_id.to_string()))
    }

    /// Coordenadas del lugar enlazado; error si el lugar no existe
    async fn site_coordinates(&self, site_id: Option<Uuid>) -> AppResult<Option<(f64, f64)>> {
        let Some(site_id) = site_id else {
            return Ok(None);
        };

        let site = self
            .sites
            .find_by_id(site_id)
            .await?
            .ok_or_else(|| not_found_error("Lugar turístico", &site_id.to_string()))?;
        Ok(site.coordinates())
    }

    async fn check_point(&self, route_id: Uuid, values: &PointValues, exclude: Option<Uuid>) -> AppResult<()> {
        values.check()?;

        let existing = self.routes.points(route_id).await?;
        ensure_order_free(&existing, values.point_order, exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::tests::point;
    use crate::utils::errors::AppError;

    #[test]
    fn test_group_points_keeps_order_per_route() {
        let other_route = Uuid::new_v4();
        let mut a0 = point(0, 2.1, -75.6);
        let mut a1 = point(1, 2.2, -75.5);
        let mut b0 = point(0, 2.3, -75.4);
        let route_a = Uuid::new_v4();
        a0.route_id = route_a;
        a1.route_id = route_a;
        b0.route_id = other_route;

        let grouped = group_points(vec![a0, b0, a1]);
        let orders: Vec<i16> = grouped[&route_a].iter().map(|p| p.point_order).collect();
        assert_eq!(orders, vec![0, 1]);
        assert_eq!(grouped[&other_route].len(), 1);
    }

    #[test]
    fn test_order_must_be_free_within_route() {
        let existing = vec![point(0, 2.1, -75.6), point(1, 2.2, -75.5)];

        match ensure_order_free(&existing, 1, None) {
            Err(AppError::Conflict(message)) => assert!(message.contains("orden")),
            other => panic!("se esperaba conflicto: {:?}", other),
        }
        assert!(ensure_order_free(&existing, 2, None).is_ok());
        // el propio punto puede conservar su orden al actualizarse
        assert!(ensure_order_free(&existing, 1, Some(existing[1].id)).is_ok());
        assert!(ensure_order_free(&existing, 0, Some(existing[1].id)).is_err());
    }
}
