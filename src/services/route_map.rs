//! Servicio de mapa de rutas
//!
//! Funciones puras que convierten los puntos ordenados de una ruta en datos
//! listos para un mapa: centro, límites, marcadores, configuración combinada,
//! informe de validación de coordenadas y comparación entre rutas.
//!
//! Todas las funciones asumen que los puntos vienen ordenados por
//! `point_order`, que es como los entrega el repositorio.

use serde_json::{json, Map, Value};

use crate::dto::route_map_dto::{
    Bounds, ComparedRoute, MapCenter, MarkerInfo, MarkerSite, PointIssue, PointReport,
    RouteComparison, RouteCoordinatesResponse, RouteTrace, ValidationReport, ValidationSummary,
};
use crate::models::route::{Route, RoutePoint};
use crate::utils::errors::{bad_request_error, AppResult};
use crate::utils::urls::{media_url, route_url, site_url};

/// Centro por defecto: parque principal de Garzón
pub const DEFAULT_CENTER: MapCenter = MapCenter {
    lat: 2.1975,
    lng: -75.6514,
};

pub const DEFAULT_ZOOM: u8 = 13;

/// Distancia máxima aceptable entre un punto y el centro de su ruta
pub const MAX_DISTANCE_FROM_CENTER_KM: f64 = 50.0;

pub const MIN_COMPARED_ROUTES: usize = 2;
pub const MAX_COMPARED_ROUTES: usize = 6;

/// Colores asignados por posición al comparar rutas
pub const COMPARISON_PALETTE: [&str; MAX_COMPARED_ROUTES] =
    ["#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4"];

const EARTH_RADIUS_KM: f64 = 6371.0;

fn point_coordinates(points: &[RoutePoint]) -> Vec<(f64, f64)> {
    points.iter().map(RoutePoint::coordinates).collect()
}

/// Media aritmética de un conjunto de coordenadas
pub fn center_of(coordinates: &[(f64, f64)]) -> MapCenter {
    if coordinates.is_empty() {
        return DEFAULT_CENTER;
    }

    let count = coordinates.len() as f64;
    let (lat_sum, lng_sum) = coordinates
        .iter()
        .fold((0.0, 0.0), |(lat, lng), (p_lat, p_lng)| (lat + p_lat, lng + p_lng));

    MapCenter {
        lat: lat_sum / count,
        lng: lng_sum / count,
    }
}

/// Caja envolvente de un conjunto de coordenadas
pub fn bounds_of(coordinates: &[(f64, f64)]) -> Option<Bounds> {
    let (first_lat, first_lng) = *coordinates.first()?;
    let initial = Bounds {
        north: first_lat,
        south: first_lat,
        east: first_lng,
        west: first_lng,
    };

    Some(coordinates.iter().fold(initial, |bounds, (lat, lng)| Bounds {
        north: bounds.north.max(*lat),
        south: bounds.south.min(*lat),
        east: bounds.east.max(*lng),
        west: bounds.west.min(*lng),
    }))
}

/// Centro de la ruta; el centro por defecto si no tiene puntos
pub fn compute_center(points: &[RoutePoint]) -> MapCenter {
    center_of(&point_coordinates(points))
}

/// Límites de la ruta; `None` si no tiene puntos
pub fn compute_bounds(points: &[RoutePoint]) -> Option<Bounds> {
    bounds_of(&point_coordinates(points))
}

/// Información de marcador de un punto
pub fn marker_info(point: &RoutePoint, media: &str) -> MarkerInfo {
    let site = match (point.site_id, point.site_name.as_ref()) {
        (Some(_), Some(site_name)) => Some(MarkerSite {
            name: site_name.clone(),
            category: point.site_category.clone(),
            address: point.site_address.clone(),
            image_url: media_url(media, point.site_image.as_deref().unwrap_or_default()),
            url: point.site_slug.as_deref().map(site_url),
        }),
        _ => None,
    };

    MarkerInfo {
        id: point.id,
        lat: point.latitude,
        lng: point.longitude,
        order: point.point_order,
        name: point.display_name(),
        description: point.display_description(),
        stay_time: point.stay_time.clone(),
        marker_color: point.marker_color.clone(),
        marker_icon: point.marker_icon.clone(),
        show_on_map: point.show_on_map,
        site,
    }
}

/// Marcadores de todos los puntos de la ruta
pub fn markers(points: &[RoutePoint], media: &str) -> Vec<MarkerInfo> {
    points.iter().map(|point| marker_info(point, media)).collect()
}

/// Marcadores que deben pintarse en el mapa (`show_on_map`)
pub fn visible_markers(points: &[RoutePoint], media: &str) -> Vec<MarkerInfo> {
    points
        .iter()
        .filter(|point| point.show_on_map)
        .map(|point| marker_info(point, media))
        .collect()
}

/// Combinar superficialmente: las claves del override reemplazan a las base
pub fn merge_config(base: Value, overrides: Option<&Value>) -> Value {
    let mut merged = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    if let Some(Value::Object(extra)) = overrides {
        for (key, value) in extra {
            merged.insert(key.clone(), value.clone());
        }
    }

    Value::Object(merged)
}

/// Configuración base del mapa de una ruta
pub fn base_map_config(route: &Route, points: &[RoutePoint], media: &str) -> Value {
    let center = compute_center(points);
    json!({
        "center": { "lat": center.lat, "lng": center.lng },
        "zoom": DEFAULT_ZOOM,
        "points": visible_markers(points, media),
        "marker_style": "numbered",
        "show_route": true,
        "route_color": route.difficulty.color(),
    })
}

/// Configuración final: base más el override guardado en la ruta
pub fn merged_map_config(route: &Route, points: &[RoutePoint], media: &str) -> Value {
    merge_config(base_map_config(route, points, media), route.map_config.as_ref())
}

/// Coordenadas y marcadores de una ruta
pub fn coordinates_response(route: &Route, points: &[RoutePoint], media: &str) -> RouteCoordinatesResponse {
    RouteCoordinatesResponse {
        name: route.name.clone(),
        slug: route.slug.clone(),
        difficulty: route.difficulty,
        color: route.difficulty.color(),
        center: compute_center(points),
        bounds: compute_bounds(points),
        points: visible_markers(points, media),
    }
}

fn as_pairs(points: &[RoutePoint]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.latitude, p.longitude]).collect()
}

/// Trazado de una ruta para el mapa general
pub fn route_trace(route: &Route, points: &[RoutePoint]) -> RouteTrace {
    RouteTrace {
        name: route.name.clone(),
        slug: route.slug.clone(),
        difficulty: route.difficulty,
        color: route.difficulty.color(),
        url: route_url(&route.slug),
        center: compute_center(points),
        coordinates: as_pairs(points),
    }
}

/// Distancia de gran círculo en km
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let lat1 = from.0.to_radians();
    let lat2 = to.0.to_radians();
    let delta_lat = (to.0 - from.0).to_radians();
    let delta_lng = (to.1 - from.1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

fn in_range((lat, lng): (f64, f64)) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

fn is_plausible(coordinates: (f64, f64)) -> bool {
    in_range(coordinates) && coordinates != (0.0, 0.0)
}

fn point_issues(point: &RoutePoint, previous: Option<&RoutePoint>, center: MapCenter) -> Vec<PointIssue> {
    let (lat, lng) = point.coordinates();

    if !in_range((lat, lng)) {
        return vec![PointIssue::OutOfRange];
    }
    if lat == 0.0 && lng == 0.0 {
        return vec![PointIssue::ZeroCoordinates];
    }

    let mut issues = Vec::new();
    if previous.map(RoutePoint::coordinates) == Some((lat, lng)) {
        issues.push(PointIssue::DuplicateOfPrevious);
    }

    let distance_km = haversine_km((center.lat, center.lng), (lat, lng));
    if distance_km > MAX_DISTANCE_FROM_CENTER_KM {
        issues.push(PointIssue::FarFromCenter {
            distance_km: (distance_km * 10.0).round() / 10.0,
        });
    }

    issues
}

/// Informe de validación de las coordenadas de una ruta
///
/// El centro de referencia ignora los puntos fuera de rango o en (0, 0).
pub fn validation_report(route: &Route, points: &[RoutePoint]) -> ValidationReport {
    let plausible: Vec<(f64, f64)> = point_coordinates(points)
        .into_iter()
        .filter(|coordinates| is_plausible(*coordinates))
        .collect();
    let center = center_of(&plausible);

    let reports: Vec<PointReport> = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let previous = index.checked_sub(1).map(|i| &points[i]);
            let issues = point_issues(point, previous, center);
            PointReport {
                id: point.id,
                order: point.point_order,
                name: point.display_name(),
                lat: point.latitude,
                lng: point.longitude,
                valid: issues.is_empty(),
                messages: issues.iter().map(PointIssue::message).collect(),
                issues,
            }
        })
        .collect();

    let valid_points = reports.iter().filter(|r| r.valid).count();
    let summary = ValidationSummary {
        total_points: reports.len(),
        valid_points,
        points_with_issues: reports.len() - valid_points,
        is_valid: valid_points == reports.len(),
    };

    ValidationReport {
        route: route.name.clone(),
        slug: route.slug.clone(),
        center,
        points: reports,
        summary,
    }
}

/// Separar y validar la lista de slugs a comparar
pub fn parse_compare_slugs(raw: &str) -> AppResult<Vec<String>> {
    let mut slugs: Vec<String> = Vec::new();
    for slug in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !slugs.iter().any(|existing| existing == slug) {
            slugs.push(slug.to_string());
        }
    }

    if slugs.len() < MIN_COMPARED_ROUTES || slugs.len() > MAX_COMPARED_ROUTES {
        return Err(bad_request_error(&format!(
            "Se pueden comparar entre {} y {} rutas",
            MIN_COMPARED_ROUTES, MAX_COMPARED_ROUTES
        )));
    }

    Ok(slugs)
}

/// Comparar varias rutas, asignando un color de la paleta por posición
pub fn compare_routes(routes: &[(Route, Vec<RoutePoint>)]) -> RouteComparison {
    let compared: Vec<ComparedRoute> = routes
        .iter()
        .enumerate()
        .map(|(index, (route, points))| ComparedRoute {
            name: route.name.clone(),
            slug: route.slug.clone(),
            difficulty: route.difficulty,
            difficulty_label: route.difficulty.label(),
            distance_km: route.distance_km,
            estimated_duration: route.estimated_duration.clone(),
            point_count: points.len(),
            center: compute_center(points),
            bounds: compute_bounds(points),
            coordinates: as_pairs(points),
            color: COMPARISON_PALETTE[index % COMPARISON_PALETTE.len()],
        })
        .collect();

    let all_coordinates: Vec<(f64, f64)> = routes
        .iter()
        .flat_map(|(_, points)| point_coordinates(points))
        .collect();

    RouteComparison {
        routes: compared,
        bounds: bounds_of(&all_coordinates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::tests::point;
    use crate::models::route::Difficulty;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn route(map_config: Option<Value>) -> Route {
        Route {
            id: Uuid::new_v4(),
            name: "Ruta del Café".to_string(),
            slug: "ruta-del-cafe".to_string(),
            description: "Recorrido por fincas cafeteras".to_string(),
            estimated_duration: "4 horas".to_string(),
            distance_km: Decimal::new(1250, 2),
            difficulty: Difficulty::Media,
            recommendations: String::new(),
            main_image: String::new(),
            map_config,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_center_and_bounds_of_two_points() {
        let points = vec![point(0, 2.10, -75.60), point(1, 2.30, -75.40)];

        let center = compute_center(&points);
        assert!(approx(center.lat, 2.20));
        assert!(approx(center.lng, -75.50));

        let bounds = compute_bounds(&points).unwrap();
        assert_eq!(
            bounds,
            Bounds {
                north: 2.30,
                south: 2.10,
                east: -75.40,
                west: -75.60
            }
        );
    }

    #[test]
    fn test_zero_points_use_fallback() {
        assert_eq!(compute_center(&[]), DEFAULT_CENTER);
        assert!(compute_bounds(&[]).is_none());
    }

    #[test]
    fn test_single_point_has_degenerate_bounds() {
        let points = vec![point(0, 2.19, -75.65)];
        let bounds = compute_bounds(&points).unwrap();
        assert_eq!(bounds.north, bounds.south);
        assert_eq!(bounds.east, bounds.west);
    }

    #[test]
    fn test_center_lies_within_bounds() {
        let points = vec![
            point(0, 2.19, -75.65),
            point(1, 2.25, -75.70),
            point(2, 2.05, -75.61),
            point(3, 2.31, -75.58),
        ];
        let center = compute_center(&points);
        let bounds = compute_bounds(&points).unwrap();
        assert!(bounds.north >= bounds.south);
        assert!(bounds.east >= bounds.west);
        assert!(bounds.contains(center.lat, center.lng));
    }

    #[test]
    fn test_merge_config_override_wins() {
        let base = json!({"zoom": 13, "show_route": true, "marker_style": "numbered"});
        let overrides = json!({"zoom": 15, "tiles": "satellite"});

        let merged = merge_config(base, Some(&overrides));
        assert_eq!(merged["zoom"], 15);
        assert_eq!(merged["tiles"], "satellite");
        assert_eq!(merged["show_route"], true);
        assert_eq!(merged["marker_style"], "numbered");
    }

    #[test]
    fn test_merged_map_config_defaults() {
        let mut hidden = point(1, 2.30, -75.40);
        hidden.show_on_map = false;
        let points = vec![point(0, 2.10, -75.60), hidden];

        let config = merged_map_config(&route(None), &points, "/media/");
        assert_eq!(config["zoom"], 13);
        assert_eq!(config["marker_style"], "numbered");
        assert_eq!(config["route_color"], "#ffc107");
        assert_eq!(config["points"].as_array().map(Vec::len), Some(1));
        assert!(approx(config["center"]["lat"].as_f64().unwrap(), 2.20));

        let config = merged_map_config(&route(Some(json!({"zoom": 11}))), &points, "/media/");
        assert_eq!(config["zoom"], 11);
        assert_eq!(config["show_route"], true);
    }

    #[test]
    fn test_marker_info_with_site() {
        let mut p = point(2, 2.19, -75.65);
        p.name = None;
        p.site_id = Some(Uuid::new_v4());
        p.site_name = Some("Catedral San Miguel Arcángel".to_string());
        p.site_slug = Some("catedral-san-miguel".to_string());
        p.site_category = Some("Iglesias".to_string());

        let marker = marker_info(&p, "/media/");
        assert_eq!(marker.name, "Catedral San Miguel Arcángel");
        let site = marker.site.unwrap();
        assert_eq!(site.category.as_deref(), Some("Iglesias"));
        assert_eq!(site.url.as_deref(), Some("/api/sites/catedral-san-miguel"));
    }

    #[test]
    fn test_validation_report() {
        let points = vec![
            point(0, 2.19, -75.65),
            point(1, 2.19, -75.65),
            point(2, 0.0, 0.0),
            point(3, 2.20, -75.66),
        ];
        let report = validation_report(&route(None), &points);

        assert!(report.points[0].valid);
        assert!(report.points[1].issues.contains(&PointIssue::DuplicateOfPrevious));
        assert_eq!(report.points[2].issues, vec![PointIssue::ZeroCoordinates]);
        assert_eq!(report.summary.total_points, 4);
        assert!(!report.summary.is_valid);
    }

    #[test]
    fn test_validation_report_flags_far_points() {
        let mut points: Vec<RoutePoint> = (0..10)
            .map(|i| point(i, 2.19 + f64::from(i) * 0.001, -75.65))
            .collect();
        points.push(point(10, 4.71, -74.07));

        let report = validation_report(&route(None), &points);
        assert!(report.points[0].valid);
        assert!(matches!(
            report.points[10].issues.as_slice(),
            [PointIssue::FarFromCenter { .. }]
        ));
        assert_eq!(report.summary.points_with_issues, 1);
    }

    #[test]
    fn test_haversine() {
        assert!(approx(haversine_km((2.19, -75.65), (2.19, -75.65)), 0.0));
        // Garzón - Neiva, unos 90 km en línea recta
        let distance = haversine_km((2.1975, -75.6514), (2.9273, -75.2819));
        assert!(distance > 85.0 && distance < 95.0);
    }

    #[test]
    fn test_parse_compare_slugs() {
        assert_eq!(parse_compare_slugs("a, b,a").unwrap(), vec!["a", "b"]);
        assert!(parse_compare_slugs("a").is_err());
        assert!(parse_compare_slugs("a,b,c,d,e,f,g").is_err());
    }

    #[test]
    fn test_compare_routes_assigns_palette() {
        let routes = vec![
            (route(None), vec![point(0, 2.10, -75.60)]),
            (route(None), vec![point(0, 2.30, -75.40), point(1, 2.40, -75.30)]),
        ];
        let comparison = compare_routes(&routes);
        assert_eq!(comparison.routes[0].color, COMPARISON_PALETTE[0]);
        assert_eq!(comparison.routes[1].color, COMPARISON_PALETTE[1]);
        assert_eq!(comparison.routes[1].point_count, 2);
        let bounds = comparison.bounds.unwrap();
        assert_eq!(bounds.north, 2.40);
        assert_eq!(bounds.west, -75.60);
    }
}
