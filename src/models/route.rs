//! Modelo de Route
//!
//! Rutas turísticas y sus puntos ordenados. Mapea a las tablas `routes`
//! y `route_points` (con LEFT JOIN al lugar turístico enlazado).

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::errors::field_error;
use crate::utils::patch::{self, nullable, nullable_text};
use crate::utils::text::truncate_chars;
use crate::utils::urls::{media_url, route_url};
use crate::utils::validation::{
    validate_hex_color, validate_latitude, validate_longitude, validate_map_config,
};

/// Longitud máxima de la descripción heredada del lugar en un marcador
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// Color usado cuando la dificultad no se reconoce
pub const DEFAULT_ROUTE_COLOR: &str = "#007bff";
pub const DEFAULT_ROUTE_BADGE: &str = "primary";

/// Dificultad de la ruta - mapea al ENUM route_difficulty
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "route_difficulty", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Facil,
    Media,
    Dificil,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Facil, Difficulty::Media, Difficulty::Dificil];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Facil => "facil",
            Difficulty::Media => "media",
            Difficulty::Dificil => "dificil",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Facil => "Fácil",
            Difficulty::Media => "Media",
            Difficulty::Dificil => "Difícil",
        }
    }

    /// Color hexadecimal de la línea de la ruta en el mapa
    pub fn color(&self) -> &'static str {
        match self {
            Difficulty::Facil => "#28a745",
            Difficulty::Media => "#ffc107",
            Difficulty::Dificil => "#dc3545",
        }
    }

    /// Clase de badge Bootstrap asociada
    pub fn badge(&self) -> &'static str {
        match self {
            Difficulty::Facil => "success",
            Difficulty::Media => "warning",
            Difficulty::Dificil => "danger",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facil" | "fácil" => Ok(Difficulty::Facil),
            "media" => Ok(Difficulty::Media),
            "dificil" | "difícil" => Ok(Difficulty::Dificil),
            other => Err(format!("Dificultad desconocida: {}", other)),
        }
    }
}

/// Color y badge para una etiqueta de dificultad arbitraria
pub fn difficulty_style(label: &str) -> (&'static str, &'static str) {
    match label.parse::<Difficulty>() {
        Ok(difficulty) => (difficulty.color(), difficulty.badge()),
        Err(_) => (DEFAULT_ROUTE_COLOR, DEFAULT_ROUTE_BADGE),
    }
}

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub estimated_duration: String,
    pub distance_km: Decimal,
    pub difficulty: Difficulty,
    pub recommendations: String,
    pub main_image: String,
    pub map_config: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ruta con el número de puntos, para listados
#[derive(Debug, Clone, FromRow)]
pub struct RouteWithCount {
    #[sqlx(flatten)]
    pub route: Route,
    pub point_count: i64,
}

/// Punto de una ruta con los datos del lugar enlazado (si existe)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoutePoint {
    pub id: Uuid,
    pub route_id: Uuid,
    pub site_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub point_order: i16,
    pub latitude: f64,
    pub longitude: f64,
    pub stay_time: Option<String>,
    pub marker_color: Option<String>,
    pub marker_icon: Option<String>,
    pub show_on_map: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub site_name: Option<String>,
    pub site_slug: Option<String>,
    pub site_description: Option<String>,
    pub site_address: Option<String>,
    pub site_image: Option<String>,
    pub site_category: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl RoutePoint {
    /// Nombre visible: propio, luego el del lugar, luego "Punto {orden}"
    pub fn display_name(&self) -> String {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.site_name.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Punto {}", self.point_order))
    }

    /// Descripción visible: propia, o la del lugar recortada
    pub fn display_description(&self) -> String {
        if let Some(own) = non_blank(self.description.as_deref()) {
            return own.to_string();
        }

        non_blank(self.site_description.as_deref())
            .map(|text| truncate_chars(text, DESCRIPTION_PREVIEW_CHARS))
            .unwrap_or_default()
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

/// Validar distancia en km: NUMERIC(5, 2), no negativa
fn validate_distance(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value >= Decimal::new(1000, 0) {
        return Err(field_error("distance", "La distancia debe estar entre 0 y 999.99 km"));
    }
    if value.scale() > 2 && value.round_dp(2) != *value {
        return Err(field_error("distance", "La distancia admite como máximo dos decimales"));
    }
    Ok(())
}

/// Request para crear una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 50))]
    pub estimated_duration: String,

    #[validate(custom = "validate_distance")]
    pub distance_km: Decimal,

    pub difficulty: Option<Difficulty>,
    pub recommendations: Option<String>,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    #[validate(custom = "validate_map_config")]
    pub map_config: Option<serde_json::Value>,
}

/// Request para actualizar una ruta
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub estimated_duration: Option<String>,

    #[validate(custom = "validate_distance")]
    pub distance_km: Option<Decimal>,

    pub difficulty: Option<Difficulty>,
    pub recommendations: Option<String>,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(custom = "validate_map_config")]
    pub map_config: Option<Option<serde_json::Value>>,
}

/// Filtros del listado público de rutas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFilters {
    pub dificultad: Option<String>,
}

/// Request para crear un punto de ruta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePointRequest {
    pub site_id: Option<Uuid>,

    #[validate(length(max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0, max = 32767))]
    pub point_order: i32,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[validate(length(max = 50))]
    pub stay_time: Option<String>,

    #[validate(custom = "validate_hex_color")]
    pub marker_color: Option<String>,

    #[validate(length(max = 100))]
    pub marker_icon: Option<String>,

    pub show_on_map: Option<bool>,
}

/// Request para actualizar un punto de ruta
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePointRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub site_id: Option<Option<Uuid>>,

    #[serde(default, deserialize_with = "nullable_text")]
    #[validate(length(max = 200))]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_text")]
    pub description: Option<Option<String>>,

    #[validate(range(min = 0, max = 32767))]
    pub point_order: Option<i32>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    #[serde(default, deserialize_with = "nullable_text")]
    #[validate(length(max = 50))]
    pub stay_time: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_text")]
    #[validate(custom = "validate_hex_color")]
    pub marker_color: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_text")]
    #[validate(length(max = 100))]
    pub marker_icon: Option<Option<String>>,

    pub show_on_map: Option<bool>,
}

/// Punto ya resuelto, listo para persistir
#[derive(Debug, Clone, PartialEq)]
pub struct PointValues {
    pub site_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub point_order: i16,
    pub latitude: f64,
    pub longitude: f64,
    pub stay_time: Option<String>,
    pub marker_color: Option<String>,
    pub marker_icon: Option<String>,
    pub show_on_map: bool,
}

impl PointValues {
    /// Comprobar las reglas que dependen de varios campos: nombre resoluble
    /// y coordenadas dentro de rango
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if non_blank(self.name.as_deref()).is_none() && self.site_id.is_none() {
            errors.add(
                "name",
                field_error("name_or_site", "El punto necesita un nombre o un lugar turístico asociado"),
            );
        }

        if let Err(error) = validate_latitude(self.latitude) {
            errors.add("latitude", error);
        }
        if let Err(error) = validate_longitude(self.longitude) {
            errors.add("longitude", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Coordenadas del punto: las propias si vienen completas, si no las del
/// lugar enlazado y, en último caso, cero
pub fn resolve_point_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
    site_coordinates: Option<(f64, f64)>,
) -> (f64, f64) {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => site_coordinates.unwrap_or((0.0, 0.0)),
    }
}

/// Indica si otro punto de la ruta ya ocupa ese orden
pub fn order_in_use(points: &[RoutePoint], order: i16, exclude: Option<Uuid>) -> bool {
    points
        .iter()
        .any(|point| point.point_order == order && Some(point.id) != exclude)
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl CreatePointRequest {
    pub fn into_values(self, site_coordinates: Option<(f64, f64)>) -> PointValues {
        let (latitude, longitude) =
            resolve_point_coordinates(self.latitude, self.longitude, site_coordinates);

        PointValues {
            site_id: self.site_id,
            name: clean(self.name),
            description: clean(self.description),
            point_order: self.point_order as i16,
            latitude,
            longitude,
            stay_time: clean(self.stay_time),
            marker_color: clean(self.marker_color),
            marker_icon: clean(self.marker_icon),
            show_on_map: self.show_on_map.unwrap_or(true),
        }
    }
}

impl UpdatePointRequest {
    /// Lugar enlazado tras aplicar el cambio; `null` lo desvincula
    pub fn resolved_site_id(&self, current: &RoutePoint) -> Option<Uuid> {
        patch::apply(self.site_id, &current.site_id)
    }

    /// Aplicar los cambios sobre un punto existente. Si cambia el lugar y no
    /// se envían coordenadas, se heredan las del nuevo lugar.
    pub fn apply_to(self, current: &RoutePoint, site_coordinates: Option<(f64, f64)>) -> PointValues {
        let site_id = self.resolved_site_id(current);
        let site_changed = site_id.is_some() && site_id != current.site_id;
        let (latitude, longitude) = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            (None, None) if site_changed => {
                resolve_point_coordinates(None, None, site_coordinates)
            }
            (lat, lng) => (lat.unwrap_or(current.latitude), lng.unwrap_or(current.longitude)),
        };

        PointValues {
            site_id,
            name: patch::apply(self.name, &current.name),
            description: patch::apply(self.description, &current.description),
            point_order: self
                .point_order
                .map(|order| order as i16)
                .unwrap_or(current.point_order),
            latitude,
            longitude,
            stay_time: patch::apply(self.stay_time, &current.stay_time),
            marker_color: patch::apply(self.marker_color, &current.marker_color),
            marker_icon: patch::apply(self.marker_icon, &current.marker_icon),
            show_on_map: self.show_on_map.unwrap_or(current.show_on_map),
        }
    }
}

/// Response resumida de una ruta para listados
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub estimated_duration: String,
    pub distance_km: Decimal,
    pub difficulty: Difficulty,
    pub difficulty_label: &'static str,
    pub difficulty_color: &'static str,
    pub difficulty_badge: &'static str,
    pub image_url: String,
    pub point_count: i64,
    pub url: String,
}

impl RouteSummary {
    pub fn from_route(route: Route, point_count: i64, media: &str) -> Self {
        Self {
            description: truncate_chars(&route.description, DESCRIPTION_PREVIEW_CHARS),
            difficulty_label: route.difficulty.label(),
            difficulty_color: route.difficulty.color(),
            difficulty_badge: route.difficulty.badge(),
            image_url: media_url(media, &route.main_image),
            url: route_url(&route.slug),
            id: route.id,
            name: route.name,
            slug: route.slug,
            estimated_duration: route.estimated_duration,
            distance_km: route.distance_km,
            difficulty: route.difficulty,
            point_count,
        }
    }
}

impl From<(RouteWithCount, &str)> for RouteSummary {
    fn from((row, media): (RouteWithCount, &str)) -> Self {
        RouteSummary::from_route(row.route, row.point_count, media)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn point(order: i16, lat: f64, lng: f64) -> RoutePoint {
        RoutePoint {
            id: Uuid::new_v4(),
            route_id: Uuid::nil(),
            site_id: None,
            name: Some(format!("Parada {}", order)),
            description: None,
            point_order: order,
            latitude: lat,
            longitude: lng,
            stay_time: None,
            marker_color: None,
            marker_icon: None,
            show_on_map: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            site_name: None,
            site_slug: None,
            site_description: None,
            site_address: None,
            site_image: None,
            site_category: None,
        }
    }

    fn create_request() -> CreatePointRequest {
        CreatePointRequest {
            site_id: None,
            name: Some("Mirador".to_string()),
            description: None,
            point_order: 1,
            latitude: Some(2.19),
            longitude: Some(-75.65),
            stay_time: None,
            marker_color: None,
            marker_icon: None,
            show_on_map: None,
        }
    }

    #[test]
    fn test_difficulty_style() {
        assert_eq!(difficulty_style("facil"), ("#28a745", "success"));
        assert_eq!(difficulty_style("media"), ("#ffc107", "warning"));
        assert_eq!(difficulty_style("dificil"), ("#dc3545", "danger"));
        assert_eq!(difficulty_style("extrema"), (DEFAULT_ROUTE_COLOR, DEFAULT_ROUTE_BADGE));
        assert_eq!("Difícil".parse::<Difficulty>(), Ok(Difficulty::Dificil));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut p = point(3, 2.0, -75.0);
        assert_eq!(p.display_name(), "Parada 3");

        p.name = None;
        p.site_name = Some("Catedral San Miguel".to_string());
        assert_eq!(p.display_name(), "Catedral San Miguel");

        p.site_name = None;
        assert_eq!(p.display_name(), "Punto 3");
    }

    #[test]
    fn test_display_description_truncates_site_text() {
        let mut p = point(0, 2.0, -75.0);
        p.site_description = Some("palabra ".repeat(40));
        let description = p.display_description();
        assert!(description.ends_with("..."));
        assert!(description.chars().count() <= DESCRIPTION_PREVIEW_CHARS + 3);

        p.description = Some("Descripción propia".to_string());
        assert_eq!(p.display_description(), "Descripción propia");
    }

    #[test]
    fn test_point_without_name_or_site_is_rejected() {
        let mut request = create_request();
        request.name = Some("   ".to_string());
        let values = request.into_values(None);
        let errors = values.check().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_point_with_site_only_is_accepted() {
        let mut request = create_request();
        request.name = None;
        request.site_id = Some(Uuid::new_v4());
        assert!(request.into_values(None).check().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let mut request = create_request();
        request.latitude = Some(91.0);
        assert!(request.validate().is_err());

        let mut request = create_request();
        request.longitude = Some(-180.5);
        assert!(request.validate().is_err());

        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_invalid_marker_color_is_rejected() {
        let mut request = create_request();
        request.marker_color = Some("rojo".to_string());
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("marker_color"));
    }

    #[test]
    fn test_coordinates_inherit_from_site() {
        assert_eq!(resolve_point_coordinates(Some(1.0), Some(2.0), Some((3.0, 4.0))), (1.0, 2.0));
        assert_eq!(resolve_point_coordinates(None, None, Some((3.0, 4.0))), (3.0, 4.0));
        assert_eq!(resolve_point_coordinates(Some(1.0), None, Some((3.0, 4.0))), (3.0, 4.0));
        assert_eq!(resolve_point_coordinates(None, None, None), (0.0, 0.0));

        let mut request = create_request();
        request.latitude = None;
        request.longitude = None;
        let values = request.into_values(Some((2.18, -75.66)));
        assert_eq!((values.latitude, values.longitude), (2.18, -75.66));
        assert!(values.show_on_map);
    }

    #[test]
    fn test_update_keeps_current_values() {
        let current = point(2, 2.1, -75.6);
        let update = UpdatePointRequest {
            site_id: None,
            name: None,
            description: Some(Some("Nueva".to_string())),
            point_order: None,
            latitude: None,
            longitude: None,
            stay_time: None,
            marker_color: None,
            marker_icon: None,
            show_on_map: Some(false),
        };
        let values = update.apply_to(&current, None);
        assert_eq!(values.name.as_deref(), Some("Parada 2"));
        assert_eq!(values.description.as_deref(), Some("Nueva"));
        assert_eq!(values.point_order, 2);
        assert_eq!((values.latitude, values.longitude), (2.1, -75.6));
        assert!(!values.show_on_map);
    }

    #[test]
    fn test_update_clears_nullable_fields() {
        let mut current = point(4, 2.1, -75.6);
        current.marker_color = Some("#ff0000".to_string());
        current.marker_icon = Some("flag".to_string());
        current.site_id = Some(Uuid::new_v4());

        let update: UpdatePointRequest = serde_json::from_value(serde_json::json!({
            "marker_color": "",
            "marker_icon": null,
            "site_id": null,
        }))
        .unwrap();
        assert!(update.validate().is_ok());

        let values = update.apply_to(&current, None);
        assert_eq!(values.marker_color, None);
        assert_eq!(values.marker_icon, None);
        assert_eq!(values.site_id, None);
        assert_eq!(values.name.as_deref(), Some("Parada 4"));
        assert_eq!((values.latitude, values.longitude), (2.1, -75.6));
        assert!(values.check().is_ok());
    }

    #[test]
    fn test_unlinking_site_from_unnamed_point_is_rejected() {
        let mut current = point(1, 2.1, -75.6);
        current.name = None;
        current.site_id = Some(Uuid::new_v4());

        let update: UpdatePointRequest = serde_json::from_value(serde_json::json!({"site_id": null})).unwrap();
        assert_eq!(update.resolved_site_id(&current), None);

        let errors = update.apply_to(&current, None).check().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_omitted_site_keeps_link() {
        let mut current = point(1, 2.1, -75.6);
        let site = Uuid::new_v4();
        current.site_id = Some(site);

        let update: UpdatePointRequest = serde_json::from_value(serde_json::json!({"stay_time": "30 min"})).unwrap();
        let values = update.apply_to(&current, Some((9.0, 9.0)));
        assert_eq!(values.site_id, Some(site));
        assert_eq!(values.stay_time.as_deref(), Some("30 min"));
        assert_eq!((values.latitude, values.longitude), (2.1, -75.6));
    }

    #[test]
    fn test_route_update_can_drop_map_config() {
        let update: UpdateRouteRequest = serde_json::from_value(serde_json::json!({"map_config": null})).unwrap();
        assert_eq!(update.map_config, Some(None));
        assert!(update.validate().is_ok());

        let update: UpdateRouteRequest = serde_json::from_value(serde_json::json!({"name": "Ruta del Café"})).unwrap();
        assert_eq!(update.map_config, None);

        let update: UpdateRouteRequest = serde_json::from_value(serde_json::json!({"map_config": [1, 2]})).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_order_in_use() {
        let existing = vec![point(0, 2.1, -75.6), point(1, 2.2, -75.5)];
        assert!(order_in_use(&existing, 1, None));
        assert!(!order_in_use(&existing, 2, None));
        assert!(!order_in_use(&existing, 1, Some(existing[1].id)));
        assert!(order_in_use(&existing, 0, Some(existing[1].id)));
    }

    #[test]
    fn test_distance_validation() {
        assert!(validate_distance(&Decimal::new(1250, 2)).is_ok());
        assert!(validate_distance(&Decimal::new(-1, 0)).is_err());
        assert!(validate_distance(&Decimal::new(100000, 2)).is_err());
        assert!(validate_distance(&Decimal::new(12345, 3)).is_err());
    }
}
