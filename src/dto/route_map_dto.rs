//! DTOs del mapa de rutas: centro, límites, marcadores, validación y
//! comparación de rutas

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::route::{difficulty_style, Difficulty, RouteSummary};

/// Filtro de dificultad pedido en el listado, con su estilo. Una
/// dificultad desconocida no filtra y se muestra con el estilo por defecto.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyFilter {
    pub value: String,
    pub applied: bool,
    pub color: &'static str,
    pub badge: &'static str,
}

impl DifficultyFilter {
    pub fn new(value: &str) -> Self {
        let (color, badge) = difficulty_style(value);
        Self {
            value: value.to_string(),
            applied: value.parse::<Difficulty>().is_ok(),
            color,
            badge,
        }
    }
}

/// Listado público de rutas
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteSummary>,
    pub difficulty: Option<DifficultyFilter>,
}

/// Coordenada central de un mapa
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
}

/// Caja envolvente de un conjunto de puntos
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat <= self.north && lat >= self.south && lng <= self.east && lng >= self.west
    }
}

/// Información de un marcador para el mapa
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerInfo {
    pub id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub order: i16,
    pub name: String,
    pub description: String,
    pub stay_time: Option<String>,
    pub marker_color: Option<String>,
    pub marker_icon: Option<String>,
    pub show_on_map: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<MarkerSite>,
}

/// Datos del lugar turístico enlazado a un punto
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSite {
    pub name: String,
    pub category: Option<String>,
    pub address: Option<String>,
    pub image_url: String,
    pub url: Option<String>,
}

/// Detalle de una ruta con todo lo necesario para pintarla
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    #[serde(flatten)]
    pub summary: RouteSummary,
    pub full_description: String,
    pub recommendations: String,
    pub center: MapCenter,
    pub bounds: Option<Bounds>,
    pub points: Vec<MarkerInfo>,
    pub map_config: serde_json::Value,
    pub similar_routes: Vec<RouteSummary>,
}

/// Coordenadas de una ruta (endpoint `/coordinates`)
#[derive(Debug, Serialize)]
pub struct RouteCoordinatesResponse {
    pub name: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub color: &'static str,
    pub center: MapCenter,
    pub bounds: Option<Bounds>,
    pub points: Vec<MarkerInfo>,
}

/// Trazado resumido de una ruta para el mapa general de rutas
#[derive(Debug, Serialize)]
pub struct RouteTrace {
    pub name: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub color: &'static str,
    pub url: String,
    pub center: MapCenter,
    pub coordinates: Vec<[f64; 2]>,
}

/// Problema detectado en las coordenadas de un punto
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointIssue {
    OutOfRange,
    ZeroCoordinates,
    DuplicateOfPrevious,
    FarFromCenter { distance_km: f64 },
}

impl PointIssue {
    pub fn message(&self) -> String {
        match self {
            PointIssue::OutOfRange => "Coordenadas fuera de rango".to_string(),
            PointIssue::ZeroCoordinates => "Coordenadas sin definir (0, 0)".to_string(),
            PointIssue::DuplicateOfPrevious => "Misma ubicación que el punto anterior".to_string(),
            PointIssue::FarFromCenter { distance_km } => {
                format!("A {:.1} km del centro de la ruta", distance_km)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PointReport {
    pub id: Uuid,
    pub order: i16,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub valid: bool,
    pub issues: Vec<PointIssue>,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    pub total_points: usize,
    pub valid_points: usize,
    pub points_with_issues: usize,
    pub is_valid: bool,
}

/// Informe de validación de coordenadas de una ruta
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub route: String,
    pub slug: String,
    pub center: MapCenter,
    pub points: Vec<PointReport>,
    pub summary: ValidationSummary,
}

/// Query de comparación: slugs separados por comas
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub slugs: String,
}

#[derive(Debug, Serialize)]
pub struct ComparedRoute {
    pub name: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub difficulty_label: &'static str,
    pub distance_km: Decimal,
    pub estimated_duration: String,
    pub point_count: usize,
    pub center: MapCenter,
    pub bounds: Option<Bounds>,
    pub coordinates: Vec<[f64; 2]>,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteComparison {
    pub routes: Vec<ComparedRoute>,
    pub bounds: Option<Bounds>,
}

/// Formato de exportación de una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Gpx,
    Kml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Gpx => "gpx",
            ExportFormat::Kml => "kml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Gpx => "application/gpx+xml",
            ExportFormat::Kml => "application/vnd.google-earth.kml+xml",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "gpx" => Ok(ExportFormat::Gpx),
            "kml" => Ok(ExportFormat::Kml),
            other => Err(format!("Formato de exportación no soportado: {}", other)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_filter_styles() {
        let filter = DifficultyFilter::new("dificil");
        assert!(filter.applied);
        assert_eq!((filter.color, filter.badge), ("#dc3545", "danger"));

        let filter = DifficultyFilter::new("extrema");
        assert!(!filter.applied);
        assert_eq!((filter.color, filter.badge), ("#007bff", "primary"));
        assert_eq!(filter.value, "extrema");
    }
}
