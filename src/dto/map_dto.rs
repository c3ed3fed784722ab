//! DTOs del mapa general del municipio

use serde::Serialize;

/// Tipo de marcador en el mapa general
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMarkerKind {
    Site,
    Establishment,
}

/// Marcador de un lugar o establecimiento con coordenadas
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub kind: MapMarkerKind,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: String,
    pub address: String,
    pub image_url: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GeneralMapResponse {
    pub center: super::route_map_dto::MapCenter,
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}
