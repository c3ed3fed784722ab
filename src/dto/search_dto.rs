//! DTOs de la búsqueda global

use serde::{Deserialize, Serialize};

/// Tipo de contenido de un resultado de búsqueda, en el orden en que se
/// presentan los resultados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Site,
    Establishment,
    Event,
    Route,
    Transport,
    Craft,
    Activity,
    Photo,
    Post,
}

impl SearchKind {
    pub const ORDER: [SearchKind; 9] = [
        SearchKind::Site,
        SearchKind::Establishment,
        SearchKind::Event,
        SearchKind::Route,
        SearchKind::Transport,
        SearchKind::Craft,
        SearchKind::Activity,
        SearchKind::Photo,
        SearchKind::Post,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Site => "Lugar turístico",
            SearchKind::Establishment => "Establecimiento",
            SearchKind::Event => "Evento",
            SearchKind::Route => "Ruta turística",
            SearchKind::Transport => "Transporte",
            SearchKind::Craft => "Artesanía",
            SearchKind::Activity => "Actividad física",
            SearchKind::Photo => "Fotografía",
            SearchKind::Post => "Blog",
        }
    }
}

/// Un resultado de búsqueda, etiquetado por tipo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub kind: SearchKind,
    pub kind_label: &'static str,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub url: String,
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub results: Vec<SearchHit>,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, results: Vec<SearchHit>) -> Self {
        Self {
            query: query.into(),
            total: results.len(),
            results,
        }
    }
}
