//! Búsqueda global
//!
//! Cada tipo de contenido expone una fuente de búsqueda; el servicio las
//! ejecuta en paralelo y concatena los resultados en un orden fijo.

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, info};

use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::utils::errors::AppResult;
use crate::utils::text::{like_pattern, normalize_term};

/// Máximo de resultados por tipo en la búsqueda rápida
pub const QUICK_SEARCH_LIMIT: i64 = 5;

/// Longitud mínima del término en la búsqueda rápida
pub const QUICK_SEARCH_MIN_CHARS: usize = 2;

/// Fuente de resultados de un tipo de contenido
#[async_trait]
pub trait SearchSource: Send + Sync {
    fn kind(&self) -> SearchKind;

    /// Buscar con un patrón ILIKE ya escapado (`%término%`)
    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>>;
}

pub struct SearchService {
    sources: Vec<Box<dyn SearchSource>>,
    media_url: String,
}

impl SearchService {
    /// Las fuentes se ordenan según `SearchKind::ORDER`
    pub fn new(mut sources: Vec<Box<dyn SearchSource>>, media_url: impl Into<String>) -> Self {
        sources.sort_by_key(|source| {
            SearchKind::ORDER
                .iter()
                .position(|kind| *kind == source.kind())
                .unwrap_or(SearchKind::ORDER.len())
        });

        Self {
            sources,
            media_url: media_url.into(),
        }
    }

    /// Búsqueda completa; término vacío devuelve una lista vacía
    pub async fn search(&self, query: Option<&str>) -> AppResult<Vec<SearchHit>> {
        let Some(term) = normalize_term(query) else {
            return Ok(Vec::new());
        };

        info!("🔍 Búsqueda global: '{}'", term);
        self.run(&term, None).await
    }

    /// Búsqueda rápida: al menos dos caracteres y como mucho cinco por tipo
    pub async fn quick_search(&self, query: Option<&str>) -> AppResult<Vec<SearchHit>> {
        let Some(term) = normalize_term(query) else {
            return Ok(Vec::new());
        };
        if term.chars().count() < QUICK_SEARCH_MIN_CHARS {
            return Ok(Vec::new());
        }

        debug!("🔍 Búsqueda rápida: '{}'", term);
        self.run(&term, Some(QUICK_SEARCH_LIMIT)).await
    }

    async fn run(&self, term: &str, limit: Option<i64>) -> AppResult<Vec<SearchHit>> {
        let pattern = like_pattern(term);
        let per_source = try_join_all(
            self.sources
                .iter()
                .map(|source| source.search(&pattern, limit, &self.media_url)),
        )
        .await?;

        let hits: Vec<SearchHit> = per_source.into_iter().flatten().collect();
        debug!("✅ {} resultados para '{}'", hits.len(), term);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fuente en memoria que imita el filtro ILIKE sobre nombre y descripción
    struct MemorySource {
        kind: SearchKind,
        items: Vec<(&'static str, &'static str)>,
    }

    #[async_trait]
    impl SearchSource for MemorySource {
        fn kind(&self) -> SearchKind {
            self.kind
        }

        async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
            let needle = pattern.trim_matches('%').to_lowercase();
            let hits = self
                .items
                .iter()
                .filter(|(name, description)| {
                    name.to_lowercase().contains(&needle) || description.to_lowercase().contains(&needle)
                })
                .take(limit.map(|l| l as usize).unwrap_or(usize::MAX))
                .map(|(name, description)| SearchHit {
                    kind: self.kind,
                    kind_label: self.kind.label(),
                    name: name.to_string(),
                    description: description.to_string(),
                    image_url: format!("{}placeholder.jpg", media),
                    url: format!("/api/{:?}/{}", self.kind, name),
                    category: String::new(),
                })
                .collect();
            Ok(hits)
        }
    }

    fn service() -> SearchService {
        let sources: Vec<Box<dyn SearchSource>> = vec![
            Box::new(MemorySource {
                kind: SearchKind::Post,
                items: vec![("Un día en el Parque Principal", "Crónica")],
            }),
            Box::new(MemorySource {
                kind: SearchKind::Site,
                items: vec![
                    ("Parque Principal", "Centro de Garzón"),
                    ("Catedral", "Frente al parque"),
                    ("Estrecho del Magdalena", "Río"),
                ],
            }),
            Box::new(MemorySource {
                kind: SearchKind::Event,
                items: vec![("Festival", "Conciertos en el PARQUE")],
            }),
            Box::new(MemorySource {
                kind: SearchKind::Craft,
                items: vec![("Sombrero", "Fibra de palma")],
            }),
        ];
        SearchService::new(sources, "/media/")
    }

    #[tokio::test]
    async fn test_search_tags_results_in_fixed_order() {
        let hits = service().search(Some("parque")).await.unwrap();

        let kinds: Vec<SearchKind> = hits.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![SearchKind::Site, SearchKind::Site, SearchKind::Event, SearchKind::Post]
        );
        assert!(hits.iter().all(|h| h.kind_label == h.kind.label()));
        assert!(!hits.iter().any(|h| h.kind == SearchKind::Craft));
    }

    #[tokio::test]
    async fn test_blank_query_returns_nothing() {
        assert!(service().search(Some("   ")).await.unwrap().is_empty());
        assert!(service().search(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quick_search_limits() {
        assert!(service().quick_search(Some("p")).await.unwrap().is_empty());

        let sources: Vec<Box<dyn SearchSource>> = vec![Box::new(MemorySource {
            kind: SearchKind::Photo,
            items: vec![("Río 1", ""), ("Río 2", ""), ("Río 3", ""), ("Río 4", ""), ("Río 5", ""), ("Río 6", "")],
        })];
        let service = SearchService::new(sources, "/media/");
        assert_eq!(service.quick_search(Some("río")).await.unwrap().len(), 5);
        assert_eq!(service.search(Some("río")).await.unwrap().len(), 6);
    }
}
