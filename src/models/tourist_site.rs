//! Modelo de TouristSite
//!
//! Lugares turísticos y su galería de imágenes. Mapea a las tablas
//! `tourist_sites` y `site_images`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::patch::nullable;
use crate::utils::urls::{media_url, site_url};

/// Lugar turístico con los datos de su categoría (JOIN con categories)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TouristSite {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_slug: String,
    pub description: String,
    pub address: String,
    pub main_image: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub featured: bool,
    pub opening_hours: String,
    pub entrance_cost: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TouristSite {
    /// Indica si el lugar puede mostrarse en un mapa
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Request para crear un lugar turístico
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSiteRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    pub category_id: Uuid,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub featured: Option<bool>,
    pub opening_hours: Option<String>,

    #[validate(length(max = 100))]
    pub entrance_cost: Option<String>,
}

/// Request para actualizar un lugar turístico
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSiteRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<Option<f64>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<Option<f64>>,

    pub featured: Option<bool>,
    pub opening_hours: Option<String>,

    #[validate(length(max = 100))]
    pub entrance_cost: Option<String>,
}

/// Filtros del listado público de lugares
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteFilters {
    pub categoria: Option<String>,
    pub q: Option<String>,
    pub destacados: Option<bool>,
    pub page: Option<i64>,
}

/// Response resumida para listados
#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub category_slug: String,
    pub address: String,
    pub image_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub featured: bool,
    pub url: String,
}

impl SiteSummary {
    pub fn from_site(site: TouristSite, media: &str) -> Self {
        Self {
            image_url: media_url(media, &site.main_image),
            url: site_url(&site.slug),
            id: site.id,
            name: site.name,
            slug: site.slug,
            category: site.category_name,
            category_slug: site.category_slug,
            address: site.address,
            latitude: site.latitude,
            longitude: site.longitude,
            featured: site.featured,
        }
    }
}

/// Response completa de un lugar
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category_id: Uuid,
    pub category: String,
    pub category_slug: String,
    pub description: String,
    pub address: String,
    pub image_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub has_coordinates: bool,
    pub featured: bool,
    pub opening_hours: String,
    pub entrance_cost: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteResponse {
    pub fn from_site(site: TouristSite, media: &str) -> Self {
        Self {
            has_coordinates: site.has_coordinates(),
            image_url: media_url(media, &site.main_image),
            url: site_url(&site.slug),
            id: site.id,
            name: site.name,
            slug: site.slug,
            category_id: site.category_id,
            category: site.category_name,
            category_slug: site.category_slug,
            description: site.description,
            address: site.address,
            latitude: site.latitude,
            longitude: site.longitude,
            featured: site.featured,
            opening_hours: site.opening_hours,
            entrance_cost: site.entrance_cost,
            created_at: site.created_at,
            updated_at: site.updated_at,
        }
    }
}

/// Imagen de la galería de un lugar
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteImage {
    pub id: Uuid,
    pub site_id: Uuid,
    pub image: String,
    pub title: String,
    pub is_cover: bool,
    pub display_order: i16,
    pub created_at: DateTime<Utc>,
}

/// Request para añadir una imagen a la galería de un lugar
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSiteImageRequest {
    #[validate(length(min = 1, max = 255))]
    pub image: String,

    #[validate(length(max = 100))]
    pub title: Option<String>,

    pub is_cover: Option<bool>,

    #[validate(range(min = 0, max = 32767))]
    pub display_order: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct SiteImageResponse {
    pub id: Uuid,
    pub image_url: String,
    pub title: String,
    pub is_cover: bool,
    pub display_order: i16,
}

impl SiteImageResponse {
    pub fn from_image(image: SiteImage, media: &str) -> Self {
        Self {
            image_url: media_url(media, &image.image),
            id: image.id,
            title: image.title,
            is_cover: image.is_cover,
            display_order: image.display_order,
        }
    }
}

/// Calcular los cambios de `is_cover` necesarios para que `cover_id` sea la
/// única portada del conjunto de imágenes de un lugar.
///
/// Devuelve `None` si la imagen no pertenece al conjunto. Solo se listan las
/// imágenes cuyo flag cambia.
pub fn cover_transition(images: &[SiteImage], cover_id: Uuid) -> Option<Vec<(Uuid, bool)>> {
    if !images.iter().any(|image| image.id == cover_id) {
        return None;
    }

    Some(
        images
            .iter()
            .filter_map(|image| {
                let should_be_cover = image.id == cover_id;
                (image.is_cover != should_be_cover).then_some((image.id, should_be_cover))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(site_id: Uuid, is_cover: bool) -> SiteImage {
        SiteImage {
            id: Uuid::new_v4(),
            site_id,
            image: "lugares/galerias/foto.jpg".to_string(),
            title: String::new(),
            is_cover,
            display_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cover_transition_moves_cover() {
        let site = Uuid::new_v4();
        let a = image(site, true);
        let b = image(site, false);
        let c = image(site, false);
        let images = vec![a.clone(), b.clone(), c.clone()];

        let changes = cover_transition(&images, b.id).unwrap();

        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&(a.id, false)));
        assert!(changes.contains(&(b.id, true)));
        assert!(!changes.iter().any(|(id, _)| *id == c.id));
    }

    #[test]
    fn test_cover_transition_is_noop_for_current_cover() {
        let site = Uuid::new_v4();
        let a = image(site, true);
        let b = image(site, false);
        let changes = cover_transition(&[a.clone(), b], a.id).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_cover_transition_rejects_foreign_image() {
        let site = Uuid::new_v4();
        let images = vec![image(site, true)];
        assert!(cover_transition(&images, Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_cover_transition_clears_duplicated_covers() {
        let site = Uuid::new_v4();
        let a = image(site, true);
        let b = image(site, true);
        let c = image(site, false);
        let changes = cover_transition(&[a.clone(), b.clone(), c.clone()], c.id).unwrap();
        assert_eq!(changes.len(), 3);
        assert!(changes.contains(&(c.id, true)));
    }

    #[test]
    fn test_site_summary_uses_placeholder() {
        let site = TouristSite {
            id: Uuid::new_v4(),
            name: "Parque Principal".to_string(),
            slug: "parque-principal".to_string(),
            category_id: Uuid::new_v4(),
            category_name: "Parques".to_string(),
            category_slug: "parques".to_string(),
            description: "Parque central".to_string(),
            address: "Carrera 11".to_string(),
            main_image: String::new(),
            latitude: None,
            longitude: None,
            featured: false,
            opening_hours: String::new(),
            entrance_cost: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(!site.has_coordinates());

        let summary = SiteSummary::from_site(site, "/media/");
        assert_eq!(summary.image_url, crate::utils::urls::PLACEHOLDER_IMAGE);
        assert_eq!(summary.url, "/api/sites/parque-principal");
    }
}
