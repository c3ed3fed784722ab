//! Modelo de Photo
//!
//! Galería fotográfica del municipio, opcionalmente asociada a un lugar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::patch::nullable;
use crate::utils::urls::{media_url, photo_url, site_url};

/// Photo principal con el nombre del lugar asociado (LEFT JOIN)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub site_id: Option<Uuid>,
    pub photographer: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub site_name: Option<String>,
    pub site_slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePhotoRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub image: String,

    pub site_id: Option<Uuid>,

    #[validate(length(max = 200))]
    pub photographer: Option<String>,

    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePhotoRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub site_id: Option<Option<Uuid>>,

    #[validate(length(max = 200))]
    pub photographer: Option<String>,

    pub featured: Option<bool>,
}

/// Filtros de la galería: solo destacadas y/o por slug de lugar
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoFilters {
    pub destacadas: Option<bool>,
    pub lugar: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
    pub photographer: String,
    pub featured: bool,
    pub site_name: Option<String>,
    pub site_url: Option<String>,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl PhotoResponse {
    pub fn from_photo(photo: Photo, media: &str) -> Self {
        Self {
            image_url: media_url(media, &photo.image),
            site_url: photo.site_slug.as_deref().map(site_url),
            url: photo_url(&photo.slug),
            id: photo.id,
            title: photo.title,
            slug: photo.slug,
            description: photo.description,
            photographer: photo.photographer,
            featured: photo.featured,
            site_name: photo.site_name,
            created_at: photo.created_at,
        }
    }
}
