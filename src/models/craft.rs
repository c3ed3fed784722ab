//! Modelo de Craft
//!
//! Artesanías tradicionales y sus artesanos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::choices::CraftCategory;
use crate::utils::text::split_list;
use crate::utils::urls::{craft_url, media_url};

/// Craft principal - mapea exactamente a la tabla crafts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Craft {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub description: String,
    pub artisan: String,
    pub place_of_origin: String,
    pub technique: String,
    pub materials: String,
    pub reference_price: String,
    pub making_time: String,
    pub main_image: String,
    pub featured: bool,
    pub for_sale: bool,
    pub artisan_contact: String,
    pub history: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una artesanía
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCraftRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    pub category: CraftCategory,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 200))]
    pub artisan: String,

    #[validate(length(min = 1, max = 255))]
    pub place_of_origin: String,

    pub technique: Option<String>,

    #[validate(length(min = 1))]
    pub materials: String,

    #[validate(length(max = 100))]
    pub reference_price: Option<String>,

    #[validate(length(max = 100))]
    pub making_time: Option<String>,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    pub featured: Option<bool>,
    pub for_sale: Option<bool>,
    pub artisan_contact: Option<String>,
    pub history: Option<String>,
}

/// Request para actualizar una artesanía
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCraftRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    pub category: Option<CraftCategory>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub artisan: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub place_of_origin: Option<String>,

    pub technique: Option<String>,

    #[validate(length(min = 1))]
    pub materials: Option<String>,

    #[validate(length(max = 100))]
    pub reference_price: Option<String>,

    #[validate(length(max = 100))]
    pub making_time: Option<String>,

    #[validate(length(max = 255))]
    pub main_image: Option<String>,

    pub featured: Option<bool>,
    pub for_sale: Option<bool>,
    pub artisan_contact: Option<String>,
    pub history: Option<String>,
}

/// Filtros del listado público de artesanías
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CraftFilters {
    pub categoria: Option<CraftCategory>,
    pub artesano: Option<String>,
    pub q: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CraftResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub category_label: String,
    pub description: String,
    pub artisan: String,
    pub place_of_origin: String,
    pub technique: String,
    pub materials: Vec<String>,
    pub reference_price: String,
    pub making_time: String,
    pub image_url: String,
    pub featured: bool,
    pub for_sale: bool,
    pub artisan_contact: String,
    pub history: String,
    pub url: String,
}

impl CraftResponse {
    pub fn from_craft(craft: Craft, media: &str) -> Self {
        Self {
            category_label: CraftCategory::label_for(&craft.category),
            materials: split_list(&craft.materials),
            image_url: media_url(media, &craft.main_image),
            url: craft_url(&craft.slug),
            id: craft.id,
            name: craft.name,
            slug: craft.slug,
            category: craft.category,
            description: craft.description,
            artisan: craft.artisan,
            place_of_origin: craft.place_of_origin,
            technique: craft.technique,
            reference_price: craft.reference_price,
            making_time: craft.making_time,
            featured: craft.featured,
            for_sale: craft.for_sale,
            artisan_contact: craft.artisan_contact,
            history: craft.history,
        }
    }
}
