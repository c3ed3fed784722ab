//! Modelo de Category
//!
//! Categorías de lugares turísticos (parques, museos, miradores...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::urls::category_url;

/// Category principal - mapea exactamente a la tabla categories
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una categoría
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

/// Request para actualizar una categoría (el slug no cambia)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Response de categoría con conteo de lugares
#[derive(Debug, Serialize, FromRow)]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub site_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub site_count: i64,
    pub url: String,
}

impl From<CategoryWithCount> for CategoryResponse {
    fn from(row: CategoryWithCount) -> Self {
        let url = category_url(&row.slug);
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            site_count: row.site_count,
            url,
        }
    }
}
