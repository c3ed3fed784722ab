use sqlx::PgPool;
use uuid::Uuid;

use crate::models::category::{Category, CategoryWithCount, CreateCategoryRequest, UpdateCategoryRequest};
use crate::utils::errors::AppResult;

pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Categorías con el número de lugares de cada una
    pub async fn list_with_counts(&self) -> AppResult<Vec<CategoryWithCount>> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.id, c.name, c.slug, c.description, COUNT(s.id) AS site_count
            FROM categories c
            LEFT JOIN tourist_sites s ON s.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn create(&self, slug: &str, request: &CreateCategoryRequest) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, slug, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(slug)
        .bind(request.description.as_deref().unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateCategoryRequest) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.description.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Elimina la categoría y, en cascada, sus lugares
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
