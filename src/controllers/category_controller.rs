use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::ApiResponse;
use crate::models::category::{Category, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::repositories::category_repository::CategoryRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

pub struct CategoryController {
    repository: CategoryRepository,
}

impl CategoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CategoryRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<CategoryResponse>> {
        let categories = self.repository.list_with_counts().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn create(&self, request: CreateCategoryRequest) -> AppResult<ApiResponse<Category>> {
        request.validate()?;

        let slug = slug_for("name", &request.name)?;
        if self.repository.slug_exists(&slug).await? {
            return Err(conflict_error("Categoría", "slug", &slug));
        }

        let category = self.repository.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(category, "Categoría creada exitosamente"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateCategoryRequest) -> AppResult<ApiResponse<Category>> {
        request.validate()?;

        let category = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Categoría", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(category, "Categoría actualizada exitosamente"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Categoría", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Categoría eliminada exitosamente"))
    }
}
