use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::detail_dto::CraftDetailResponse;
use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::craft::{CraftFilters, CraftResponse, CreateCraftRequest, UpdateCraftRequest};
use crate::repositories::craft_repository::CraftRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

const PAGE_SIZE: i64 = 12;
const RELATED_CRAFTS: i64 = 4;

pub struct CraftController {
    repository: CraftRepository,
    media: String,
}

impl CraftController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            repository: CraftRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: CraftFilters) -> AppResult<PaginatedResponse<CraftResponse>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (crafts, total) = self.repository.list(&filters, page).await?;

        Ok(PaginatedResponse::new(crafts, total, page).map(|craft| CraftResponse::from_craft(craft, &self.media)))
    }

    pub async fn detail(&self, slug: &str) -> AppResult<CraftDetailResponse> {
        let craft = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Artesanía", slug))?;
        let related = self.repository.related(&craft, RELATED_CRAFTS).await?;

        Ok(CraftDetailResponse {
            related_crafts: related
                .into_iter()
                .map(|craft| CraftResponse::from_craft(craft, &self.media))
                .collect(),
            craft: CraftResponse::from_craft(craft, &self.media),
        })
    }

    // --- Administración ---

    pub async fn create(&self, request: CreateCraftRequest) -> AppResult<ApiResponse<CraftResponse>> {
        request.validate()?;

        let slug = slug_for("name", &request.name)?;
        if self.repository.slug_exists(&slug).await? {
            return Err(conflict_error("Artesanía", "slug", &slug));
        }

        let craft = self.repository.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            CraftResponse::from_craft(craft, &self.media),
            "Artesanía creada exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdateCraftRequest) -> AppResult<ApiResponse<CraftResponse>> {
        request.validate()?;

        let craft = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Artesanía", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            CraftResponse::from_craft(craft, &self.media),
            "Artesanía actualizada exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Artesanía", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Artesanía eliminada exitosamente"))
    }
}
