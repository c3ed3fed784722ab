use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::{ApiResponse, BulkActionResponse, BulkIdsRequest, Page, PaginatedResponse};
use crate::models::photo::{CreatePhotoRequest, PhotoFilters, PhotoResponse, UpdatePhotoRequest};
use crate::repositories::photo_repository::PhotoRepository;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppResult};

const PAGE_SIZE: i64 = 20;

pub struct PhotoController {
    repository: PhotoRepository,
    media: String,
}

impl PhotoController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            repository: PhotoRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: PhotoFilters) -> AppResult<PaginatedResponse<PhotoResponse>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (photos, total) = self.repository.list(&filters, page).await?;

        Ok(PaginatedResponse::new(photos, total, page).map(|photo| PhotoResponse::from_photo(photo, &self.media)))
    }

    pub async fn detail(&self, slug: &str) -> AppResult<PhotoResponse> {
        let photo = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Fotografía", slug))?;

        Ok(PhotoResponse::from_photo(photo, &self.media))
    }

    // --- Administración ---

    pub async fn create(&self, request: CreatePhotoRequest) -> AppResult<ApiResponse<PhotoResponse>> {
        request.validate()?;

        let slug = slug_for("title", &request.title)?;
        if self.repository.slug_exists(&slug).await? {
            return Err(conflict_error("Fotografía", "slug", &slug));
        }

        let photo = self.repository.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            PhotoResponse::from_photo(photo, &self.media),
            "Fotografía creada exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdatePhotoRequest) -> AppResult<ApiResponse<PhotoResponse>> {
        request.validate()?;

        let photo = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Fotografía", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            PhotoResponse::from_photo(photo, &self.media),
            "Fotografía actualizada exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Fotografía", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Fotografía eliminada exitosamente"))
    }

    /// Destacar o quitar de destacadas varias fotografías
    pub async fn set_featured(
        &self,
        request: BulkIdsRequest,
        featured: bool,
    ) -> AppResult<ApiResponse<BulkActionResponse>> {
        if request.ids.is_empty() {
            return Err(bad_request_error("Debe indicar al menos una fotografía"));
        }

        let affected = self.repository.set_featured(&request.ids, featured).await?;
        let message = if featured {
            format!("{} fotografías marcadas como destacadas", affected)
        } else {
            format!("{} fotografías desmarcadas como destacadas", affected)
        };
        Ok(ApiResponse::success_with_message(BulkActionResponse { affected }, message))
    }
}
