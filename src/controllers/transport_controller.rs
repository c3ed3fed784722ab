use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::transport::{CreateTransportRequest, TransportFilters, TransportResponse, UpdateTransportRequest};
use crate::repositories::transport_repository::TransportRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

const PAGE_SIZE: i64 = 12;

pub struct TransportController {
    repository: TransportRepository,
    media: String,
}

impl TransportController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            repository: TransportRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: TransportFilters) -> AppResult<PaginatedResponse<TransportResponse>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (transports, total) = self.repository.list(&filters, page).await?;

        Ok(PaginatedResponse::new(transports, total, page)
            .map(|transport| TransportResponse::from_transport(transport, &self.media)))
    }

    pub async fn detail(&self, slug: &str) -> AppResult<TransportResponse> {
        let transport = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Transporte", slug))?;

        Ok(TransportResponse::from_transport(transport, &self.media))
    }

    // --- Administración ---

    pub async fn create(&self, request: CreateTransportRequest) -> AppResult<ApiResponse<TransportResponse>> {
        request.validate()?;

        let slug = slug_for("name", &request.name)?;
        if self.repository.slug_exists(&slug).await? {
            return Err(conflict_error("Transporte", "slug", &slug));
        }

        let transport = self.repository.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            TransportResponse::from_transport(transport, &self.media),
            "Transporte creado exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdateTransportRequest) -> AppResult<ApiResponse<TransportResponse>> {
        request.validate()?;

        let transport = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Transporte", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            TransportResponse::from_transport(transport, &self.media),
            "Transporte actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Transporte", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Transporte eliminado exitosamente"))
    }
}
