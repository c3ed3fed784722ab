use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::contact::{ContactFilters, ContactMessage, CreateContactRequest};
use crate::repositories::contact_repository::ContactRepository;
use crate::utils::errors::{not_found_error, AppResult};

const PAGE_SIZE: i64 = 20;

pub struct ContactController {
    repository: ContactRepository,
}

impl ContactController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ContactRepository::new(pool),
        }
    }

    /// Formulario público de contacto
    pub async fn create(&self, request: CreateContactRequest) -> AppResult<ApiResponse<()>> {
        request.validate()?;

        let message = self.repository.create(&request).await?;
        info!("✉️ Nuevo mensaje de contacto {} ({})", message.id, message.subject);

        Ok(ApiResponse::success_with_message(
            (),
            "Mensaje enviado. Nos pondremos en contacto pronto",
        ))
    }

    // --- Administración ---

    pub async fn list(&self, filters: ContactFilters) -> AppResult<PaginatedResponse<ContactMessage>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (messages, total) = self.repository.list(&filters, page).await?;
        Ok(PaginatedResponse::new(messages, total, page))
    }

    pub async fn mark_read(&self, id: Uuid) -> AppResult<ApiResponse<ContactMessage>> {
        let message = self
            .repository
            .mark_read(id)
            .await?
            .ok_or_else(|| not_found_error("Mensaje", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(message, "Mensaje marcado como leído"))
    }
}
