use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::event::{
    validate_event_dates, CreateEventRequest, EventFilters, EventResponse, UpdateEventRequest,
};
use crate::repositories::event_repository::EventRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

const PAGE_SIZE: i64 = 9;

pub struct EventController {
    repository: EventRepository,
    media: String,
}

impl EventController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            repository: EventRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: EventFilters) -> AppResult<PaginatedResponse<EventResponse>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (events, total) = self.repository.list(&filters, page).await?;
        let now = Utc::now();

        Ok(PaginatedResponse::new(events, total, page).map(|event| EventResponse::from_event(event, &self.media, now)))
    }

    pub async fn detail(&self, slug: &str) -> AppResult<EventResponse> {
        let event = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Evento", slug))?;

        Ok(EventResponse::from_event(event, &self.media, Utc::now()))
    }

    // --- Administración ---

    pub async fn create(&self, request: CreateEventRequest) -> AppResult<ApiResponse<EventResponse>> {
        request.validate()?;
        validate_event_dates(request.starts_at, request.ends_at)?;

        let slug = slug_for("title", &request.title)?;
        if self.repository.slug_exists(&slug).await? {
            return Err(conflict_error("Evento", "slug", &slug));
        }

        let event = self.repository.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            EventResponse::from_event(event, &self.media, Utc::now()),
            "Evento creado exitosamente",
        ))
    }

    /// Las fechas resultantes de la actualización deben seguir ordenadas
    pub async fn update(&self, id: Uuid, request: UpdateEventRequest) -> AppResult<ApiResponse<EventResponse>> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Evento", &id.to_string()))?;
        validate_event_dates(
            request.starts_at.unwrap_or(current.starts_at),
            request.ends_at.unwrap_or(current.ends_at),
        )?;

        let event = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Evento", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            EventResponse::from_event(event, &self.media, Utc::now()),
            "Evento actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Evento", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Evento eliminado exitosamente"))
    }
}
