use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::detail_dto::ActivityDetailResponse;
use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::activity::{ActivityFilters, ActivityResponse, CreateActivityRequest, UpdateActivityRequest};
use crate::repositories::activity_repository::ActivityRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};
use crate::utils::validation::validate_coordinate_patch;

const PAGE_SIZE: i64 = 12;
const RELATED_ACTIVITIES: i64 = 3;

pub struct ActivityController {
    repository: ActivityRepository,
    media: String,
}

impl ActivityController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            repository: ActivityRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: ActivityFilters) -> AppResult<PaginatedResponse<ActivityResponse>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (activities, total) = self.repository.list(&filters, page).await?;

        Ok(PaginatedResponse::new(activities, total, page)
            .map(|activity| ActivityResponse::from_activity(activity, &self.media)))
    }

    pub async fn detail(&self, slug: &str) -> AppResult<ActivityDetailResponse> {
        let activity = self
            .repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Actividad", slug))?;
        let related = self.repository.related(&activity, RELATED_ACTIVITIES).await?;

        Ok(ActivityDetailResponse {
            related_activities: related
                .into_iter()
                .map(|activity| ActivityResponse::from_activity(activity, &self.media))
                .collect(),
            activity: ActivityResponse::from_activity(activity, &self.media),
        })
    }

    // --- Administración ---

    pub async fn create(&self, request: CreateActivityRequest) -> AppResult<ApiResponse<ActivityResponse>> {
        request.validate()?;

        let slug = slug_for("name", &request.name)?;
        if self.repository.slug_exists(&slug).await? {
            return Err(conflict_error("Actividad", "slug", &slug));
        }

        let activity = self.repository.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            ActivityResponse::from_activity(activity, &self.media),
            "Actividad creada exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdateActivityRequest) -> AppResult<ApiResponse<ActivityResponse>> {
        request.validate()?;
        validate_coordinate_patch(request.latitude, request.longitude)?;

        let activity = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Actividad", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            ActivityResponse::from_activity(activity, &self.media),
            "Actividad actualizada exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Actividad", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Actividad eliminada exitosamente"))
    }
}
