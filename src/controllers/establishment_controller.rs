use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::detail_dto::EstablishmentDetailResponse;
use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::establishment::{
    CreateEstablishmentRequest, Establishment, EstablishmentFilters, EstablishmentResponse,
    UpdateEstablishmentRequest,
};
use crate::models::feedback::{
    average_rating, CommentTarget, CreateCommentRequest, CreateRatingRequest, PublicComment, PublicRating,
};
use crate::repositories::establishment_repository::EstablishmentRepository;
use crate::repositories::feedback_repository::FeedbackRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};
use crate::utils::validation::{validate_coordinate_pair, validate_coordinate_patch};

const PAGE_SIZE: i64 = 12;

pub struct EstablishmentController {
    establishments: EstablishmentRepository,
    feedback: FeedbackRepository,
    media: String,
}

impl EstablishmentController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            establishments: EstablishmentRepository::new(pool.clone()),
            feedback: FeedbackRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: EstablishmentFilters) -> AppResult<PaginatedResponse<EstablishmentResponse>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (establishments, total) = self.establishments.list(&filters, page).await?;

        Ok(PaginatedResponse::new(establishments, total, page)
            .map(|e| EstablishmentResponse::from_establishment(e, &self.media)))
    }

    /// Ficha con calificaciones aprobadas, promedio y comentarios aprobados
    pub async fn detail(&self, slug: &str) -> AppResult<EstablishmentDetailResponse> {
        let establishment = self.find(slug).await?;

        let ratings = self.feedback.approved_ratings(establishment.id).await?;
        let comments = self
            .feedback
            .approved_comments(CommentTarget::Establishment(establishment.id))
            .await?;

        Ok(EstablishmentDetailResponse {
            average_rating: average_rating(&ratings),
            rating_count: ratings.len(),
            ratings: ratings.into_iter().map(PublicRating::from).collect(),
            comments: comments.into_iter().map(PublicComment::from).collect(),
            establishment: EstablishmentResponse::from_establishment(establishment, &self.media),
        })
    }

    /// La calificación queda pendiente de moderación y no cuenta en el promedio
    pub async fn rate(&self, slug: &str, request: CreateRatingRequest) -> AppResult<ApiResponse<PublicRating>> {
        request.validate()?;
        let establishment = self.find(slug).await?;

        let rating = self.feedback.create_rating(establishment.id, &request).await?;
        Ok(ApiResponse::success_with_message(
            PublicRating::from(rating),
            "Calificación recibida; será publicada cuando sea aprobada",
        ))
    }

    pub async fn comment(&self, slug: &str, request: CreateCommentRequest) -> AppResult<ApiResponse<PublicComment>> {
        request.validate()?;
        let establishment = self.find(slug).await?;

        let comment = self
            .feedback
            .create_comment(CommentTarget::Establishment(establishment.id), &request)
            .await?;
        Ok(ApiResponse::success_with_message(
            PublicComment::from(comment),
            "Comentario recibido; será publicado cuando sea aprobado",
        ))
    }

    async fn find(&self, slug: &str) -> AppResult<Establishment> {
        self.establishments
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Establecimiento", slug))
    }

    // --- Administración ---

    pub async fn create(&self, request: CreateEstablishmentRequest) -> AppResult<ApiResponse<EstablishmentResponse>> {
        request.validate()?;
        validate_coordinate_pair(request.latitude, request.longitude)?;

        let slug = slug_for("name", &request.name)?;
        if self.establishments.slug_exists(&slug).await? {
            return Err(conflict_error("Establecimiento", "slug", &slug));
        }

        let establishment = self.establishments.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            EstablishmentResponse::from_establishment(establishment, &self.media),
            "Establecimiento creado exitosamente",
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEstablishmentRequest,
    ) -> AppResult<ApiResponse<EstablishmentResponse>> {
        request.validate()?;
        validate_coordinate_patch(request.latitude, request.longitude)?;

        let establishment = self
            .establishments
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Establecimiento", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            EstablishmentResponse::from_establishment(establishment, &self.media),
            "Establecimiento actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.establishments.delete(id).await? {
            return Err(not_found_error("Establecimiento", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Establecimiento eliminado exitosamente"))
    }
}
