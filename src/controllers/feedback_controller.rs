//! Moderación de comentarios y calificaciones
//!
//! Todo lo enviado por visitantes entra sin aprobar; solo lo aprobado aquí
//! se muestra en las páginas públicas.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::{ApiResponse, BulkActionResponse, BulkIdsRequest, Page, PaginatedResponse};
use crate::models::feedback::{Comment, ModerationFilters, Rating};
use crate::repositories::feedback_repository::FeedbackRepository;
use crate::utils::errors::{bad_request_error, AppResult};

const PAGE_SIZE: i64 = 20;

/// Acción masiva de moderación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Unapprove,
    Delete,
}

impl ModerationAction {
    fn verb(&self) -> &'static str {
        match self {
            ModerationAction::Approve => "aprobados",
            ModerationAction::Unapprove => "desaprobados",
            ModerationAction::Delete => "eliminados",
        }
    }
}

fn require_ids(request: &BulkIdsRequest) -> AppResult<&[Uuid]> {
    if request.ids.is_empty() {
        return Err(bad_request_error("Debe seleccionar al menos un elemento"));
    }
    Ok(&request.ids)
}

pub struct FeedbackController {
    repository: FeedbackRepository,
}

impl FeedbackController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FeedbackRepository::new(pool),
        }
    }

    pub async fn comments(&self, filters: ModerationFilters) -> AppResult<PaginatedResponse<Comment>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (comments, total) = self.repository.list_comments(&filters, page).await?;
        Ok(PaginatedResponse::new(comments, total, page))
    }

    pub async fn ratings(&self, filters: ModerationFilters) -> AppResult<PaginatedResponse<Rating>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (ratings, total) = self.repository.list_ratings(&filters, page).await?;
        Ok(PaginatedResponse::new(ratings, total, page))
    }

    pub async fn moderate_comments(
        &self,
        request: BulkIdsRequest,
        action: ModerationAction,
    ) -> AppResult<ApiResponse<BulkActionResponse>> {
        let ids = require_ids(&request)?;
        let affected = match action {
            ModerationAction::Approve => self.repository.set_comments_approved(ids, true).await?,
            ModerationAction::Unapprove => self.repository.set_comments_approved(ids, false).await?,
            ModerationAction::Delete => self.repository.delete_comments(ids).await?,
        };

        info!("🛡️ {} comentarios {}", affected, action.verb());
        Ok(ApiResponse::success_with_message(
            BulkActionResponse { affected },
            format!("{} comentarios {}", affected, action.verb()),
        ))
    }

    pub async fn moderate_ratings(
        &self,
        request: BulkIdsRequest,
        action: ModerationAction,
    ) -> AppResult<ApiResponse<BulkActionResponse>> {
        let ids = require_ids(&request)?;
        let affected = match action {
            ModerationAction::Approve => self.repository.set_ratings_approved(ids, true).await?,
            ModerationAction::Unapprove => self.repository.set_ratings_approved(ids, false).await?,
            ModerationAction::Delete => self.repository.delete_ratings(ids).await?,
        };

        info!("🛡️ {} calificaciones {}", affected, action.verb());
        Ok(ApiResponse::success_with_message(
            BulkActionResponse { affected },
            format!("{} calificaciones {}", affected, action.verb()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    #[test]
    fn test_empty_selection_is_rejected() {
        let request = BulkIdsRequest { ids: Vec::new() };
        assert!(matches!(require_ids(&request), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_selection_is_passed_through() {
        let id = Uuid::new_v4();
        let request = BulkIdsRequest { ids: vec![id] };
        assert_eq!(require_ids(&request).unwrap(), &[id]);
    }
}
