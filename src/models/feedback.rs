//! Modelos de Comment y Rating
//!
//! Contenido enviado por los visitantes. Todo queda sin aprobar hasta que un
//! administrador lo modera.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::AppError;

/// Entidad a la que pertenece un comentario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum CommentTarget {
    Site(Uuid),
    Establishment(Uuid),
    Post(Uuid),
}

impl CommentTarget {
    /// Columnas (site_id, establishment_id, post_id) para persistir el destino
    pub fn columns(&self) -> (Option<Uuid>, Option<Uuid>, Option<Uuid>) {
        match *self {
            CommentTarget::Site(id) => (Some(id), None, None),
            CommentTarget::Establishment(id) => (None, Some(id), None),
            CommentTarget::Post(id) => (None, None, Some(id)),
        }
    }
}

impl fmt::Display for CommentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentTarget::Site(id) => write!(f, "site:{}", id),
            CommentTarget::Establishment(id) => write!(f, "establishment:{}", id),
            CommentTarget::Post(id) => write!(f, "post:{}", id),
        }
    }
}

/// Fila de la tabla comments
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub author_name: String,
    pub email: String,
    pub content: String,
    pub approved: bool,
    pub site_id: Option<Uuid>,
    pub establishment_id: Option<Uuid>,
    pub post_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comentario con su destino ya resuelto
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_name: String,
    pub email: String,
    pub content: String,
    pub approved: bool,
    pub target: CommentTarget,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = AppError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let target = match (row.site_id, row.establishment_id, row.post_id) {
            (Some(id), None, None) => CommentTarget::Site(id),
            (None, Some(id), None) => CommentTarget::Establishment(id),
            (None, None, Some(id)) => CommentTarget::Post(id),
            _ => {
                return Err(AppError::Internal(format!(
                    "Comentario {} sin un destino único",
                    row.id
                )))
            }
        };

        Ok(Self {
            id: row.id,
            author_name: row.author_name,
            email: row.email,
            content: row.content,
            approved: row.approved,
            target,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Request público para enviar un comentario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 2, max = 100))]
    pub author_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 3, max = 2000))]
    pub content: String,
}

/// Comentario visible públicamente (sin email)
#[derive(Debug, Serialize)]
pub struct PublicComment {
    pub id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for PublicComment {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author_name: comment.author_name,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// Filtros del listado de moderación
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModerationFilters {
    /// Solo pendientes de aprobación
    pub pendientes: Option<bool>,
    pub page: Option<i64>,
}

/// Rating principal - mapea exactamente a la tabla ratings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub author_name: String,
    pub email: String,
    pub score: i16,
    pub comment: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request público para calificar un establecimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRatingRequest {
    #[validate(length(min = 2, max = 100))]
    pub author_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(range(min = 1, max = 5))]
    pub score: i16,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublicRating {
    pub id: Uuid,
    pub author_name: String,
    pub score: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for PublicRating {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            author_name: rating.author_name,
            score: rating.score,
            comment: rating.comment,
            created_at: rating.created_at,
        }
    }
}

/// Promedio de las calificaciones aprobadas, con un decimal; 0 si no hay
pub fn average_rating(ratings: &[Rating]) -> f64 {
    let approved: Vec<i16> = ratings.iter().filter(|r| r.approved).map(|r| r.score).collect();
    if approved.is_empty() {
        return 0.0;
    }

    let sum: i64 = approved.iter().map(|score| i64::from(*score)).sum();
    let average = sum as f64 / approved.len() as f64;
    (average * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(score: i16, approved: bool) -> Rating {
        Rating {
            id: Uuid::new_v4(),
            establishment_id: Uuid::nil(),
            author_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            score,
            comment: String::new(),
            approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn row(site: Option<Uuid>, establishment: Option<Uuid>, post: Option<Uuid>) -> CommentRow {
        CommentRow {
            id: Uuid::new_v4(),
            author_name: "Luis".to_string(),
            email: "luis@example.com".to_string(),
            content: "Muy bonito".to_string(),
            approved: false,
            site_id: site,
            establishment_id: establishment,
            post_id: post,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_ignores_unapproved() {
        let mut ratings = vec![rating(4, true), rating(5, true)];
        assert_eq!(average_rating(&ratings), 4.5);

        ratings.push(rating(1, false));
        assert_eq!(average_rating(&ratings), 4.5);

        ratings[2].approved = true;
        assert_eq!(average_rating(&ratings), 3.3);
    }

    #[test]
    fn test_average_without_approved_ratings_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[rating(5, false)]), 0.0);
    }

    #[test]
    fn test_comment_target_from_row() {
        let site = Uuid::new_v4();
        let comment = Comment::try_from(row(Some(site), None, None)).unwrap();
        assert_eq!(comment.target, CommentTarget::Site(site));
        assert_eq!(comment.target.columns(), (Some(site), None, None));

        let post = Uuid::new_v4();
        let comment = Comment::try_from(row(None, None, Some(post))).unwrap();
        assert_eq!(comment.target, CommentTarget::Post(post));
    }

    #[test]
    fn test_comment_row_without_single_target_is_rejected() {
        assert!(Comment::try_from(row(None, None, None)).is_err());
        assert!(Comment::try_from(row(Some(Uuid::new_v4()), Some(Uuid::new_v4()), None)).is_err());
    }

    #[test]
    fn test_rating_score_range() {
        let request = CreateRatingRequest {
            author_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            score: 6,
            comment: None,
        };
        assert!(request.validate().is_err());
    }
}
