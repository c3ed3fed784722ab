use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::models::feedback::{
    Comment, CommentRow, CommentTarget, CreateCommentRequest, CreateRatingRequest, ModerationFilters, Rating,
};
use crate::utils::errors::AppResult;

/// Comentarios y calificaciones sujetos a moderación
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Comentarios ---

    /// Guarda el comentario sin aprobar
    pub async fn create_comment(&self, target: CommentTarget, request: &CreateCommentRequest) -> AppResult<Comment> {
        let (site_id, establishment_id, post_id) = target.columns();
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (id, author_name, email, content, approved, site_id, establishment_id, post_id)
            VALUES ($1, $2, $3, $4, FALSE, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.author_name.trim())
        .bind(request.email.trim())
        .bind(request.content.trim())
        .bind(site_id)
        .bind(establishment_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        info!("💬 Comentario recibido para {} (pendiente de moderación)", target);
        Comment::try_from(row)
    }

    /// Comentarios aprobados de una entidad, del más reciente al más antiguo
    pub async fn approved_comments(&self, target: CommentTarget) -> AppResult<Vec<Comment>> {
        let (site_id, establishment_id, post_id) = target.columns();
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT * FROM comments
            WHERE approved
              AND site_id IS NOT DISTINCT FROM $1
              AND establishment_id IS NOT DISTINCT FROM $2
              AND post_id IS NOT DISTINCT FROM $3
            ORDER BY created_at DESC
            "#,
        )
        .bind(site_id)
        .bind(establishment_id)
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Comment::try_from).collect()
    }

    /// Listado de moderación; `pendientes` restringe a los no aprobados
    pub async fn list_comments(&self, filters: &ModerationFilters, page: Page) -> AppResult<(Vec<Comment>, i64)> {
        let pending_only = filters.pendientes.unwrap_or(false);

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE (NOT $1 OR NOT approved)")
            .bind(pending_only)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT * FROM comments
            WHERE (NOT $1 OR NOT approved)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pending_only)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let comments = rows.into_iter().map(Comment::try_from).collect::<AppResult<Vec<_>>>()?;
        Ok((comments, total))
    }

    pub async fn set_comments_approved(&self, ids: &[Uuid], approved: bool) -> AppResult<u64> {
        let result = sqlx::query("UPDATE comments SET approved = $2, updated_at = NOW() WHERE id = ANY($1)")
            .bind(ids)
            .bind(approved)
            .execute(&self.pool)
            .await?;

        info!("✅ {} comentarios actualizados (aprobado = {})", result.rows_affected(), approved);
        Ok(result.rows_affected())
    }

    pub async fn delete_comments(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        info!("🗑️ {} comentarios eliminados", result.rows_affected());
        Ok(result.rows_affected())
    }

    // --- Calificaciones ---

    /// Guarda la calificación sin aprobar
    pub async fn create_rating(&self, establishment_id: Uuid, request: &CreateRatingRequest) -> AppResult<Rating> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (id, establishment_id, author_name, email, score, comment, approved)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(establishment_id)
        .bind(request.author_name.trim())
        .bind(request.email.trim())
        .bind(request.score)
        .bind(request.comment.as_deref().map(str::trim).unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        info!(
            "⭐ Calificación {} recibida para establecimiento {} (pendiente de moderación)",
            rating.score, establishment_id
        );
        Ok(rating)
    }

    /// Calificaciones aprobadas de un establecimiento
    pub async fn approved_ratings(&self, establishment_id: Uuid) -> AppResult<Vec<Rating>> {
        let ratings = sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE establishment_id = $1 AND approved ORDER BY created_at DESC",
        )
        .bind(establishment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings)
    }

    pub async fn list_ratings(&self, filters: &ModerationFilters, page: Page) -> AppResult<(Vec<Rating>, i64)> {
        let pending_only = filters.pendientes.unwrap_or(false);

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ratings WHERE (NOT $1 OR NOT approved)")
            .bind(pending_only)
            .fetch_one(&self.pool)
            .await?;

        let ratings = sqlx::query_as::<_, Rating>(
            r#"
            SELECT * FROM ratings
            WHERE (NOT $1 OR NOT approved)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(pending_only)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((ratings, total))
    }

    pub async fn set_ratings_approved(&self, ids: &[Uuid], approved: bool) -> AppResult<u64> {
        let result = sqlx::query("UPDATE ratings SET approved = $2, updated_at = NOW() WHERE id = ANY($1)")
            .bind(ids)
            .bind(approved)
            .execute(&self.pool)
            .await?;

        info!("✅ {} calificaciones actualizadas (aprobado = {})", result.rows_affected(), approved);
        Ok(result.rows_affected())
    }

    pub async fn delete_ratings(&self, ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        info!("🗑️ {} calificaciones eliminadas", result.rows_affected());
        Ok(result.rows_affected())
    }
}
