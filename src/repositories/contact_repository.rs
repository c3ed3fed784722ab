use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::models::contact::{ContactFilters, ContactMessage, CreateContactRequest};
use crate::utils::errors::AppResult;

pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &CreateContactRequest) -> AppResult<ContactMessage> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (id, name, email, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.email.trim())
        .bind(request.subject.trim())
        .bind(request.message.trim())
        .fetch_one(&self.pool)
        .await?;

        info!("📨 Mensaje de contacto recibido: {}", message.subject);
        Ok(message)
    }

    /// Bandeja de entrada; `no_leidos` restringe a los pendientes
    pub async fn list(&self, filters: &ContactFilters, page: Page) -> AppResult<(Vec<ContactMessage>, i64)> {
        let unread_only = filters.no_leidos.unwrap_or(false);

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_messages WHERE (NOT $1 OR NOT read)")
            .bind(unread_only)
            .fetch_one(&self.pool)
            .await?;

        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT * FROM contact_messages
            WHERE (NOT $1 OR NOT read)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(unread_only)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((messages, total))
    }

    pub async fn mark_read(&self, id: Uuid) -> AppResult<Option<ContactMessage>> {
        let message = sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET read = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }
}
