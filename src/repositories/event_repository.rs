use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::event::{CreateEventRequest, Event, EventFilters, UpdateEventRequest};
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::truncate_chars;
use crate::utils::urls::{event_url, media_url};

pub struct EventRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &EventFilters) {
    builder.push(" WHERE TRUE");

    if let Some(from) = filters.fecha_desde {
        builder.push(" AND starts_at::date >= ").push_bind(from);
    }
    if let Some(until) = filters.fecha_hasta {
        builder.push(" AND ends_at::date <= ").push_bind(until);
    }
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Eventos por fecha de inicio, filtrados por rango de fechas
    pub async fn list(&self, filters: &EventFilters, page: Page) -> AppResult<(Vec<Event>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM events");
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM events");
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY starts_at, title LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let events = query.build_query_as::<Event>().fetch_all(&self.pool).await?;
        Ok((events, total))
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM events WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn create(&self, slug: &str, request: &CreateEventRequest) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                id, title, slug, description, starts_at, ends_at, venue, image,
                featured, organizer, contact, programme
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.title.trim())
        .bind(slug)
        .bind(&request.description)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.venue.trim())
        .bind(request.image.as_deref().unwrap_or_default())
        .bind(request.featured.unwrap_or(false))
        .bind(request.organizer.as_deref().unwrap_or_default())
        .bind(request.contact.as_deref().unwrap_or_default())
        .bind(request.programme.as_deref().unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        info!("📅 Evento creado: {} ({})", event.title, event.starts_at);
        Ok(event)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateEventRequest) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                starts_at = COALESCE($4, starts_at),
                ends_at = COALESCE($5, ends_at),
                venue = COALESCE($6, venue),
                image = COALESCE($7, image),
                featured = COALESCE($8, featured),
                organizer = COALESCE($9, organizer),
                contact = COALESCE($10, contact),
                programme = COALESCE($11, programme),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.title.as_deref().map(str::trim))
        .bind(request.description.as_deref())
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.venue.as_deref().map(str::trim))
        .bind(request.image.as_deref())
        .bind(request.featured)
        .bind(request.organizer.as_deref())
        .bind(request.contact.as_deref())
        .bind(request.programme.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SearchSource for EventRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Event
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE title ILIKE $1 OR description ILIKE $1 OR venue ILIKE $1 OR organizer ILIKE $1
            ORDER BY starts_at
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events
            .into_iter()
            .map(|event| SearchHit {
                kind: SearchKind::Event,
                kind_label: SearchKind::Event.label(),
                description: truncate_chars(&event.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &event.image),
                url: event_url(&event.slug),
                category: event.starts_at.format("%Y-%m-%d").to_string(),
                name: event.title,
            })
            .collect())
    }
}
