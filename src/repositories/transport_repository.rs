use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::choices::TransportKind;
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::models::transport::{CreateTransportRequest, Transport, TransportFilters, UpdateTransportRequest};
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::{like_pattern, normalize_term, truncate_chars};
use crate::utils::urls::{media_url, transport_url};

pub struct TransportRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &TransportFilters) {
    builder.push(" WHERE available");

    if let Some(kind) = filters.tipo {
        builder.push(" AND kind = ").push_bind(kind.as_str());
    }
    if let Some(term) = normalize_term(filters.q.as_deref()) {
        let pattern = like_pattern(&term);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR origin ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR destination ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl TransportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Medios de transporte disponibles, destacados primero
    pub async fn list(&self, filters: &TransportFilters, page: Page) -> AppResult<(Vec<Transport>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM transports");
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM transports");
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY featured DESC, name LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let transports = query.build_query_as::<Transport>().fetch_all(&self.pool).await?;
        Ok((transports, total))
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Transport>> {
        let transport = sqlx::query_as::<_, Transport>("SELECT * FROM transports WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(transport)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM transports WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn create(&self, slug: &str, request: &CreateTransportRequest) -> AppResult<Transport> {
        let transport = sqlx::query_as::<_, Transport>(
            r#"
            INSERT INTO transports (
                id, name, slug, kind, description, origin, destination, estimated_duration,
                approximate_cost, contact, phone, schedules, recommendations, image, featured, available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(slug)
        .bind(request.kind.as_str())
        .bind(&request.description)
        .bind(request.origin.trim())
        .bind(request.destination.trim())
        .bind(request.estimated_duration.trim())
        .bind(request.approximate_cost.as_deref().unwrap_or_default())
        .bind(request.contact.as_deref().unwrap_or_default())
        .bind(request.phone.as_deref().unwrap_or_default())
        .bind(request.schedules.as_deref().unwrap_or_default())
        .bind(request.recommendations.as_deref().unwrap_or_default())
        .bind(request.image.as_deref().unwrap_or_default())
        .bind(request.featured.unwrap_or(false))
        .bind(request.available.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        info!("🚌 Transporte creado: {} ({} → {})", transport.name, transport.origin, transport.destination);
        Ok(transport)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateTransportRequest) -> AppResult<Option<Transport>> {
        let transport = sqlx::query_as::<_, Transport>(
            r#"
            UPDATE transports
            SET name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                description = COALESCE($4, description),
                origin = COALESCE($5, origin),
                destination = COALESCE($6, destination),
                estimated_duration = COALESCE($7, estimated_duration),
                approximate_cost = COALESCE($8, approximate_cost),
                contact = COALESCE($9, contact),
                phone = COALESCE($10, phone),
                schedules = COALESCE($11, schedules),
                recommendations = COALESCE($12, recommendations),
                image = COALESCE($13, image),
                featured = COALESCE($14, featured),
                available = COALESCE($15, available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.kind.as_ref().map(TransportKind::as_str))
        .bind(request.description.as_deref())
        .bind(request.origin.as_deref().map(str::trim))
        .bind(request.destination.as_deref().map(str::trim))
        .bind(request.estimated_duration.as_deref().map(str::trim))
        .bind(request.approximate_cost.as_deref())
        .bind(request.contact.as_deref())
        .bind(request.phone.as_deref())
        .bind(request.schedules.as_deref())
        .bind(request.recommendations.as_deref())
        .bind(request.image.as_deref())
        .bind(request.featured)
        .bind(request.available)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transport)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM transports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SearchSource for TransportRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Transport
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let transports = sqlx::query_as::<_, Transport>(
            r#"
            SELECT * FROM transports
            WHERE available
              AND (name ILIKE $1 OR description ILIKE $1 OR origin ILIKE $1 OR destination ILIKE $1)
            ORDER BY featured DESC, name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(transports
            .into_iter()
            .map(|transport| SearchHit {
                kind: SearchKind::Transport,
                kind_label: SearchKind::Transport.label(),
                description: truncate_chars(&transport.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &transport.image),
                url: transport_url(&transport.slug),
                category: TransportKind::label_for(&transport.kind),
                name: transport.name,
            })
            .collect())
    }
}
