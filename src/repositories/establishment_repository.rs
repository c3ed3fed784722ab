use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::choices::{EstablishmentKind, PriceRange};
use crate::models::establishment::{
    CreateEstablishmentRequest, Establishment, EstablishmentFilters, UpdateEstablishmentRequest,
};
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::{like_pattern, normalize_term, split_list, truncate_chars};
use crate::utils::urls::{establishment_url, media_url};

pub struct EstablishmentRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &EstablishmentFilters) {
    builder.push(" WHERE TRUE");

    if let Some(kind) = filters.tipo {
        builder.push(" AND kind = ").push_bind(kind.as_str());
    }
    if let Some(range) = filters.rango_precios {
        builder.push(" AND price_range = ").push_bind(range.as_str());
    }
    // Cada servicio pedido debe aparecer en la lista del establecimiento
    if let Some(services) = filters.servicios.as_deref() {
        for service in split_list(services) {
            builder.push(" AND services ILIKE ").push_bind(like_pattern(&service));
        }
    }
    if let Some(term) = normalize_term(filters.q.as_deref()) {
        let pattern = like_pattern(&term);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR address ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl EstablishmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado filtrado y paginado (destacados primero)
    pub async fn list(&self, filters: &EstablishmentFilters, page: Page) -> AppResult<(Vec<Establishment>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM establishments");
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM establishments");
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY featured DESC, name LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let establishments = query.build_query_as::<Establishment>().fetch_all(&self.pool).await?;
        Ok((establishments, total))
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Establishment>> {
        let establishment = sqlx::query_as::<_, Establishment>("SELECT * FROM establishments WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(establishment)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM establishments WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Establecimientos con coordenadas, para el mapa general
    pub async fn with_coordinates(&self) -> AppResult<Vec<Establishment>> {
        let establishments = sqlx::query_as::<_, Establishment>(
            "SELECT * FROM establishments WHERE latitude IS NOT NULL AND longitude IS NOT NULL ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(establishments)
    }

    pub async fn create(&self, slug: &str, request: &CreateEstablishmentRequest) -> AppResult<Establishment> {
        let establishment = sqlx::query_as::<_, Establishment>(
            r#"
            INSERT INTO establishments (
                id, name, slug, kind, description, address, phone, email, website, image,
                latitude, longitude, featured, price_range, services, opening_hours
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
        .bind(request.address.trim())
        .bind(request.phone.trim())
        .bind(request.email.as_deref())
        .bind(request.website.as_deref())
        .bind(request.image.as_deref().unwrap_or_default())
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.featured.unwrap_or(false))
        .bind(request.price_range.unwrap_or(PriceRange::Moderado).as_str())
        .bind(request.services.as_deref().unwrap_or_default())
        .bind(request.opening_hours.as_deref().unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        info!("🏨 Establecimiento creado: {} ({})", establishment.name, establishment.kind);
        Ok(establishment)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateEstablishmentRequest) -> AppResult<Option<Establishment>> {
        let establishment = sqlx::query_as::<_, Establishment>(
            r#"
            UPDATE establishments
            SET name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                description = COALESCE($4, description),
                address = COALESCE($5, address),
                phone = COALESCE($6, phone),
                email = CASE WHEN $16 THEN $7 ELSE email END,
                website = CASE WHEN $17 THEN $8 ELSE website END,
                image = COALESCE($9, image),
                latitude = CASE WHEN $18 THEN $10 ELSE latitude END,
                longitude = CASE WHEN $18 THEN $11 ELSE longitude END,
                featured = COALESCE($12, featured),
                price_range = COALESCE($13, price_range),
                services = COALESCE($14, services),
                opening_hours = COALESCE($15, opening_hours),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.kind.as_ref().map(EstablishmentKind::as_str))
        .bind(request.description.as_deref())
        .bind(request.address.as_deref().map(str::trim))
        .bind(request.phone.as_deref().map(str::trim))
        .bind(request.email.as_ref().and_then(|v| v.as_deref()))
        .bind(request.website.as_ref().and_then(|v| v.as_deref()))
        .bind(request.image.as_deref())
        .bind(request.latitude.flatten())
        .bind(request.longitude.flatten())
        .bind(request.featured)
        .bind(request.price_range.as_ref().map(PriceRange::as_str))
        .bind(request.services.as_deref())
        .bind(request.opening_hours.as_deref())
        .bind(request.email.is_some())
        .bind(request.website.is_some())
        .bind(request.latitude.is_some())
        .fetch_optional(&self.pool)
        .await?;

        Ok(establishment)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM establishments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SearchSource for EstablishmentRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Establishment
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let establishments = sqlx::query_as::<_, Establishment>(
            r#"
            SELECT * FROM establishments
            WHERE name ILIKE $1 OR description ILIKE $1 OR address ILIKE $1 OR services ILIKE $1
            ORDER BY featured DESC, name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(establishments
            .into_iter()
            .map(|establishment| SearchHit {
                kind: SearchKind::Establishment,
                kind_label: SearchKind::Establishment.label(),
                description: truncate_chars(&establishment.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &establishment.image),
                url: establishment_url(&establishment.slug),
                category: EstablishmentKind::label_for(&establishment.kind),
                name: establishment.name,
            })
            .collect())
    }
}
