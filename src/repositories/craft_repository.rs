use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::choices::CraftCategory;
use crate::models::craft::{Craft, CraftFilters, CreateCraftRequest, UpdateCraftRequest};
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::{like_pattern, normalize_term, truncate_chars};
use crate::utils::urls::{craft_url, media_url};

pub struct CraftRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &CraftFilters) {
    builder.push(" WHERE TRUE");

    if let Some(category) = filters.categoria {
        builder.push(" AND category = ").push_bind(category.as_str());
    }
    if let Some(artisan) = normalize_term(filters.artesano.as_deref()) {
        builder.push(" AND artisan ILIKE ").push_bind(like_pattern(&artisan));
    }
    if let Some(term) = normalize_term(filters.q.as_deref()) {
        let pattern = like_pattern(&term);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR materials ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl CraftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filters: &CraftFilters, page: Page) -> AppResult<(Vec<Craft>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM crafts");
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM crafts");
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY featured DESC, name LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let crafts = query.build_query_as::<Craft>().fetch_all(&self.pool).await?;
        Ok((crafts, total))
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Craft>> {
        let craft = sqlx::query_as::<_, Craft>("SELECT * FROM crafts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(craft)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM crafts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Otras piezas de la misma categoría
    pub async fn related(&self, craft: &Craft, limit: i64) -> AppResult<Vec<Craft>> {
        let crafts = sqlx::query_as::<_, Craft>(
            "SELECT * FROM crafts WHERE category = $1 AND id <> $2 ORDER BY featured DESC, name LIMIT $3",
        )
        .bind(&craft.category)
        .bind(craft.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(crafts)
    }

    pub async fn create(&self, slug: &str, request: &CreateCraftRequest) -> AppResult<Craft> {
        let craft = sqlx::query_as::<_, Craft>(
            r#"
            INSERT INTO crafts (
                id, name, slug, category, description, artisan, place_of_origin, technique,
                materials, reference_price, making_time, main_image, featured, for_sale,
                artisan_contact, history
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(slug)
        .bind(request.category.as_str())
        .bind(&request.description)
        .bind(request.artisan.trim())
        .bind(request.place_of_origin.trim())
        .bind(request.technique.as_deref().unwrap_or_default())
        .bind(&request.materials)
        .bind(request.reference_price.as_deref().unwrap_or_default())
        .bind(request.making_time.as_deref().unwrap_or_default())
        .bind(request.main_image.as_deref().unwrap_or_default())
        .bind(request.featured.unwrap_or(false))
        .bind(request.for_sale.unwrap_or(true))
        .bind(request.artisan_contact.as_deref().unwrap_or_default())
        .bind(request.history.as_deref().unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        info!("🏺 Artesanía creada: {} de {}", craft.name, craft.artisan);
        Ok(craft)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateCraftRequest) -> AppResult<Option<Craft>> {
        let craft = sqlx::query_as::<_, Craft>(
            r#"
            UPDATE crafts
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                artisan = COALESCE($5, artisan),
                place_of_origin = COALESCE($6, place_of_origin),
                technique = COALESCE($7, technique),
                materials = COALESCE($8, materials),
                reference_price = COALESCE($9, reference_price),
                making_time = COALESCE($10, making_time),
                main_image = COALESCE($11, main_image),
                featured = COALESCE($12, featured),
                for_sale = COALESCE($13, for_sale),
                artisan_contact = COALESCE($14, artisan_contact),
                history = COALESCE($15, history),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.category.as_ref().map(CraftCategory::as_str))
        .bind(request.description.as_deref())
        .bind(request.artisan.as_deref().map(str::trim))
        .bind(request.place_of_origin.as_deref().map(str::trim))
        .bind(request.technique.as_deref())
        .bind(request.materials.as_deref())
        .bind(request.reference_price.as_deref())
        .bind(request.making_time.as_deref())
        .bind(request.main_image.as_deref())
        .bind(request.featured)
        .bind(request.for_sale)
        .bind(request.artisan_contact.as_deref())
        .bind(request.history.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(craft)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM crafts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SearchSource for CraftRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Craft
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let crafts = sqlx::query_as::<_, Craft>(
            r#"
            SELECT * FROM crafts
            WHERE name ILIKE $1 OR description ILIKE $1 OR artisan ILIKE $1 OR materials ILIKE $1
            ORDER BY featured DESC, name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(crafts
            .into_iter()
            .map(|craft| SearchHit {
                kind: SearchKind::Craft,
                kind_label: SearchKind::Craft.label(),
                description: truncate_chars(&craft.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &craft.main_image),
                url: craft_url(&craft.slug),
                category: CraftCategory::label_for(&craft.category),
                name: craft.name,
            })
            .collect())
    }
}
