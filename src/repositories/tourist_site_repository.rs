use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::models::tourist_site::{
    cover_transition, CreateSiteImageRequest, CreateSiteRequest, SiteFilters, SiteImage, TouristSite,
    UpdateSiteRequest,
};
use crate::services::search::SearchSource;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::text::{like_pattern, normalize_term, truncate_chars};
use crate::utils::urls::{media_url, site_url};

const SITE_SELECT: &str = r#"
    SELECT s.id, s.name, s.slug, s.category_id, c.name AS category_name, c.slug AS category_slug,
           s.description, s.address, s.main_image, s.latitude, s.longitude, s.featured,
           s.opening_hours, s.entrance_cost, s.created_at, s.updated_at
    FROM tourist_sites s
    JOIN categories c ON c.id = s.category_id
"#;

pub struct TouristSiteRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &SiteFilters) {
    builder.push(" WHERE TRUE");

    if let Some(category) = normalize_term(filters.categoria.as_deref()) {
        builder.push(" AND c.slug = ").push_bind(category);
    }
    if let Some(term) = normalize_term(filters.q.as_deref()) {
        let pattern = like_pattern(&term);
        builder
            .push(" AND (s.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR s.description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR s.address ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if filters.destacados == Some(true) {
        builder.push(" AND s.featured");
    }
}

impl TouristSiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listado filtrado y paginado (destacados primero, luego por nombre)
    pub async fn list(&self, filters: &SiteFilters, page: Page) -> AppResult<(Vec<TouristSite>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM tourist_sites s JOIN categories c ON c.id = s.category_id",
        );
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new(SITE_SELECT);
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY s.featured DESC, s.name LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let sites = query.build_query_as::<TouristSite>().fetch_all(&self.pool).await?;
        Ok((sites, total))
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<TouristSite>> {
        let site = sqlx::query_as::<_, TouristSite>(&format!("{} WHERE s.slug = $1", SITE_SELECT))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(site)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TouristSite>> {
        let site = sqlx::query_as::<_, TouristSite>(&format!("{} WHERE s.id = $1", SITE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(site)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tourist_sites WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Lugares de la misma categoría, excluyendo el actual
    pub async fn related(&self, site: &TouristSite, limit: i64) -> AppResult<Vec<TouristSite>> {
        let sites = sqlx::query_as::<_, TouristSite>(&format!(
            "{} WHERE s.category_id = $1 AND s.id <> $2 ORDER BY s.featured DESC, s.name LIMIT $3",
            SITE_SELECT
        ))
        .bind(site.category_id)
        .bind(site.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sites)
    }

    /// Lugares con coordenadas, para el mapa general
    pub async fn with_coordinates(&self) -> AppResult<Vec<TouristSite>> {
        let sites = sqlx::query_as::<_, TouristSite>(&format!(
            "{} WHERE s.latitude IS NOT NULL AND s.longitude IS NOT NULL ORDER BY s.name",
            SITE_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sites)
    }

    pub async fn create(&self, slug: &str, request: &CreateSiteRequest) -> AppResult<TouristSite> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO tourist_sites (
                id, name, slug, category_id, description, address, main_image,
                latitude, longitude, featured, opening_hours, entrance_cost
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(id)
        .bind(request.name.trim())
        .bind(slug)
        .bind(request.category_id)
        .bind(&request.description)
        .bind(request.address.trim())
        .bind(request.main_image.as_deref().unwrap_or_default())
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.featured.unwrap_or(false))
        .bind(request.opening_hours.as_deref().unwrap_or_default())
        .bind(request.entrance_cost.as_deref().unwrap_or_default())
        .execute(&self.pool)
        .await?;

        info!("📍 Lugar turístico creado: {} ({})", request.name, slug);
        self.fetch_existing(id).await
    }

    pub async fn update(&self, id: Uuid, request: &UpdateSiteRequest) -> AppResult<Option<TouristSite>> {
        let result = sqlx::query(
            r#"
            UPDATE tourist_sites
            SET name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                description = COALESCE($4, description),
                address = COALESCE($5, address),
                main_image = COALESCE($6, main_image),
                latitude = CASE WHEN $12 THEN $7 ELSE latitude END,
                longitude = CASE WHEN $12 THEN $8 ELSE longitude END,
                featured = COALESCE($9, featured),
                opening_hours = COALESCE($10, opening_hours),
                entrance_cost = COALESCE($11, entrance_cost),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.category_id)
        .bind(request.description.as_deref())
        .bind(request.address.as_deref().map(str::trim))
        .bind(request.main_image.as_deref())
        .bind(request.latitude.flatten())
        .bind(request.longitude.flatten())
        .bind(request.featured)
        .bind(request.opening_hours.as_deref())
        .bind(request.entrance_cost.as_deref())
        .bind(request.latitude.is_some())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tourist_sites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch_existing(&self, id: Uuid) -> AppResult<TouristSite> {
        let site = sqlx::query_as::<_, TouristSite>(&format!("{} WHERE s.id = $1", SITE_SELECT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(site)
    }

    // --- Galería de imágenes ---

    pub async fn images(&self, site_id: Uuid) -> AppResult<Vec<SiteImage>> {
        let images = sqlx::query_as::<_, SiteImage>(
            "SELECT * FROM site_images WHERE site_id = $1 ORDER BY is_cover DESC, display_order, created_at",
        )
        .bind(site_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Añadir una imagen; si llega marcada como portada se aplica la transición
    pub async fn add_image(&self, site_id: Uuid, request: &CreateSiteImageRequest) -> AppResult<SiteImage> {
        let image = sqlx::query_as::<_, SiteImage>(
            r#"
            INSERT INTO site_images (id, site_id, image, title, is_cover, display_order)
            VALUES ($1, $2, $3, $4, FALSE, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(site_id)
        .bind(request.image.trim())
        .bind(request.title.as_deref().unwrap_or_default())
        .bind(request.display_order.unwrap_or(0) as i16)
        .fetch_one(&self.pool)
        .await?;

        if request.is_cover.unwrap_or(false) {
            return self
                .set_cover(image.id)
                .await?
                .ok_or_else(|| not_found_error("Imagen", &image.id.to_string()));
        }

        Ok(image)
    }

    /// Marcar una imagen como portada única de su lugar, en una transacción
    pub async fn set_cover(&self, image_id: Uuid) -> AppResult<Option<SiteImage>> {
        let mut tx = self.pool.begin().await?;

        let site_id: Option<(Uuid,)> = sqlx::query_as("SELECT site_id FROM site_images WHERE id = $1")
            .bind(image_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((site_id,)) = site_id else {
            return Ok(None);
        };

        let images = sqlx::query_as::<_, SiteImage>(
            "SELECT * FROM site_images WHERE site_id = $1 ORDER BY display_order FOR UPDATE",
        )
        .bind(site_id)
        .fetch_all(&mut *tx)
        .await?;

        let changes = cover_transition(&images, image_id).unwrap_or_default();
        for (id, is_cover) in &changes {
            sqlx::query("UPDATE site_images SET is_cover = $2 WHERE id = $1")
                .bind(id)
                .bind(is_cover)
                .execute(&mut *tx)
                .await?;
        }

        let image = sqlx::query_as::<_, SiteImage>("SELECT * FROM site_images WHERE id = $1")
            .bind(image_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("🖼️ Portada del lugar {} actualizada ({} cambios)", site_id, changes.len());
        Ok(Some(image))
    }

    pub async fn delete_image(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM site_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SearchSource for TouristSiteRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Site
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let sites = sqlx::query_as::<_, TouristSite>(&format!(
            "{} WHERE s.name ILIKE $1 OR s.description ILIKE $1 OR s.address ILIKE $1 ORDER BY s.name LIMIT $2",
            SITE_SELECT
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sites
            .into_iter()
            .map(|site| SearchHit {
                kind: SearchKind::Site,
                kind_label: SearchKind::Site.label(),
                description: truncate_chars(&site.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &site.main_image),
                url: site_url(&site.slug),
                name: site.name,
                category: site.category_name,
            })
            .collect())
    }
}
