use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::photo::{CreatePhotoRequest, Photo, PhotoFilters, UpdatePhotoRequest};
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::{normalize_term, truncate_chars};
use crate::utils::urls::{media_url, photo_url};

const PHOTO_SELECT: &str = r#"
    SELECT p.id, p.title, p.slug, p.description, p.image, p.site_id, p.photographer,
           p.featured, p.created_at, p.updated_at, s.name AS site_name, s.slug AS site_slug
    FROM photos p
    LEFT JOIN tourist_sites s ON s.id = p.site_id
"#;

pub struct PhotoRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &PhotoFilters) {
    builder.push(" WHERE TRUE");

    if filters.destacadas == Some(true) {
        builder.push(" AND p.featured");
    }
    if let Some(site) = normalize_term(filters.lugar.as_deref()) {
        builder.push(" AND s.slug = ").push_bind(site);
    }
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Galería ordenada de la más reciente a la más antigua
    pub async fn list(&self, filters: &PhotoFilters, page: Page) -> AppResult<(Vec<Photo>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM photos p LEFT JOIN tourist_sites s ON s.id = p.site_id",
        );
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new(PHOTO_SELECT);
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY p.created_at DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let photos = query.build_query_as::<Photo>().fetch_all(&self.pool).await?;
        Ok((photos, total))
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Photo>> {
        let photo = sqlx::query_as::<_, Photo>(&format!("{} WHERE p.slug = $1", PHOTO_SELECT))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(photo)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM photos WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn create(&self, slug: &str, request: &CreatePhotoRequest) -> AppResult<Photo> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO photos (id, title, slug, description, image, site_id, photographer, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(request.title.trim())
        .bind(slug)
        .bind(request.description.as_deref().unwrap_or_default())
        .bind(&request.image)
        .bind(request.site_id)
        .bind(request.photographer.as_deref().unwrap_or_default())
        .bind(request.featured.unwrap_or(false))
        .execute(&self.pool)
        .await?;

        info!("📷 Fotografía creada: {}", request.title.trim());
        self.fetch(id).await
    }

    pub async fn update(&self, id: Uuid, request: &UpdatePhotoRequest) -> AppResult<Option<Photo>> {
        let result = sqlx::query(
            r#"
            UPDATE photos
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                site_id = CASE WHEN $8 THEN $5 ELSE site_id END,
                photographer = COALESCE($6, photographer),
                featured = COALESCE($7, featured),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.title.as_deref().map(str::trim))
        .bind(request.description.as_deref())
        .bind(request.image.as_deref())
        .bind(request.site_id.flatten())
        .bind(request.photographer.as_deref())
        .bind(request.featured)
        .bind(request.site_id.is_some())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch(id).await.map(Some)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marcar o desmarcar como destacadas varias fotografías a la vez
    pub async fn set_featured(&self, ids: &[Uuid], featured: bool) -> AppResult<u64> {
        let result = sqlx::query("UPDATE photos SET featured = $2, updated_at = NOW() WHERE id = ANY($1)")
            .bind(ids)
            .bind(featured)
            .execute(&self.pool)
            .await?;

        info!("📷 {} fotografías actualizadas (destacada = {})", result.rows_affected(), featured);
        Ok(result.rows_affected())
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Photo> {
        let photo = sqlx::query_as::<_, Photo>(&format!("{} WHERE p.id = $1", PHOTO_SELECT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(photo)
    }
}

#[async_trait]
impl SearchSource for PhotoRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Photo
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let photos = sqlx::query_as::<_, Photo>(&format!(
            "{} WHERE p.title ILIKE $1 OR p.description ILIKE $1 OR p.photographer ILIKE $1 \
             ORDER BY p.created_at DESC LIMIT $2",
            PHOTO_SELECT
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(photos
            .into_iter()
            .map(|photo| SearchHit {
                kind: SearchKind::Photo,
                kind_label: SearchKind::Photo.label(),
                description: truncate_chars(&photo.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &photo.image),
                url: photo_url(&photo.slug),
                category: photo.site_name.unwrap_or_default(),
                name: photo.title,
            })
            .collect())
    }
}
