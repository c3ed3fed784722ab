use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::post::{CreatePostRequest, Post, PostFilters, UpdatePostRequest};
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::{like_pattern, normalize_term, truncate_chars};
use crate::utils::urls::{media_url, post_url};

pub struct PostRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &PostFilters) {
    builder.push(" WHERE published");

    if let Some(term) = normalize_term(filters.q.as_deref()) {
        let pattern = like_pattern(&term);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entradas publicadas, de la más reciente a la más antigua
    pub async fn list_published(&self, filters: &PostFilters, page: Page) -> AppResult<(Vec<Post>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM posts");
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM posts");
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY published_at DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let posts = query.build_query_as::<Post>().fetch_all(&self.pool).await?;
        Ok((posts, total))
    }

    /// Entrada publicada por slug; los borradores no son visibles
    pub async fn find_published(&self, slug: &str) -> AppResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = $1 AND published")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn create(&self, slug: &str, request: &CreatePostRequest) -> AppResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, title, slug, author, content, featured_image, published, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()))
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.title.trim())
        .bind(slug)
        .bind(request.author.trim())
        .bind(&request.content)
        .bind(request.featured_image.as_deref().unwrap_or_default())
        .bind(request.published.unwrap_or(false))
        .bind(request.published_at)
        .fetch_one(&self.pool)
        .await?;

        info!("📝 Entrada creada: {} (publicada = {})", post.title, post.published);
        Ok(post)
    }

    pub async fn update(&self, id: Uuid, request: &UpdatePostRequest) -> AppResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                content = COALESCE($4, content),
                featured_image = COALESCE($5, featured_image),
                published = COALESCE($6, published),
                published_at = COALESCE($7, published_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.title.as_deref().map(str::trim))
        .bind(request.author.as_deref().map(str::trim))
        .bind(request.content.as_deref())
        .bind(request.featured_image.as_deref())
        .bind(request.published)
        .bind(request.published_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SearchSource for PostRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Post
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE published AND (title ILIKE $1 OR content ILIKE $1)
            ORDER BY published_at DESC
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts
            .into_iter()
            .map(|post| SearchHit {
                kind: SearchKind::Post,
                kind_label: SearchKind::Post.label(),
                description: truncate_chars(&post.content, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &post.featured_image),
                url: post_url(&post.slug),
                category: post.author,
                name: post.title,
            })
            .collect())
    }
}
