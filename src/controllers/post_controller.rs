use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::detail_dto::PostDetailResponse;
use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::feedback::{CommentTarget, CreateCommentRequest, PublicComment};
use crate::models::post::{CreatePostRequest, Post, PostFilters, PostResponse, UpdatePostRequest};
use crate::repositories::feedback_repository::FeedbackRepository;
use crate::repositories::post_repository::PostRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};

const PAGE_SIZE: i64 = 10;

pub struct PostController {
    posts: PostRepository,
    feedback: FeedbackRepository,
    media: String,
}

impl PostController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            feedback: FeedbackRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: PostFilters) -> AppResult<PaginatedResponse<PostResponse>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (posts, total) = self.posts.list_published(&filters, page).await?;

        Ok(PaginatedResponse::new(posts, total, page).map(|post| PostResponse::from_post(post, &self.media)))
    }

    pub async fn detail(&self, slug: &str) -> AppResult<PostDetailResponse> {
        let post = self.find(slug).await?;
        let comments = self.feedback.approved_comments(CommentTarget::Post(post.id)).await?;

        Ok(PostDetailResponse {
            comments: comments.into_iter().map(PublicComment::from).collect(),
            post: PostResponse::from_post(post, &self.media),
        })
    }

    pub async fn comment(&self, slug: &str, request: CreateCommentRequest) -> AppResult<ApiResponse<PublicComment>> {
        request.validate()?;
        let post = self.find(slug).await?;

        let comment = self.feedback.create_comment(CommentTarget::Post(post.id), &request).await?;
        Ok(ApiResponse::success_with_message(
            PublicComment::from(comment),
            "Comentario recibido; será publicado cuando sea aprobado",
        ))
    }

    async fn find(&self, slug: &str) -> AppResult<Post> {
        self.posts
            .find_published(slug)
            .await?
            .ok_or_else(|| not_found_error("Entrada", slug))
    }

    // --- Administración ---

    pub async fn create(&self, request: CreatePostRequest) -> AppResult<ApiResponse<PostResponse>> {
        request.validate()?;

        let slug = slug_for("title", &request.title)?;
        if self.posts.slug_exists(&slug).await? {
            return Err(conflict_error("Entrada", "slug", &slug));
        }

        let post = self.posts.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            PostResponse::from_post(post, &self.media),
            "Entrada creada exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdatePostRequest) -> AppResult<ApiResponse<PostResponse>> {
        request.validate()?;

        let post = self
            .posts
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Entrada", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            PostResponse::from_post(post, &self.media),
            "Entrada actualizada exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.posts.delete(id).await? {
            return Err(not_found_error("Entrada", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Entrada eliminada exitosamente"))
    }
}
