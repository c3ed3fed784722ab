//! Modelo de Post
//!
//! Entradas del blog turístico.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::text::truncate_chars;
use crate::utils::urls::{media_url, post_url};

const EXCERPT_CHARS: usize = 200;

/// Post principal - mapea exactamente a la tabla posts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub content: String,
    pub featured_image: String,
    pub published: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 150))]
    pub author: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[validate(length(max = 255))]
    pub featured_image: Option<String>,

    pub published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 2, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 150))]
    pub author: Option<String>,

    #[validate(length(min = 1))]
    pub content: Option<String>,

    #[validate(length(max = 255))]
    pub featured_image: Option<String>,

    pub published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilters {
    pub q: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: String,
    pub published: bool,
    pub published_at: DateTime<Utc>,
    pub url: String,
}

impl PostResponse {
    pub fn from_post(post: Post, media: &str) -> Self {
        Self {
            excerpt: truncate_chars(&post.content, EXCERPT_CHARS),
            image_url: media_url(media, &post.featured_image),
            url: post_url(&post.slug),
            id: post.id,
            title: post.title,
            slug: post.slug,
            author: post.author,
            content: post.content,
            published: post.published,
            published_at: post.published_at,
        }
    }
}
