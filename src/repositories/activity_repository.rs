use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::Page;
use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::activity::{ActivityFilters, CreateActivityRequest, PhysicalActivity, UpdateActivityRequest};
use crate::models::choices::{ActivityKind, ActivityLevel};
use crate::models::route::DESCRIPTION_PREVIEW_CHARS;
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::{like_pattern, normalize_term, truncate_chars};
use crate::utils::urls::{activity_url, media_url};

pub struct ActivityRepository {
    pool: PgPool,
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &ActivityFilters) {
    builder.push(" WHERE available");

    if let Some(kind) = filters.tipo {
        builder.push(" AND kind = ").push_bind(kind.as_str());
    }
    if let Some(level) = filters.dificultad {
        builder.push(" AND level = ").push_bind(level.as_str());
    }
    // Actividades aptas para la edad indicada
    if let Some(age) = filters.edad {
        builder.push(" AND min_age <= ").push_bind(age);
    }
    if let Some(term) = normalize_term(filters.q.as_deref()) {
        let pattern = like_pattern(&term);
        builder
            .push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR location ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filters: &ActivityFilters, page: Page) -> AppResult<(Vec<PhysicalActivity>, i64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM physical_activities");
        push_filters(&mut count, filters);
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM physical_activities");
        push_filters(&mut query, filters);
        query
            .push(" ORDER BY featured DESC, name LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let activities = query.build_query_as::<PhysicalActivity>().fetch_all(&self.pool).await?;
        Ok((activities, total))
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<PhysicalActivity>> {
        let activity = sqlx::query_as::<_, PhysicalActivity>("SELECT * FROM physical_activities WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(activity)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM physical_activities WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Otras actividades disponibles del mismo tipo
    pub async fn related(&self, activity: &PhysicalActivity, limit: i64) -> AppResult<Vec<PhysicalActivity>> {
        let activities = sqlx::query_as::<_, PhysicalActivity>(
            r#"
            SELECT * FROM physical_activities
            WHERE kind = $1 AND id <> $2 AND available
            ORDER BY featured DESC, name
            LIMIT $3
            "#,
        )
        .bind(&activity.kind)
        .bind(activity.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    pub async fn create(&self, slug: &str, request: &CreateActivityRequest) -> AppResult<PhysicalActivity> {
        let activity = sqlx::query_as::<_, PhysicalActivity>(
            r#"
            INSERT INTO physical_activities (
                id, name, slug, kind, description, location, level, duration, cost, min_age,
                max_capacity, included_equipment, required_equipment, health_notes, best_season,
                schedules, guide, contact, phone, email, main_image, latitude, longitude,
                featured, available
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23, $24, $25
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(slug)
        .bind(request.kind.as_str())
        .bind(&request.description)
        .bind(request.location.trim())
        .bind(request.level.unwrap_or(ActivityLevel::Principiante).as_str())
        .bind(request.duration.trim())
        .bind(request.cost.as_deref().unwrap_or_default())
        .bind(request.min_age.unwrap_or(0))
        .bind(request.max_capacity)
        .bind(request.included_equipment.as_deref().unwrap_or_default())
        .bind(request.required_equipment.as_deref().unwrap_or_default())
        .bind(request.health_notes.as_deref().unwrap_or_default())
        .bind(request.best_season.as_deref().unwrap_or_default())
        .bind(request.schedules.as_deref().unwrap_or_default())
        .bind(request.guide.as_deref().unwrap_or_default())
        .bind(request.contact.as_deref().unwrap_or_default())
        .bind(request.phone.as_deref().unwrap_or_default())
        .bind(request.email.as_deref())
        .bind(request.main_image.as_deref().unwrap_or_default())
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.featured.unwrap_or(false))
        .bind(request.available.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        info!("🧗 Actividad creada: {} ({})", activity.name, activity.kind);
        Ok(activity)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateActivityRequest) -> AppResult<Option<PhysicalActivity>> {
        let activity = sqlx::query_as::<_, PhysicalActivity>(
            r#"
            UPDATE physical_activities
            SET name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                level = COALESCE($6, level),
                duration = COALESCE($7, duration),
                cost = COALESCE($8, cost),
                min_age = COALESCE($9, min_age),
                max_capacity = CASE WHEN $25 THEN $10 ELSE max_capacity END,
                included_equipment = COALESCE($11, included_equipment),
                required_equipment = COALESCE($12, required_equipment),
                health_notes = COALESCE($13, health_notes),
                best_season = COALESCE($14, best_season),
                schedules = COALESCE($15, schedules),
                guide = COALESCE($16, guide),
                contact = COALESCE($17, contact),
                phone = COALESCE($18, phone),
                email = CASE WHEN $26 THEN $19 ELSE email END,
                main_image = COALESCE($20, main_image),
                latitude = CASE WHEN $27 THEN $21 ELSE latitude END,
                longitude = CASE WHEN $27 THEN $22 ELSE longitude END,
                featured = COALESCE($23, featured),
                available = COALESCE($24, available),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.kind.as_ref().map(ActivityKind::as_str))
        .bind(request.description.as_deref())
        .bind(request.location.as_deref().map(str::trim))
        .bind(request.level.as_ref().map(ActivityLevel::as_str))
        .bind(request.duration.as_deref().map(str::trim))
        .bind(request.cost.as_deref())
        .bind(request.min_age)
        .bind(request.max_capacity.flatten())
        .bind(request.included_equipment.as_deref())
        .bind(request.required_equipment.as_deref())
        .bind(request.health_notes.as_deref())
        .bind(request.best_season.as_deref())
        .bind(request.schedules.as_deref())
        .bind(request.guide.as_deref())
        .bind(request.contact.as_deref())
        .bind(request.phone.as_deref())
        .bind(request.email.as_ref().and_then(|v| v.as_deref()))
        .bind(request.main_image.as_deref())
        .bind(request.latitude.flatten())
        .bind(request.longitude.flatten())
        .bind(request.featured)
        .bind(request.available)
        .bind(request.max_capacity.is_some())
        .bind(request.email.is_some())
        .bind(request.latitude.is_some())
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM physical_activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SearchSource for ActivityRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Activity
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let activities = sqlx::query_as::<_, PhysicalActivity>(
            r#"
            SELECT * FROM physical_activities
            WHERE available AND (name ILIKE $1 OR description ILIKE $1 OR location ILIKE $1)
            ORDER BY featured DESC, name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities
            .into_iter()
            .map(|activity| SearchHit {
                kind: SearchKind::Activity,
                kind_label: SearchKind::Activity.label(),
                description: truncate_chars(&activity.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &activity.main_image),
                url: activity_url(&activity.slug),
                category: ActivityKind::label_for(&activity.kind),
                name: activity.name,
            })
            .collect())
    }
}
