use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::search_dto::{SearchHit, SearchKind};
use crate::models::route::{
    CreateRouteRequest, Difficulty, PointValues, Route, RoutePoint, RouteWithCount, UpdateRouteRequest,
    DESCRIPTION_PREVIEW_CHARS,
};
use crate::services::search::SearchSource;
use crate::utils::errors::AppResult;
use crate::utils::text::truncate_chars;
use crate::utils::urls::{media_url, route_url};

const ROUTE_WITH_COUNT_SELECT: &str = r#"
    SELECT r.*, (SELECT COUNT(*) FROM route_points p WHERE p.route_id = r.id) AS point_count
    FROM routes r
"#;

const POINT_SELECT: &str = r#"
    SELECT p.id, p.route_id, p.site_id, p.name, p.description, p.point_order,
           p.latitude, p.longitude, p.stay_time, p.marker_color, p.marker_icon,
           p.show_on_map, p.created_at, p.updated_at,
           s.name AS site_name, s.slug AS site_slug, s.description AS site_description,
           s.address AS site_address, s.main_image AS site_image, c.name AS site_category
    FROM route_points p
    LEFT JOIN tourist_sites s ON s.id = p.site_id
    LEFT JOIN categories c ON c.id = s.category_id
"#;

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rutas con su número de puntos, filtradas opcionalmente por dificultad
    pub async fn list(&self, difficulty: Option<Difficulty>) -> AppResult<Vec<RouteWithCount>> {
        let routes = sqlx::query_as::<_, RouteWithCount>(&format!(
            "{} WHERE ($1::route_difficulty IS NULL OR r.difficulty = $1) ORDER BY r.name",
            ROUTE_WITH_COUNT_SELECT
        ))
        .bind(difficulty)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    /// Rutas por slug, en el mismo orden que la lista recibida
    pub async fn find_by_slugs(&self, slugs: &[String]) -> AppResult<Vec<Route>> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT r.* FROM routes r
            JOIN UNNEST($1::text[]) WITH ORDINALITY AS wanted(slug, position) ON wanted.slug = r.slug
            ORDER BY wanted.position
            "#,
        )
        .bind(slugs)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM routes WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// Otras rutas con la misma dificultad
    pub async fn similar(&self, route: &Route, limit: i64) -> AppResult<Vec<RouteWithCount>> {
        let routes = sqlx::query_as::<_, RouteWithCount>(&format!(
            "{} WHERE r.difficulty = $1 AND r.id <> $2 ORDER BY r.name LIMIT $3",
            ROUTE_WITH_COUNT_SELECT
        ))
        .bind(route.difficulty)
        .bind(route.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    /// Rutas que pasan por un lugar turístico
    pub async fn through_site(&self, site_id: Uuid) -> AppResult<Vec<RouteWithCount>> {
        let routes = sqlx::query_as::<_, RouteWithCount>(&format!(
            "{} WHERE EXISTS (SELECT 1 FROM route_points p WHERE p.route_id = r.id AND p.site_id = $1) ORDER BY r.name",
            ROUTE_WITH_COUNT_SELECT
        ))
        .bind(site_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes)
    }

    pub async fn create(&self, slug: &str, request: &CreateRouteRequest) -> AppResult<Route> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (
                id, name, slug, description, estimated_duration, distance_km,
                difficulty, recommendations, main_image, map_config
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(slug)
        .bind(&request.description)
        .bind(request.estimated_duration.trim())
        .bind(request.distance_km)
        .bind(request.difficulty.unwrap_or(Difficulty::Facil))
        .bind(request.recommendations.as_deref().unwrap_or_default())
        .bind(request.main_image.as_deref().unwrap_or_default())
        .bind(request.map_config.as_ref())
        .fetch_one(&self.pool)
        .await?;

        info!("🗺️ Ruta creada: {} ({})", route.name, route.slug);
        Ok(route)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateRouteRequest) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                estimated_duration = COALESCE($4, estimated_duration),
                distance_km = COALESCE($5, distance_km),
                difficulty = COALESCE($6, difficulty),
                recommendations = COALESCE($7, recommendations),
                main_image = COALESCE($8, main_image),
                map_config = CASE WHEN $10 THEN $9 ELSE map_config END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(request.description.as_deref())
        .bind(request.estimated_duration.as_deref().map(str::trim))
        .bind(request.distance_km)
        .bind(request.difficulty)
        .bind(request.recommendations.as_deref())
        .bind(request.main_image.as_deref())
        .bind(request.map_config.as_ref().and_then(Option::as_ref))
        .bind(request.map_config.is_some())
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    /// Elimina la ruta y, en cascada, sus puntos
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // --- Puntos de ruta ---

    /// Puntos de una ruta ordenados por `point_order`
    pub async fn points(&self, route_id: Uuid) -> AppResult<Vec<RoutePoint>> {
        let points = sqlx::query_as::<_, RoutePoint>(&format!(
            "{} WHERE p.route_id = $1 ORDER BY p.point_order",
            POINT_SELECT
        ))
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }

    /// Puntos de varias rutas, ordenados por ruta y orden
    pub async fn points_for_routes(&self, route_ids: &[Uuid]) -> AppResult<Vec<RoutePoint>> {
        let points = sqlx::query_as::<_, RoutePoint>(&format!(
            "{} WHERE p.route_id = ANY($1) ORDER BY p.route_id, p.point_order",
            POINT_SELECT
        ))
        .bind(route_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }

    pub async fn find_point(&self, route_id: Uuid, point_id: Uuid) -> AppResult<Option<RoutePoint>> {
        let point = sqlx::query_as::<_, RoutePoint>(&format!(
            "{} WHERE p.route_id = $1 AND p.id = $2",
            POINT_SELECT
        ))
        .bind(route_id)
        .bind(point_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(point)
    }

    pub async fn create_point(&self, route_id: Uuid, values: &PointValues) -> AppResult<RoutePoint> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO route_points (
                id, route_id, site_id, name, description, point_order, latitude, longitude,
                stay_time, marker_color, marker_icon, show_on_map
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(id)
        .bind(route_id)
        .bind(values.site_id)
        .bind(values.name.as_deref())
        .bind(values.description.as_deref())
        .bind(values.point_order)
        .bind(values.latitude)
        .bind(values.longitude)
        .bind(values.stay_time.as_deref())
        .bind(values.marker_color.as_deref())
        .bind(values.marker_icon.as_deref())
        .bind(values.show_on_map)
        .execute(&self.pool)
        .await?;

        self.fetch_point(id).await
    }

    /// Reemplaza todos los campos del punto con los valores ya resueltos
    pub async fn update_point(&self, point_id: Uuid, values: &PointValues) -> AppResult<RoutePoint> {
        sqlx::query(
            r#"
            UPDATE route_points
            SET site_id = $2, name = $3, description = $4, point_order = $5,
                latitude = $6, longitude = $7, stay_time = $8, marker_color = $9,
                marker_icon = $10, show_on_map = $11, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(point_id)
        .bind(values.site_id)
        .bind(values.name.as_deref())
        .bind(values.description.as_deref())
        .bind(values.point_order)
        .bind(values.latitude)
        .bind(values.longitude)
        .bind(values.stay_time.as_deref())
        .bind(values.marker_color.as_deref())
        .bind(values.marker_icon.as_deref())
        .bind(values.show_on_map)
        .execute(&self.pool)
        .await?;

        self.fetch_point(point_id).await
    }

    pub async fn delete_point(&self, route_id: Uuid, point_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM route_points WHERE route_id = $1 AND id = $2")
            .bind(route_id)
            .bind(point_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn fetch_point(&self, id: Uuid) -> AppResult<RoutePoint> {
        let point = sqlx::query_as::<_, RoutePoint>(&format!("{} WHERE p.id = $1", POINT_SELECT))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(point)
    }
}

#[async_trait]
impl SearchSource for RouteRepository {
    fn kind(&self) -> SearchKind {
        SearchKind::Route
    }

    async fn search(&self, pattern: &str, limit: Option<i64>, media: &str) -> AppResult<Vec<SearchHit>> {
        let routes = sqlx::query_as::<_, Route>(
            r#"
            SELECT * FROM routes
            WHERE name ILIKE $1 OR description ILIKE $1 OR recommendations ILIKE $1
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(routes
            .into_iter()
            .map(|route| SearchHit {
                kind: SearchKind::Route,
                kind_label: SearchKind::Route.label(),
                description: truncate_chars(&route.description, DESCRIPTION_PREVIEW_CHARS),
                image_url: media_url(media, &route.main_image),
                url: route_url(&route.slug),
                category: route.difficulty.label().to_string(),
                name: route.name,
            })
            .collect())
    }
}
