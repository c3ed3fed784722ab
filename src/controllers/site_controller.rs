use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::controllers::slug_for;
use crate::dto::detail_dto::SiteDetailResponse;
use crate::dto::{ApiResponse, Page, PaginatedResponse};
use crate::models::feedback::{CommentTarget, CreateCommentRequest, PublicComment};
use crate::models::route::RouteSummary;
use crate::models::tourist_site::{
    CreateSiteImageRequest, CreateSiteRequest, SiteFilters, SiteImageResponse, SiteResponse, SiteSummary,
    TouristSite, UpdateSiteRequest,
};
use crate::repositories::feedback_repository::FeedbackRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::tourist_site_repository::TouristSiteRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppResult};
use crate::utils::validation::{validate_coordinate_pair, validate_coordinate_patch};

const PAGE_SIZE: i64 = 12;
const RELATED_SITES: i64 = 3;

pub struct SiteController {
    sites: TouristSiteRepository,
    routes: RouteRepository,
    feedback: FeedbackRepository,
    media: String,
}

impl SiteController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        Self {
            sites: TouristSiteRepository::new(pool.clone()),
            routes: RouteRepository::new(pool.clone()),
            feedback: FeedbackRepository::new(pool),
            media: media.to_string(),
        }
    }

    pub async fn list(&self, filters: SiteFilters) -> AppResult<PaginatedResponse<SiteSummary>> {
        let page = Page::new(filters.page, PAGE_SIZE);
        let (sites, total) = self.sites.list(&filters, page).await?;

        Ok(PaginatedResponse::new(sites, total, page).map(|site| SiteSummary::from_site(site, &self.media)))
    }

    /// Ficha del lugar con galería, lugares relacionados, rutas y comentarios aprobados
    pub async fn detail(&self, slug: &str) -> AppResult<SiteDetailResponse> {
        let site = self.find(slug).await?;

        let images = self.sites.images(site.id).await?;
        let related = self.sites.related(&site, RELATED_SITES).await?;
        let routes = self.routes.through_site(site.id).await?;
        let comments = self.feedback.approved_comments(CommentTarget::Site(site.id)).await?;

        Ok(SiteDetailResponse {
            images: images
                .into_iter()
                .map(|image| SiteImageResponse::from_image(image, &self.media))
                .collect(),
            related_sites: related
                .into_iter()
                .map(|site| SiteSummary::from_site(site, &self.media))
                .collect(),
            routes: routes
                .into_iter()
                .map(|route| RouteSummary::from((route, self.media.as_str())))
                .collect(),
            comments: comments.into_iter().map(PublicComment::from).collect(),
            site: SiteResponse::from_site(site, &self.media),
        })
    }

    /// El comentario queda pendiente de moderación
    pub async fn comment(&self, slug: &str, request: CreateCommentRequest) -> AppResult<ApiResponse<PublicComment>> {
        request.validate()?;
        let site = self.find(slug).await?;

        let comment = self.feedback.create_comment(CommentTarget::Site(site.id), &request).await?;
        Ok(ApiResponse::success_with_message(
            PublicComment::from(comment),
            "Comentario recibido; será publicado cuando sea aprobado",
        ))
    }

    async fn find(&self, slug: &str) -> AppResult<TouristSite> {
        self.sites
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found_error("Lugar turístico", slug))
    }

    // --- Administración ---

    pub async fn create(&self, request: CreateSiteRequest) -> AppResult<ApiResponse<SiteResponse>> {
        request.validate()?;
        validate_coordinate_pair(request.latitude, request.longitude)?;

        let slug = slug_for("name", &request.name)?;
        if self.sites.slug_exists(&slug).await? {
            return Err(conflict_error("Lugar turístico", "slug", &slug));
        }

        let site = self.sites.create(&slug, &request).await?;
        Ok(ApiResponse::success_with_message(
            SiteResponse::from_site(site, &self.media),
            "Lugar turístico creado exitosamente",
        ))
    }

    pub async fn update(&self, id: Uuid, request: UpdateSiteRequest) -> AppResult<ApiResponse<SiteResponse>> {
        request.validate()?;
        validate_coordinate_patch(request.latitude, request.longitude)?;

        let site = self
            .sites
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Lugar turístico", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            SiteResponse::from_site(site, &self.media),
            "Lugar turístico actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.sites.delete(id).await? {
            return Err(not_found_error("Lugar turístico", &id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Lugar turístico eliminado exitosamente"))
    }

    pub async fn images(&self, site_id: Uuid) -> AppResult<Vec<SiteImageResponse>> {
        self.ensure_site(site_id).await?;
        let images = self.sites.images(site_id).await?;
        Ok(images
            .into_iter()
            .map(|image| SiteImageResponse::from_image(image, &self.media))
            .collect())
    }

    pub async fn add_image(
        &self,
        site_id: Uuid,
        request: CreateSiteImageRequest,
    ) -> AppResult<ApiResponse<SiteImageResponse>> {
        request.validate()?;
        self.ensure_site(site_id).await?;

        let image = self.sites.add_image(site_id, &request).await?;
        Ok(ApiResponse::success_with_message(
            SiteImageResponse::from_image(image, &self.media),
            "Imagen añadida a la galería",
        ))
    }

    /// Marcar la imagen como única portada de su lugar
    pub async fn set_cover(&self, image_id: Uuid) -> AppResult<ApiResponse<SiteImageResponse>> {
        let image = self
            .sites
            .set_cover(image_id)
            .await?
            .ok_or_else(|| not_found_error("Imagen", &image_id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            SiteImageResponse::from_image(image, &self.media),
            "Portada actualizada",
        ))
    }

    pub async fn delete_image(&self, image_id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.sites.delete_image(image_id).await? {
            return Err(not_found_error("Imagen", &image_id.to_string()));
        }
        Ok(ApiResponse::success_with_message((), "Imagen eliminada"))
    }

    async fn ensure_site(&self, site_id: Uuid) -> AppResult<()> {
        self.sites
            .find_by_id(site_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| not_found_error("Lugar turístico", &site_id.to_string()))
    }
}
