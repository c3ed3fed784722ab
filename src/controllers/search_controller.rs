use sqlx::PgPool;

use crate::dto::search_dto::{SearchQuery, SearchResponse};
use crate::repositories::{
    activity_repository::ActivityRepository, craft_repository::CraftRepository,
    establishment_repository::EstablishmentRepository, event_repository::EventRepository,
    photo_repository::PhotoRepository, post_repository::PostRepository, route_repository::RouteRepository,
    tourist_site_repository::TouristSiteRepository, transport_repository::TransportRepository,
};
use crate::services::{SearchService, SearchSource};
use crate::utils::errors::AppResult;

pub struct SearchController {
    service: SearchService,
}

impl SearchController {
    pub fn new(pool: PgPool, media: &str) -> Self {
        let sources: Vec<Box<dyn SearchSource>> = vec![
            Box::new(TouristSiteRepository::new(pool.clone())),
            Box::new(EstablishmentRepository::new(pool.clone())),
            Box::new(EventRepository::new(pool.clone())),
            Box::new(RouteRepository::new(pool.clone())),
            Box::new(TransportRepository::new(pool.clone())),
            Box::new(CraftRepository::new(pool.clone())),
            Box::new(ActivityRepository::new(pool.clone())),
            Box::new(PhotoRepository::new(pool.clone())),
            Box::new(PostRepository::new(pool)),
        ];

        Self {
            service: SearchService::new(sources, media),
        }
    }

    pub async fn search(&self, query: SearchQuery) -> AppResult<SearchResponse> {
        let results = self.service.search(query.q.as_deref()).await?;
        Ok(SearchResponse::new(query.q.unwrap_or_default().trim(), results))
    }

    pub async fn quick(&self, query: SearchQuery) -> AppResult<SearchResponse> {
        let results = self.service.quick_search(query.q.as_deref()).await?;
        Ok(SearchResponse::new(query.q.unwrap_or_default().trim(), results))
    }
}
