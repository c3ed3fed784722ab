use sqlx::PgPool;

use crate::cache::RedisClient;
use crate::dto::stats_dto::SiteCounters;
use crate::services::StatsService;
use crate::utils::errors::AppResult;

pub struct StatsController {
    service: StatsService,
}

impl StatsController {
    pub fn new(pool: PgPool, cache: Option<RedisClient>) -> Self {
        Self {
            service: StatsService::new(pool, cache),
        }
    }

    pub async fn counters(&self) -> AppResult<SiteCounters> {
        self.service.counters().await
    }
}
