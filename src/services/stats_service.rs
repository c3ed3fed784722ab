//! Contadores globales del portal con caché opcional en Redis

use sqlx::PgPool;
use tracing::{debug, warn};

use crate::cache::{cache_config::make_key, CacheOperations, RedisClient};
use crate::dto::stats_dto::SiteCounters;
use crate::repositories::stats_repository::StatsRepository;
use crate::utils::errors::AppResult;

pub struct StatsService {
    repository: StatsRepository,
    cache: Option<RedisClient>,
}

impl StatsService {
    pub fn new(pool: PgPool, cache: Option<RedisClient>) -> Self {
        Self {
            repository: StatsRepository::new(pool),
            cache,
        }
    }

    /// Contadores desde la caché si existen; los fallos de Redis no se propagan
    pub async fn counters(&self) -> AppResult<SiteCounters> {
        let key = make_key("stats", "counters");

        if let Some(cache) = &self.cache {
            match cache.get::<SiteCounters>(&key).await {
                Ok(Some(counters)) => return Ok(counters),
                Ok(None) => debug!("📊 Contadores no cacheados, calculando"),
                Err(e) => warn!("⚠️ Redis no disponible para contadores: {}", e),
            }
        }

        let counters = self.repository.counters().await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&key, &counters, cache.default_ttl()).await {
                warn!("⚠️ No se pudieron cachear los contadores: {}", e);
            }
        }

        Ok(counters)
    }
}
