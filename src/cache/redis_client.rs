use anyhow::{bail, Context, Result};
use redis::{aio::ConnectionManager, AsyncCommands};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{CacheConfig, CacheOperations};

/// Conexión gestionada a Redis, compartida entre handlers al clonarse
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Abrir la conexión; falla si Redis no contesta al PING inicial
    pub async fn connect(config: CacheConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let manager = ConnectionManager::new(client).await?;
        let redis = Self { manager, config };

        if !redis.ping().await {
            bail!("Redis no respondió al PING");
        }

        info!("🔗 Caché Redis lista (TTL {}s)", redis.config.default_ttl);
        Ok(redis)
    }

    pub fn default_ttl(&self) -> u64 {
        self.config.default_ttl
    }

    /// Estado para el health check
    pub async fn ping(&self) -> bool {
        let mut conn = self.manager.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map(|reply| reply == "PONG")
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl CacheOperations for RedisClient {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn
            .get(key)
            .await
            .with_context(|| format!("lectura de la clave '{}'", key))?;

        debug!("📥 Caché {} para {}", if raw.is_some() { "HIT" } else { "MISS" }, key);
        raw.map(|value| serde_json::from_str(&value))
            .transpose()
            .with_context(|| format!("valor corrupto en '{}'", key))
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let mut conn = self.manager.clone();
        let payload = serde_json::to_string(value)?;

        conn.set_ex::<_, _, ()>(key, payload, ttl)
            .await
            .with_context(|| format!("escritura de la clave '{}'", key))?;

        debug!("💾 Caché guardada para {} ({}s)", key, ttl);
        Ok(())
    }
}
