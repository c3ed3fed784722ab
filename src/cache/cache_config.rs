//! Configuración de cache
//!
//! Este módulo contiene la configuración y las operaciones del sistema de cache.

use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::EnvironmentConfig;

/// Prefijo común de todas las claves del portal
pub const KEY_PREFIX: &str = "garzon_turismo";

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    pub default_ttl: u64,
}

impl CacheConfig {
    /// `None` cuando no hay `REDIS_URL` configurada
    pub fn from_environment(config: &EnvironmentConfig) -> Option<Self> {
        config.redis_url.as_ref().map(|url| Self {
            redis_url: url.clone(),
            default_ttl: config.cache_ttl,
        })
    }
}

/// Operaciones de cache con valores serializados como JSON
#[async_trait::async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
}

/// Generar clave de cache con prefijo
pub fn make_key(namespace: &str, identifier: &str) -> String {
    format!("{}:{}:{}", KEY_PREFIX, namespace, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        assert_eq!(make_key("stats", "counters"), "garzon_turismo:stats:counters");
    }
}
