//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::cache::RedisClient;
use crate::config::environment::EnvironmentConfig;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    /// Redis es opcional: sin `REDIS_URL` los datos se calculan siempre
    pub cache: Option<RedisClient>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, cache: Option<RedisClient>) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            pool,
            config,
            cache,
        }
    }

    /// Base pública de las imágenes (`MEDIA_URL`)
    pub fn media_url(&self) -> &str {
        &self.config.media_url
    }
}
