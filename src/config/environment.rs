//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // Credenciales del panel de administración
    pub admin_username: String,
    pub admin_password_hash: String,
    // Prefijo público de las imágenes subidas
    pub media_url: String,
    // Cache opcional
    pub redis_url: Option<String>,
    pub cache_ttl: u64,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration: parse_or("JWT_EXPIRATION", 86_400)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            admin_username: required("ADMIN_USERNAME")?,
            admin_password_hash: required("ADMIN_PASSWORD_HASH")?,
            media_url: env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string()),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            cache_ttl: parse_or("CACHE_TTL", 300)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{} must be set", key))
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("{} must be a valid number", key)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_missing() {
        let value: u64 = parse_or("GARZON_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_required_reports_missing_key() {
        let error = required("GARZON_TEST_UNSET_REQUIRED").unwrap_err();
        assert!(error.to_string().contains("GARZON_TEST_UNSET_REQUIRED"));
    }
}
