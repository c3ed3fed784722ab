//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Código SQLSTATE de Postgres para violación de restricción única
const UNIQUE_VIOLATION: &str = "23505";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Cache error: {0}")]
    Cache(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// Indica si el error de base de datos es una violación de unicidad
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(e) => e
                .as_database_error()
                .and_then(|db| db.code())
                .map(|code| code == UNIQUE_VIOLATION)
                .unwrap_or(false),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_unique_violation() {
            warn!("⚠️ Violación de unicidad: {}", self);
            let body = ErrorResponse::new(
                "Conflict",
                "Ya existe un registro con ese valor único",
                "CONFLICT",
            );
            return (StatusCode::CONFLICT, Json(body)).into_response();
        }

        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "Error al acceder a la base de datos",
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Validation Error", "Los datos enviados no son válidos", "VALIDATION_ERROR")
                        .with_details(json!(e)),
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("🔒 Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"),
                )
            }

            AppError::Forbidden(msg) => {
                warn!("🔒 Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new("Forbidden", msg, "FORBIDDEN"),
                )
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("Not Found", msg, "NOT_FOUND"),
                )
            }

            AppError::Conflict(msg) => {
                warn!("⚠️ Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Conflict", msg, "CONFLICT"),
                )
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, "BAD_REQUEST"),
                )
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal Server Error", "Ocurrió un error inesperado", "INTERNAL_ERROR"),
                )
            }

            AppError::Jwt(msg) => {
                warn!("🔒 JWT error: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("JWT Error", msg, "JWT_ERROR"),
                )
            }

            AppError::Hash(msg) => {
                error!("❌ Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Hash Error",
                        "Error al procesar las credenciales",
                        "HASH_ERROR",
                    ),
                )
            }

            AppError::Cache(msg) => {
                error!("❌ Cache error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("Cache Error", "La caché no está disponible", "CACHE_ERROR"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación a nivel de campo
pub fn validation_error(field: &'static str, message: impl Into<Cow<'static, str>>) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, field_error("custom", message));
    AppError::Validation(errors)
}

/// Construir un `ValidationError` con mensaje legible
pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> validator::ValidationError {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} '{}' no encontrado", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} con {} '{}' ya existe", resource, field, value))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_field_level() {
        let error = validation_error("nombre", "El punto necesita un nombre");
        match error {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                let nombre = fields.get("nombre").expect("field error");
                assert_eq!(nombre[0].message.as_deref(), Some("El punto necesita un nombre"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        let response = not_found_error("Ruta", "ruta-inexistente").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = conflict_error("Ruta", "slug", "ruta-del-cafe").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = bad_request_error("formato desconocido").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = validation_error("latitude", "fuera de rango").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[derive(Debug)]
    struct DuplicateKey;

    impl std::fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for DuplicateKey {}

    impl sqlx::error::DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"route_points_route_id_point_order_key\""
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(UNIQUE_VIOLATION))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[tokio::test]
    async fn test_unique_violation_renders_conflict() {
        let error = AppError::Database(sqlx::Error::Database(Box::new(DuplicateKey)));
        assert!(error.is_unique_violation());

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "CONFLICT");
        assert_eq!(json["message"], "Ya existe un registro con ese valor único");
    }

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!AppError::Conflict("x".to_string()).is_unique_violation());
        assert!(!AppError::Database(sqlx::Error::RowNotFound).is_unique_violation());
    }
}
