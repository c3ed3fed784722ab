//! Middleware de autenticación JWT
//!
//! Protege las rutas de `/api/admin`: extrae el token `Bearer`, lo verifica
//! e inyecta el administrador autenticado en las extensiones de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Administrador autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub username: String,
}

/// Middleware de autenticación del panel de administración
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)
        .map_err(|_| AppError::Unauthorized("Formato de token inválido".to_string()))?;
    let claims = verify_token(token, &state.jwt).map_err(|e| {
        warn!("🔒 Token de administrador rechazado: {}", e);
        AppError::Unauthorized("Token inválido o expirado".to_string())
    })?;

    debug!("🔑 Administrador autenticado: {}", claims.sub);
    request
        .extensions_mut()
        .insert(AuthenticatedAdmin { username: claims.sub });

    Ok(next.run(request).await)
}
