//! Autenticación del panel de administración
//!
//! Hay una única cuenta de administrador configurada por entorno
//! (`ADMIN_USERNAME` y `ADMIN_PASSWORD_HASH` en formato bcrypt).

use bcrypt::verify;
use tracing::{info, warn};

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthService {
    username: String,
    password_hash: String,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(config: &EnvironmentConfig, jwt: JwtConfig) -> Self {
        Self {
            username: config.admin_username.clone(),
            password_hash: config.admin_password_hash.clone(),
            jwt,
        }
    }

    /// Verificar credenciales y emitir un token de administrador
    pub fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let username = request.username.trim();

        // Mismo mensaje para usuario o contraseña incorrectos
        let valid_user = username == self.username;
        let valid_password = verify(&request.password, &self.password_hash)
            .map_err(|e| AppError::Hash(format!("Hash de administrador inválido: {}", e)))?;

        if !(valid_user && valid_password) {
            warn!("🔒 Intento de login fallido para '{}'", username);
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(username, &self.jwt)?;
        info!("🔑 Login de administrador: {}", username);

        Ok(LoginResponse::bearer(token, self.jwt.expiration as i64, username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::verify_token;

    fn service() -> AuthService {
        AuthService {
            username: "admin".to_string(),
            password_hash: bcrypt::hash("clave-segura", 4).unwrap(),
            jwt: JwtConfig {
                secret: "secreto-de-pruebas".to_string(),
                expiration: 3600,
            },
        }
    }

    fn login(username: &str, password: &str) -> AppResult<LoginResponse> {
        service().login(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[test]
    fn test_login_issues_admin_token() {
        let response = login("admin", "clave-segura").unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);

        let claims = verify_token(&response.token, &service().jwt).unwrap();
        assert_eq!(claims.sub, "admin");
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        assert!(matches!(login("admin", "otra"), Err(AppError::Unauthorized(_))));
        assert!(matches!(login("root", "clave-segura"), Err(AppError::Unauthorized(_))));
    }
}
