//! Modelo de ContactMessage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Mensaje del formulario de contacto
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateContactRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 2, max = 200))]
    pub subject: String,

    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

/// Filtros de la bandeja de entrada
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactFilters {
    pub no_leidos: Option<bool>,
    pub page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_is_rejected() {
        let request = CreateContactRequest {
            name: "María".to_string(),
            email: "maria@example.com".to_string(),
            subject: "Horarios".to_string(),
            message: "Hola".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("message"));
    }
}
