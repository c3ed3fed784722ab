//! Modelo de Establishment
//!
//! Hoteles, restaurantes, cafeterías y bares del municipio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::choices::{EstablishmentKind, PriceRange};
use crate::utils::patch::{nullable, nullable_text};
use crate::utils::text::split_list;
use crate::utils::urls::{establishment_url, media_url};

/// Establishment principal - mapea exactamente a la tabla establishments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Establishment {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub featured: bool,
    pub price_range: String,
    pub services: String,
    pub opening_hours: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Establishment {
    pub fn services_list(&self) -> Vec<String> {
        split_list(&self.services)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Request para crear un establecimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEstablishmentRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    pub kind: EstablishmentKind,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 255))]
    pub address: String,

    #[validate(length(min = 7, max = 20))]
    pub phone: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(url)]
    pub website: Option<String>,

    #[validate(length(max = 255))]
    pub image: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub featured: Option<bool>,
    pub price_range: Option<PriceRange>,
    pub services: Option<String>,
    pub opening_hours: Option<String>,
}

/// Request para actualizar un establecimiento
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEstablishmentRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    pub kind: Option<EstablishmentKind>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "nullable_text")]
    #[validate(email)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable_text")]
    #[validate(url)]
    pub website: Option<Option<String>>,

    #[validate(length(max = 255))]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<Option<f64>>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<Option<f64>>,

    pub featured: Option<bool>,
    pub price_range: Option<PriceRange>,
    pub services: Option<String>,
    pub opening_hours: Option<String>,
}

/// Filtros del listado público de establecimientos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstablishmentFilters {
    pub tipo: Option<EstablishmentKind>,
    pub rango_precios: Option<PriceRange>,
    /// Lista separada por comas; todos los servicios deben estar presentes
    pub servicios: Option<String>,
    pub q: Option<String>,
    pub page: Option<i64>,
}

/// Response de establecimiento
#[derive(Debug, Serialize)]
pub struct EstablishmentResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub kind_label: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub image_url: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub featured: bool,
    pub price_range: String,
    pub price_range_label: String,
    pub services: Vec<String>,
    pub opening_hours: String,
    pub url: String,
}

impl EstablishmentResponse {
    pub fn from_establishment(establishment: Establishment, media: &str) -> Self {
        Self {
            kind_label: EstablishmentKind::label_for(&establishment.kind),
            price_range_label: PriceRange::label_for(&establishment.price_range),
            services: establishment.services_list(),
            image_url: media_url(media, &establishment.image),
            url: establishment_url(&establishment.slug),
            id: establishment.id,
            name: establishment.name,
            slug: establishment.slug,
            kind: establishment.kind,
            description: establishment.description,
            address: establishment.address,
            phone: establishment.phone,
            email: establishment.email,
            website: establishment.website,
            latitude: establishment.latitude,
            longitude: establishment.longitude,
            featured: establishment.featured,
            price_range: establishment.price_range,
            opening_hours: establishment.opening_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_establishment_response_labels() {
        let establishment = Establishment {
            id: Uuid::new_v4(),
            name: "Hotel Plaza".to_string(),
            slug: "hotel-plaza".to_string(),
            kind: "hotel".to_string(),
            description: "Hotel en el centro".to_string(),
            address: "Calle 7".to_string(),
            phone: "8332000".to_string(),
            email: None,
            website: None,
            image: "establecimientos/plaza.jpg".to_string(),
            latitude: Some(2.19),
            longitude: Some(-75.65),
            featured: true,
            price_range: "$$".to_string(),
            services: "wifi, parqueadero,, piscina ".to_string(),
            opening_hours: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = EstablishmentResponse::from_establishment(establishment, "/media/");
        assert_eq!(response.kind_label, "Hotel");
        assert_eq!(response.price_range_label, "Moderado");
        assert_eq!(response.services, vec!["wifi", "parqueadero", "piscina"]);
        assert_eq!(response.image_url, "/media/establecimientos/plaza.jpg");
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let request: CreateEstablishmentRequest = serde_json::from_value(serde_json::json!({
            "name": "Café Huila",
            "kind": "cafe",
            "description": "Café de origen",
            "address": "Carrera 10",
            "phone": "3101234567",
            "email": "no-es-un-correo"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
