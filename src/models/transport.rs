//! Modelo de Transport
//!
//! Opciones de transporte para llegar a los atractivos del municipio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::choices::TransportKind;
use crate::utils::urls::{media_url, transport_url};

/// Transport principal - mapea exactamente a la tabla transports
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transport {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub description: String,
    pub origin: String,
    pub destination: String,
    pub estimated_duration: String,
    pub approximate_cost: String,
    pub contact: String,
    pub phone: String,
    pub schedules: String,
    pub recommendations: String,
    pub image: String,
    pub featured: bool,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear una opción de transporte
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransportRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: String,

    pub kind: TransportKind,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 255))]
    pub origin: String,

    #[validate(length(min = 1, max = 255))]
    pub destination: String,

    #[validate(length(min = 1, max = 50))]
    pub estimated_duration: String,

    #[validate(length(max = 100))]
    pub approximate_cost: Option<String>,

    #[validate(length(max = 200))]
    pub contact: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub schedules: Option<String>,
    pub recommendations: Option<String>,

    #[validate(length(max = 255))]
    pub image: Option<String>,

    pub featured: Option<bool>,
    pub available: Option<bool>,
}

/// Request para actualizar una opción de transporte
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransportRequest {
    #[validate(length(min = 2, max = 200))]
    pub name: Option<String>,

    pub kind: Option<TransportKind>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub origin: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub destination: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub estimated_duration: Option<String>,

    #[validate(length(max = 100))]
    pub approximate_cost: Option<String>,

    #[validate(length(max = 200))]
    pub contact: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub schedules: Option<String>,
    pub recommendations: Option<String>,

    #[validate(length(max = 255))]
    pub image: Option<String>,

    pub featured: Option<bool>,
    pub available: Option<bool>,
}

/// Filtros del listado público de transporte
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportFilters {
    pub tipo: Option<TransportKind>,
    pub q: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TransportResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub kind_label: String,
    pub description: String,
    pub origin: String,
    pub destination: String,
    pub estimated_duration: String,
    pub approximate_cost: String,
    pub contact: String,
    pub phone: String,
    pub schedules: String,
    pub recommendations: String,
    pub image_url: String,
    pub featured: bool,
    pub available: bool,
    pub url: String,
}

impl TransportResponse {
    pub fn from_transport(transport: Transport, media: &str) -> Self {
        Self {
            kind_label: TransportKind::label_for(&transport.kind),
            image_url: media_url(media, &transport.image),
            url: transport_url(&transport.slug),
            id: transport.id,
            name: transport.name,
            slug: transport.slug,
            kind: transport.kind,
            description: transport.description,
            origin: transport.origin,
            destination: transport.destination,
            estimated_duration: transport.estimated_duration,
            approximate_cost: transport.approximate_cost,
            contact: transport.contact,
            phone: transport.phone,
            schedules: transport.schedules,
            recommendations: transport.recommendations,
            featured: transport.featured,
            available: transport.available,
        }
    }
}
