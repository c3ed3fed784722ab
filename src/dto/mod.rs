//! DTOs de la API
//!
//! Estructuras de entrada y salida que no mapean directamente a una tabla.

pub mod auth_dto;
pub mod common_dto;
pub mod detail_dto;
pub mod map_dto;
pub mod route_map_dto;
pub mod search_dto;
pub mod stats_dto;

pub use common_dto::*;
