//! Services module
//!
//! Este módulo contiene la lógica de negocio que no pertenece a un único
//! repositorio: agregación geográfica de rutas, exportación, búsqueda global,
//! contadores y autenticación.

pub mod auth_service;
pub mod route_export;
pub mod route_map;
pub mod search;
pub mod stats_service;

pub use auth_service::AuthService;
pub use search::{SearchService, SearchSource};
pub use stats_service::StatsService;
