//! Garzón Turismo
//!
//! API de contenidos turísticos del municipio de Garzón (Huila): lugares,
//! establecimientos, eventos, rutas con mapa, búsqueda global y moderación
//! de comentarios y calificaciones.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
