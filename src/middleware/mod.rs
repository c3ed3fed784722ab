//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación del panel de
//! administración y la configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
