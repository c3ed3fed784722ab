//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT, actualizaciones parciales y tratamiento de texto.

pub mod errors;
pub mod jwt;
pub mod patch;
pub mod text;
pub mod urls;
pub mod validation;

pub use errors::{AppError, AppResult};
