//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean al schema
//! PostgreSQL, junto con los requests validados y las responses de la API.

pub mod choices;

pub mod activity;
pub mod category;
pub mod contact;
pub mod craft;
pub mod establishment;
pub mod event;
pub mod feedback;
pub mod photo;
pub mod post;
pub mod route;
pub mod tourist_site;
pub mod transport;
