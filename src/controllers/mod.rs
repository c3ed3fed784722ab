//! Controllers
//!
//! Cada controller agrupa los casos de uso de un tipo de contenido y devuelve
//! DTOs listos para serializar; las rutas solo extraen parámetros.

pub mod activity_controller;
pub mod auth_controller;
pub mod category_controller;
pub mod contact_controller;
pub mod craft_controller;
pub mod establishment_controller;
pub mod event_controller;
pub mod feedback_controller;
pub mod map_controller;
pub mod photo_controller;
pub mod post_controller;
pub mod route_controller;
pub mod search_controller;
pub mod site_controller;
pub mod stats_controller;
pub mod transport_controller;

use crate::utils::errors::{validation_error, AppResult};
use crate::utils::text::slugify;

/// Slug de una entidad nueva; el nombre debe producir al menos un carácter válido
pub(crate) fn slug_for(field: &'static str, name: &str) -> AppResult<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(validation_error(field, "El nombre no genera un slug válido"));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_for() {
        assert_eq!(slug_for("name", "Mirador La Jagua").unwrap(), "mirador-la-jagua");
        assert!(slug_for("name", "¡¡¡").is_err());
    }
}
