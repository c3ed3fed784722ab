//! Construcción de URLs canónicas y de imágenes

/// Imagen por defecto cuando una entidad no tiene imagen asociada
pub const PLACEHOLDER_IMAGE: &str = "/static/img/placeholder.jpg";

/// URL pública de una imagen almacenada bajo `media_url`
pub fn media_url(base: &str, path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        return path.to_string();
    }

    format!("{}/{}", base.trim_end_matches('/'), path)
}

pub fn category_url(slug: &str) -> String {
    format!("/api/sites?categoria={}", slug)
}

pub fn site_url(slug: &str) -> String {
    format!("/api/sites/{}", slug)
}

pub fn route_url(slug: &str) -> String {
    format!("/api/routes/{}", slug)
}

pub fn establishment_url(slug: &str) -> String {
    format!("/api/establishments/{}", slug)
}

pub fn event_url(slug: &str) -> String {
    format!("/api/events/{}", slug)
}

pub fn transport_url(slug: &str) -> String {
    format!("/api/transport/{}", slug)
}

pub fn craft_url(slug: &str) -> String {
    format!("/api/crafts/{}", slug)
}

pub fn activity_url(slug: &str) -> String {
    format!("/api/activities/{}", slug)
}

pub fn photo_url(slug: &str) -> String {
    format!("/api/photos/{}", slug)
}

pub fn post_url(slug: &str) -> String {
    format!("/api/posts/{}", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_url() {
        assert_eq!(media_url("/media/", "lugares/estrecho.jpg"), "/media/lugares/estrecho.jpg");
        assert_eq!(media_url("https://cdn.example.com/media", "rutas/cafe.jpg"), "https://cdn.example.com/media/rutas/cafe.jpg");
        assert_eq!(media_url("/media/", ""), PLACEHOLDER_IMAGE);
        assert_eq!(media_url("/media/", "https://img.example.com/a.jpg"), "https://img.example.com/a.jpg");
    }

    #[test]
    fn test_detail_urls() {
        assert_eq!(site_url("estrecho-del-magdalena"), "/api/sites/estrecho-del-magdalena");
        assert_eq!(route_url("ruta-del-cafe"), "/api/routes/ruta-del-cafe");
    }
}
