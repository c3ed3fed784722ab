//! Exportación de rutas a JSON, GPX 1.1 y KML 2.2
//!
//! La salida es determinista: mismos puntos, mismo documento.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::dto::route_map_dto::ExportFormat;
use crate::models::route::{Difficulty, Route, RoutePoint};
use crate::utils::errors::{AppError, AppResult};

const CREATOR: &str = "Garzón Turismo";

/// Archivo generado listo para descargar
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub content_type: &'static str,
    pub filename: String,
    pub body: String,
}

#[derive(Serialize)]
struct JsonExport<'a> {
    name: &'a str,
    slug: &'a str,
    description: &'a str,
    difficulty: Difficulty,
    distance_km: Decimal,
    estimated_duration: &'a str,
    recommendations: &'a str,
    points: Vec<JsonPoint>,
}

#[derive(Serialize)]
struct JsonPoint {
    order: i16,
    name: String,
    description: String,
    lat: f64,
    lng: f64,
    stay_time: Option<String>,
}

/// Generar el archivo de exportación de una ruta
pub fn export_route(route: &Route, points: &[RoutePoint], format: ExportFormat) -> AppResult<ExportedFile> {
    let body = match format {
        ExportFormat::Json => to_json(route, points)?,
        ExportFormat::Gpx => to_gpx(route, points),
        ExportFormat::Kml => to_kml(route, points),
    };

    Ok(ExportedFile {
        content_type: format.content_type(),
        filename: format!("{}.{}", route.slug, format.extension()),
        body,
    })
}

pub fn to_json(route: &Route, points: &[RoutePoint]) -> AppResult<String> {
    let export = JsonExport {
        name: &route.name,
        slug: &route.slug,
        description: &route.description,
        difficulty: route.difficulty,
        distance_km: route.distance_km,
        estimated_duration: &route.estimated_duration,
        recommendations: &route.recommendations,
        points: points
            .iter()
            .map(|point| JsonPoint {
                order: point.point_order,
                name: point.display_name(),
                description: point.display_description(),
                lat: point.latitude,
                lng: point.longitude,
                stay_time: point.stay_time.clone(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&export)
        .map_err(|e| AppError::Internal(format!("No se pudo serializar la ruta: {}", e)))
}

/// Escapar texto para contenido o atributos XML
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn to_gpx(route: &Route, points: &[RoutePoint]) -> String {
    let mut gpx = String::new();
    gpx.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    gpx.push_str(&format!(
        "<gpx version=\"1.1\" creator=\"{}\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n",
        escape_xml(CREATOR)
    ));
    gpx.push_str("  <metadata>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&route.name)));
    gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(&route.description)));
    gpx.push_str("  </metadata>\n");

    for point in points {
        gpx.push_str(&format!(
            "  <wpt lat=\"{}\" lon=\"{}\">\n",
            point.latitude, point.longitude
        ));
        gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&point.display_name())));
        gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(&point.display_description())));
        gpx.push_str("  </wpt>\n");
    }

    gpx.push_str("  <rte>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&route.name)));
    for point in points {
        gpx.push_str(&format!(
            "    <rtept lat=\"{}\" lon=\"{}\">\n",
            point.latitude, point.longitude
        ));
        gpx.push_str(&format!("      <name>{}</name>\n", escape_xml(&point.display_name())));
        gpx.push_str(&format!("      <desc>{}</desc>\n", escape_xml(&point.display_description())));
        gpx.push_str("    </rtept>\n");
    }
    gpx.push_str("  </rte>\n");
    gpx.push_str("</gpx>\n");
    gpx
}

/// Convertir `#rrggbb` al formato KML `aabbggrr` (opaco)
pub fn kml_color(hex: &str) -> String {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return "ffff7b00".to_string();
    }
    let (r, g, b) = (&hex[0..2], &hex[2..4], &hex[4..6]);
    format!("ff{}{}{}", b, g, r).to_lowercase()
}

pub fn to_kml(route: &Route, points: &[RoutePoint]) -> String {
    let mut kml = String::new();
    kml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    kml.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n");
    kml.push_str("  <Document>\n");
    kml.push_str(&format!("    <name>{}</name>\n", escape_xml(&route.name)));
    kml.push_str(&format!("    <description>{}</description>\n", escape_xml(&route.description)));
    kml.push_str("    <Style id=\"route-line\">\n");
    kml.push_str("      <LineStyle>\n");
    kml.push_str(&format!("        <color>{}</color>\n", kml_color(route.difficulty.color())));
    kml.push_str("        <width>4</width>\n");
    kml.push_str("      </LineStyle>\n");
    kml.push_str("    </Style>\n");

    let coordinates: Vec<String> = points
        .iter()
        .map(|point| format!("{},{},0", point.longitude, point.latitude))
        .collect();

    kml.push_str("    <Placemark>\n");
    kml.push_str(&format!("      <name>{}</name>\n", escape_xml(&route.name)));
    kml.push_str("      <styleUrl>#route-line</styleUrl>\n");
    kml.push_str("      <LineString>\n");
    kml.push_str("        <tessellate>1</tessellate>\n");
    kml.push_str(&format!("        <coordinates>{}</coordinates>\n", coordinates.join(" ")));
    kml.push_str("      </LineString>\n");
    kml.push_str("    </Placemark>\n");

    for point in points {
        kml.push_str("    <Placemark>\n");
        kml.push_str(&format!("      <name>{}</name>\n", escape_xml(&point.display_name())));
        kml.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&point.display_description())
        ));
        kml.push_str("      <Point>\n");
        kml.push_str(&format!(
            "        <coordinates>{},{},0</coordinates>\n",
            point.longitude, point.latitude
        ));
        kml.push_str("      </Point>\n");
        kml.push_str("    </Placemark>\n");
    }

    kml.push_str("  </Document>\n");
    kml.push_str("</kml>\n");
    kml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::tests::point;
    use chrono::Utc;
    use uuid::Uuid;

    fn route() -> Route {
        Route {
            id: Uuid::new_v4(),
            name: "Ruta <Café> & Cacao".to_string(),
            slug: "ruta-cafe-cacao".to_string(),
            description: "Fincas \"tradicionales\"".to_string(),
            estimated_duration: "5 horas".to_string(),
            distance_km: Decimal::new(1820, 2),
            difficulty: Difficulty::Facil,
            recommendations: String::new(),
            main_image: String::new(),
            map_config: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & \"c\" > 'd'"), "a &lt; b &amp; &quot;c&quot; &gt; &apos;d&apos;");
    }

    #[test]
    fn test_gpx_has_waypoints_and_route_points() {
        let points = vec![point(0, 2.10, -75.60), point(1, 2.30, -75.40)];
        let gpx = to_gpx(&route(), &points);

        assert!(gpx.contains("<gpx version=\"1.1\""));
        assert_eq!(gpx.matches("<wpt ").count(), 2);
        assert_eq!(gpx.matches("<rtept ").count(), 2);
        assert!(gpx.contains("<wpt lat=\"2.1\" lon=\"-75.6\">"));
        assert!(gpx.contains("Ruta &lt;Café&gt; &amp; Cacao"));
        assert!(!gpx.contains("<Café>"));
    }

    #[test]
    fn test_kml_line_and_points() {
        let points = vec![point(0, 2.10, -75.60), point(1, 2.30, -75.40)];
        let kml = to_kml(&route(), &points);

        assert!(kml.contains("<coordinates>-75.6,2.1,0 -75.4,2.3,0</coordinates>"));
        assert_eq!(kml.matches("<Point>").count(), 2);
        assert!(kml.contains("<color>ff45a728</color>"));
    }

    #[test]
    fn test_export_is_deterministic() {
        let points = vec![point(0, 2.10, -75.60)];
        let r = route();
        assert_eq!(to_kml(&r, &points), to_kml(&r, &points));
        assert_eq!(to_gpx(&r, &points), to_gpx(&r, &points));
    }

    #[test]
    fn test_export_metadata() {
        let file = export_route(&route(), &[], ExportFormat::Gpx).unwrap();
        assert_eq!(file.content_type, "application/gpx+xml");
        assert_eq!(file.filename, "ruta-cafe-cacao.gpx");

        let file = export_route(&route(), &[point(0, 2.1, -75.6)], ExportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&file.body).unwrap();
        assert_eq!(parsed["points"][0]["name"], "Parada 0");
        assert_eq!(parsed["difficulty"], "facil");
        assert_eq!(file.filename, "ruta-cafe-cacao.json");
    }

    #[test]
    fn test_kml_color_conversion() {
        assert_eq!(kml_color("#dc3545"), "ff4535dc");
        assert_eq!(kml_color("nope"), "ffff7b00");
    }
}
