//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! que se usan desde los `#[validate(custom = ...)]` de los requests
//! y desde los controladores.

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::field_error;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

/// Validar latitud en [-90, 90]
pub fn validate_latitude(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        let mut error = field_error("latitude", "La latitud debe estar entre -90 y 90");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar longitud en [-180, 180]
pub fn validate_longitude(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        let mut error = field_error("longitude", "La longitud debe estar entre -180 y 180");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar un par de coordenadas GPS, acumulando los errores por campo
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = validate_latitude(lat) {
        errors.add("latitude", e);
    }
    if let Err(e) = validate_longitude(lng) {
        errors.add("longitude", e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Las coordenadas opcionales deben venir en pareja
pub fn validate_coordinate_pair(lat: Option<f64>, lng: Option<f64>) -> Result<(), ValidationErrors> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => validate_coordinates(lat, lng),
        (None, None) => Ok(()),
        (Some(_), None) => {
            let mut errors = ValidationErrors::new();
            errors.add("longitude", field_error("pair", "Falta la longitud"));
            Err(errors)
        }
        (None, Some(_)) => {
            let mut errors = ValidationErrors::new();
            errors.add("latitude", field_error("pair", "Falta la latitud"));
            Err(errors)
        }
    }
}

/// En una actualización, latitud y longitud se envían juntas (ambas con
/// valor o ambas en `null`)
pub fn validate_coordinate_patch(
    lat: Option<Option<f64>>,
    lng: Option<Option<f64>>,
) -> Result<(), ValidationErrors> {
    match (lat, lng) {
        (None, None) => Ok(()),
        (Some(lat), Some(lng)) => validate_coordinate_pair(lat, lng),
        (Some(_), None) => {
            let mut errors = ValidationErrors::new();
            errors.add("longitude", field_error("pair", "La latitud y la longitud se actualizan juntas"));
            Err(errors)
        }
        (None, Some(_)) => {
            let mut errors = ValidationErrors::new();
            errors.add("latitude", field_error("pair", "La latitud y la longitud se actualizan juntas"));
            Err(errors)
        }
    }
}

/// Validar color de marcador en formato hexadecimal (#abc o #aabbcc)
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR.is_match(value) {
        let mut error = field_error("hex_color", "El color debe tener formato #RRGGBB");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// La configuración de mapa, si existe, debe ser un objeto JSON
pub fn validate_map_config(value: &serde_json::Value) -> Result<(), ValidationError> {
    if !value.is_object() {
        return Err(field_error("map_config", "La configuración del mapa debe ser un objeto JSON"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(2.1975, -75.6514).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());

        let errors = validate_coordinates(91.0, -75.0).unwrap_err();
        assert!(errors.field_errors().contains_key("latitude"));
        assert!(!errors.field_errors().contains_key("longitude"));

        let errors = validate_coordinates(45.0, -181.0).unwrap_err();
        assert!(errors.field_errors().contains_key("longitude"));

        let errors = validate_coordinates(-95.0, 200.0).unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);

        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_validate_coordinate_pair() {
        assert!(validate_coordinate_pair(None, None).is_ok());
        assert!(validate_coordinate_pair(Some(2.19), Some(-75.65)).is_ok());
        assert!(validate_coordinate_pair(Some(2.19), None).is_err());
        assert!(validate_coordinate_pair(None, Some(-75.65)).is_err());
    }

    #[test]
    fn test_validate_coordinate_patch() {
        assert!(validate_coordinate_patch(None, None).is_ok());
        assert!(validate_coordinate_patch(Some(None), Some(None)).is_ok());
        assert!(validate_coordinate_patch(Some(Some(2.19)), Some(Some(-75.65))).is_ok());
        assert!(validate_coordinate_patch(Some(None), None).is_err());
        assert!(validate_coordinate_patch(None, Some(Some(-75.65))).is_err());
        assert!(validate_coordinate_patch(Some(Some(2.19)), Some(None)).is_err());
    }

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#28a745").is_ok());
        assert!(validate_hex_color("#FFF").is_ok());
        assert!(validate_hex_color("green").is_err());
        assert!(validate_hex_color("#12345").is_err());
    }

    #[test]
    fn test_validate_map_config() {
        assert!(validate_map_config(&json!({"zoom": 15})).is_ok());
        assert!(validate_map_config(&json!([1, 2])).is_err());
        assert!(validate_map_config(&json!("zoom")).is_err());
    }
}
