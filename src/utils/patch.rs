//! Campos anulables en actualizaciones parciales
//!
//! En un request de actualización un campo anulable se modela como
//! `Option<Option<T>>`: ausente deja el valor actual, `null` lo borra y un
//! valor lo reemplaza. Se usan con `#[serde(default, deserialize_with = ...)]`.

use serde::{Deserialize, Deserializer};

/// `null` se conserva como `Some(None)` en lugar de confundirse con ausente
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Igual que [`nullable`], y un texto en blanco también borra
pub fn nullable_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())))
}

/// Resolver un campo anulable contra el valor actual
pub fn apply<T: Clone>(patch: Option<Option<T>>, current: &Option<T>) -> Option<T> {
    match patch {
        Some(value) => value,
        None => current.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        latitude: Option<Option<f64>>,
        #[serde(default, deserialize_with = "nullable_text")]
        icon: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let patch: Patch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(patch.latitude, None);
        assert_eq!(patch.icon, None);

        let patch: Patch = serde_json::from_value(json!({"latitude": null, "icon": null})).unwrap();
        assert_eq!(patch.latitude, Some(None));
        assert_eq!(patch.icon, Some(None));

        let patch: Patch = serde_json::from_value(json!({"latitude": 2.19, "icon": " flag "})).unwrap();
        assert_eq!(patch.latitude, Some(Some(2.19)));
        assert_eq!(patch.icon, Some(Some("flag".to_string())));
    }

    #[test]
    fn test_blank_text_clears() {
        let patch: Patch = serde_json::from_value(json!({"icon": "   "})).unwrap();
        assert_eq!(patch.icon, Some(None));
    }

    #[test]
    fn test_apply_against_current() {
        let current = Some("#ff0000".to_string());
        assert_eq!(apply(None, &current), current);
        assert_eq!(apply(Some(None), &current), None);
        assert_eq!(apply(Some(Some("#00ff00".to_string())), &current).as_deref(), Some("#00ff00"));
    }
}
