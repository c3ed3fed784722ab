//! Utilidades de texto: slugs, truncado y listas separadas por comas

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Generar un slug a partir de un texto.
///
/// Pasa a minúsculas, elimina tildes y diéresis (`á` → `a`, `ñ` → `n`)
/// y colapsa cualquier secuencia de caracteres no alfanuméricos en un `-`.
pub fn slugify(value: &str) -> String {
    let folded: String = value
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect();

    NON_SLUG_CHARS
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Truncar un texto a `max_length` caracteres sin cortar palabras,
/// añadiendo `...` cuando se recorta.
pub fn truncate_chars(value: &str, max_length: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_length {
        return value.to_string();
    }

    let mut truncated: String = chars[..max_length].iter().collect();
    if chars[max_length] != ' ' {
        if let Some(pos) = truncated.rfind(' ') {
            truncated.truncate(pos);
        }
    }

    format!("{}...", truncated.trim_end())
}

/// Separar un campo de texto libre por comas, descartando entradas vacías
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizar un término de búsqueda; `None` si queda vacío
pub fn normalize_term(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Patrón `ILIKE` de subcadena, escapando los comodines de Postgres
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Parques Naturales"), "parques-naturales");
        assert_eq!(slugify("Bus Garzón - San Agustín"), "bus-garzon-san-agustin");
        assert_eq!(slugify("Cerámica Tradicional de Pitalito"), "ceramica-tradicional-de-pitalito");
        assert_eq!(slugify("  ¡Ruta del Café!  "), "ruta-del-cafe");
        assert_eq!(slugify("Año 2024"), "ano-2024");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("corto", 10), "corto");
        assert_eq!(
            truncate_chars("Punto donde el río se estrecha", 14),
            "Punto donde el..."
        );
        assert_eq!(truncate_chars("Punto donde el río", 9), "Punto...");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("wifi, piscina, desayuno, aire acondicionado"),
            vec!["wifi", "piscina", "desayuno", "aire acondicionado"]
        );
        assert_eq!(split_list(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term(Some("  parque ")), Some("parque".to_string()));
        assert_eq!(normalize_term(Some("   ")), None);
        assert_eq!(normalize_term(None), None);
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("parque"), "%parque%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
