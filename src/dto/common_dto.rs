//! Estructuras de respuesta compartidas por todos los módulos

use serde::{Deserialize, Serialize};

/// Response genérica con mensaje
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// Página resuelta: número, tamaño fijo y desplazamiento SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub per_page: i64,
}

impl Page {
    pub fn new(requested: Option<i64>, per_page: i64) -> Self {
        Self {
            number: requested.filter(|p| *p >= 1).unwrap_or(1),
            per_page,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Response paginada para listados públicos
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, page: Page) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + page.per_page - 1) / page.per_page
        };

        Self {
            items,
            total,
            page: page.number,
            per_page: page.per_page,
            total_pages,
        }
    }

    /// Transformar los elementos conservando los datos de paginación
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Lista de ids para acciones masivas del panel de administración
#[derive(Debug, Deserialize)]
pub struct BulkIdsRequest {
    pub ids: Vec<uuid::Uuid>,
}

/// Resultado de una acción masiva
#[derive(Debug, Serialize)]
pub struct BulkActionResponse {
    pub affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_offset() {
        let page = Page::new(None, 12);
        assert_eq!(page.number, 1);
        assert_eq!(page.offset(), 0);

        let page = Page::new(Some(3), 12);
        assert_eq!(page.offset(), 24);
        assert_eq!(page.limit(), 12);

        let page = Page::new(Some(0), 9);
        assert_eq!(page.number, 1);
        let page = Page::new(Some(-4), 9);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn test_total_pages() {
        let response = PaginatedResponse::new(vec![1, 2, 3], 25, Page::new(Some(1), 12));
        assert_eq!(response.total_pages, 3);

        let response: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 0, Page::new(None, 12));
        assert_eq!(response.total_pages, 0);

        let response = PaginatedResponse::new(vec![1], 24, Page::new(Some(2), 12));
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.page, 2);
    }

    #[test]
    fn test_map_keeps_pagination() {
        let response = PaginatedResponse::new(vec![1, 2], 14, Page::new(Some(2), 12));
        let mapped = response.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.total, 14);
        assert_eq!(mapped.page, 2);
    }
}
