//! models/respuesta_model.rs
//! Sobre uniforme de todas las respuestas de la API.

use serde::{Deserialize, Serialize};

/// `{ "data": ..., "error": null }` o `{ "data": null, "error": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            data: Some(data),
            error: None,
        }
    }

    pub fn error(mensaje: impl Into<String>) -> Self {
        ApiResponse {
            data: None,
            error: Some(mensaje.into()),
        }
    }
}

/// Paginación `?page=&page_size=`
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PaginationQuery {
    /// Página (desde 1) y tamaño, con tope de 100 por página.
    pub fn normalizar(&self) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(10).clamp(1, 100);
        (page, page_size)
    }
}
