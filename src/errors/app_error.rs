//! errors/app_error.rs
//! Error único de la capa HTTP. Cualquier variante se responde con el sobre
//! `{ "data": null, "error": "<mensaje>" }`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::errors::traduccion::traducir_error_db;
use crate::models::respuesta_model::ApiResponse;
use crate::services::supabase_service::DbError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("{mensaje}")]
    Validacion { campo: String, mensaje: String },

    #[error("{0}")]
    NoAutenticado(String),

    #[error("{0}")]
    Prohibido(String),

    #[error("{0}")]
    NoEncontrado(String),

    /// Error devuelto por la base de datos (RPC o tabla). `codigo` es el
    /// SQLSTATE o el código de PostgREST cuando viene informado.
    #[error("{mensaje}")]
    BaseDeDatos {
        mensaje: String,
        codigo: Option<String>,
    },

    #[error("{0}")]
    Interno(String),
}

impl AppError {
    pub fn validacion(campo: &str, mensaje: impl Into<String>) -> Self {
        AppError::Validacion {
            campo: campo.to_string(),
            mensaje: mensaje.into(),
        }
    }

    /// Mensaje que ve el cliente.
    pub fn mensaje_publico(&self) -> String {
        match self {
            AppError::BaseDeDatos { mensaje, .. } => traducir_error_db(mensaje),
            AppError::Interno(_) => "Error interno del servidor".to_string(),
            otro => otro.to_string(),
        }
    }
}

fn status_para_codigo_db(codigo: Option<&str>) -> StatusCode {
    match codigo {
        Some("PGRST116") => StatusCode::NOT_FOUND,
        Some("PGRST301") | Some("PGRST302") => StatusCode::UNAUTHORIZED,
        Some("42501") => StatusCode::FORBIDDEN,
        Some(c) if c.starts_with("22") || c.starts_with("23") || c.starts_with("P0") => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validacion { .. } => StatusCode::BAD_REQUEST,
            AppError::NoAutenticado(_) => StatusCode::UNAUTHORIZED,
            AppError::Prohibido(_) => StatusCode::FORBIDDEN,
            AppError::NoEncontrado(_) => StatusCode::NOT_FOUND,
            AppError::BaseDeDatos { codigo, .. } => status_para_codigo_db(codigo.as_deref()),
            AppError::Interno(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Interno(detalle) = self {
            log::error!("Error interno: {}", detalle);
        }
        HttpResponse::build(self.status_code())
            .json(ApiResponse::<()>::error(self.mensaje_publico()))
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        if err.details.is_some() || err.hint.is_some() {
            log::debug!(
                "Error de base: {} (detalle: {:?}, sugerencia: {:?})",
                err.message,
                err.details,
                err.hint
            );
        }
        AppError::BaseDeDatos {
            mensaje: err.message,
            codigo: err.code,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Interno(format!("{:?}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Interno(format!("Respuesta inesperada de la base de datos: {}", err))
    }
}
