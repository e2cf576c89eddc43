//! errors/mod.rs
//! Errores de la API y traducción de mensajes que devuelve la base de datos.

pub mod app_error;
pub mod traduccion;

pub use app_error::{AppError, AppResult};
