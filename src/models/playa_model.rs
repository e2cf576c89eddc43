//! models/playa_model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoPlaya {
    Borrador,
    Activo,
    Suspendido,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playa {
    pub playa_id: Uuid,
    pub playa_dueno_id: Uuid,
    pub nombre: Option<String>,
    pub direccion: String,
    pub ciudad_id: i64,
    pub descripcion: Option<String>,
    pub horario: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub estado: EstadoPlaya,
    pub fecha_creacion: Option<DateTime<Utc>>,
}

/// Body de alta y de edición de una playa
#[derive(Debug, Clone, Deserialize)]
pub struct GuardarPlayaRequest {
    pub nombre: Option<String>,
    pub direccion: String,
    pub ciudad_id: Option<i64>,
    pub descripcion: Option<String>,
    pub horario: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CambiarEstadoPlayaRequest {
    pub estado: EstadoPlaya,
}
