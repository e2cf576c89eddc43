//! models/plaza_model.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoPlaza {
    Activo,
    Suspendido,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plaza {
    pub plaza_id: Uuid,
    pub playa_id: Uuid,
    pub tipo_plaza_id: i64,
    pub identificador: Option<String>,
    pub estado: EstadoPlaza,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrearPlazaRequest {
    pub tipo_plaza_id: Option<i64>,
    pub identificador: String,
    pub estado: Option<EstadoPlaza>,
}

/// Edición parcial: sólo se envían los campos presentes.
#[derive(Debug, Clone, Deserialize)]
pub struct ActualizarPlazaRequest {
    pub tipo_plaza_id: Option<i64>,
    pub identificador: Option<String>,
    pub estado: Option<EstadoPlaza>,
}
