//! models/playero_model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoPlayero {
    Activo,
    Suspendido,
    Pendiente,
}

/// Fila de la vista `v_playeros` (playeros activos e invitaciones pendientes)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playero {
    pub playero_id: Option<Uuid>,
    pub nombre: Option<String>,
    pub email: String,
    pub estado: EstadoPlayero,
    #[serde(default)]
    pub playas_ids: Vec<Uuid>,
    pub fecha_alta: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrearInvitacionRequest {
    pub email: String,
    pub nombre: String,
    pub playas_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EliminarInvitacionQuery {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AceptarInvitacionRequest {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CambiarEstadoPlayeroRequest {
    pub estado: EstadoPlayero,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AsignarPlayasRequest {
    pub playas_ids: Vec<Uuid>,
}
