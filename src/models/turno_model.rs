//! models/turno_model.rs
//! Turnos de trabajo y arqueo de caja.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turno {
    pub turno_id: Uuid,
    pub playa_id: Uuid,
    pub playero_id: Uuid,
    pub fecha_hora_ingreso: DateTime<Utc>,
    pub fecha_hora_salida: Option<DateTime<Utc>>,
    pub efectivo_inicial: f64,
    pub efectivo_final: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TurnosQuery {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IniciarTurnoRequest {
    pub playa_id: Uuid,
    pub efectivo_inicial: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalizarTurnoRequest {
    pub efectivo_final: f64,
}

/// Lo que devuelve `get_recaudacion_turno`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecaudacionTurnoRaw {
    pub total_efectivo: f64,
    pub total_transferencia: f64,
    pub total_mercado_pago: f64,
    pub total_tarjeta: f64,
    pub cantidad_ocupaciones: i64,
    pub cantidad_boletas: i64,
}

/// Recaudación del turno con el arqueo de caja calculado.
#[derive(Debug, Clone, Serialize)]
pub struct RecaudacionTurno {
    pub turno_id: Uuid,
    #[serde(flatten)]
    pub detalle: RecaudacionTurnoRaw,
    pub total: f64,
    /// Efectivo que debería haber en caja: inicial + cobrado en efectivo
    pub efectivo_esperado: f64,
    /// efectivo_final - efectivo_esperado, sólo con turno cerrado
    pub diferencia_caja: Option<f64>,
}
