//! utils/ocupacion.rs
//! Ventana para corregir el método de pago de una ocupación finalizada.

use chrono::{DateTime, Utc};

use crate::models::ocupacion_model::EstadoOcupacion;

/// Horas desde el egreso durante las cuales se puede corregir el método de pago.
pub const HORAS_LIMITE_EDICION_PAGO: f64 = 48.0;

fn horas_desde(egreso: DateTime<Utc>, ahora: DateTime<Utc>) -> f64 {
    (ahora - egreso).num_seconds() as f64 / 3600.0
}

pub fn puede_editar_metodo_pago(
    estado: EstadoOcupacion,
    hora_egreso: Option<DateTime<Utc>>,
    ahora: DateTime<Utc>,
) -> bool {
    match (estado, hora_egreso) {
        (EstadoOcupacion::Finalizado, Some(egreso)) => {
            horas_desde(egreso, ahora) < HORAS_LIMITE_EDICION_PAGO
        }
        _ => false,
    }
}

/// Horas que le quedan a la ventana de edición, `None` si ya está cerrada.
pub fn horas_restantes_edicion(
    estado: EstadoOcupacion,
    hora_egreso: Option<DateTime<Utc>>,
    ahora: DateTime<Utc>,
) -> Option<f64> {
    if !puede_editar_metodo_pago(estado, hora_egreso, ahora) {
        return None;
    }
    hora_egreso.map(|egreso| HORAS_LIMITE_EDICION_PAGO - horas_desde(egreso, ahora))
}
