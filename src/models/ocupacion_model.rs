//! models/ocupacion_model.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comun_model::{MetodoPago, ModalidadOcupacion, TipoVehiculo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoOcupacion {
    Activo,
    Finalizado,
}

impl EstadoOcupacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoOcupacion::Activo => "ACTIVO",
            EstadoOcupacion::Finalizado => "FINALIZADO",
        }
    }
}

/// Fila de la vista `v_ocupaciones`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ocupacion {
    pub ocupacion_id: Uuid,
    pub playa_id: Uuid,
    pub plaza_id: Option<Uuid>,
    pub patente: String,
    pub tipo_vehiculo: TipoVehiculo,
    pub modalidad_ocupacion: ModalidadOcupacion,
    pub estado: EstadoOcupacion,
    pub hora_ingreso: DateTime<Utc>,
    pub hora_egreso: Option<DateTime<Utc>>,
    pub playero_id: Option<Uuid>,
    pub monto_pago: Option<f64>,
    pub metodo_pago: Option<MetodoPago>,
    pub observaciones: Option<String>,
}

/// Ocupación con los datos calculados para la tabla.
#[derive(Debug, Clone, Serialize)]
pub struct OcupacionVista {
    #[serde(flatten)]
    pub ocupacion: Ocupacion,
    pub duracion: String,
    pub puede_editar_metodo_pago: bool,
    pub horas_restantes_edicion: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcupacionesQuery {
    pub estado: Option<EstadoOcupacion>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrarOcupacionRequest {
    pub playa_id: Uuid,
    pub plaza_id: Uuid,
    pub patente: String,
    pub tipo_vehiculo: TipoVehiculo,
    pub modalidad_ocupacion: ModalidadOcupacion,
    pub observaciones: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalizarOcupacionRequest {
    pub metodo_pago: MetodoPago,
    pub observaciones: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CambiarMetodoPagoRequest {
    pub metodo_pago: MetodoPago,
}
