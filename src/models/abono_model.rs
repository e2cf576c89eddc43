//! models/abono_model.rs
//! Abonos mensuales y sus boletas.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comun_model::{MetodoPago, TipoVehiculo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoAbono {
    Activo,
    Finalizado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoBoleta {
    Pendiente,
    Pagada,
    Vencida,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiculoAbono {
    pub patente: String,
    pub tipo_vehiculo: TipoVehiculo,
}

/// Fila de la vista `v_abonos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Abono {
    pub abono_id: Uuid,
    pub playa_id: Uuid,
    pub plaza_id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    #[serde(default)]
    pub vehiculos: Vec<VehiculoAbono>,
    pub fecha_hora_inicio: DateTime<Utc>,
    pub fecha_fin: Option<DateTime<Utc>>,
    pub precio_mensual: f64,
    pub estado: EstadoAbono,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boleta {
    pub boleta_id: Uuid,
    pub abono_id: Uuid,
    pub fecha_generacion_boleta: NaiveDate,
    pub fecha_vencimiento_boleta: NaiveDate,
    pub monto: f64,
    #[serde(default)]
    pub monto_pagado: f64,
    pub estado: EstadoBoleta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbonosQuery {
    pub estado: Option<EstadoAbono>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrearAbonoRequest {
    pub playa_id: Uuid,
    pub plaza_id: Uuid,
    pub nombre: String,
    pub apellido: String,
    pub dni: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub vehiculos: Vec<VehiculoAbono>,
    /// Si no viene, el abono arranca hoy
    pub fecha_inicio: Option<NaiveDate>,
    pub precio_mensual: f64,
    pub metodo_pago: MetodoPago,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbonoCreado {
    pub abono_id: Uuid,
    pub boleta_id: Option<Uuid>,
    #[serde(default)]
    pub monto_inicial: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrarPagoBoletaRequest {
    pub monto: f64,
    pub metodo_pago: MetodoPago,
}
