//! models/analytics_model.rs
//! Reportes de recaudación y ocupación.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comun_model::MetodoPago;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrigenPago {
    Ocupacion,
    Boleta,
}

/// Fila de la vista `v_recaudacion`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagoRecaudacion {
    pub fecha: DateTime<Utc>,
    pub monto: f64,
    pub metodo_pago: MetodoPago,
    pub origen: OrigenPago,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agrupacion {
    #[default]
    Dia,
    Semana,
    Mes,
}

impl Agrupacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agrupacion::Dia => "dia",
            Agrupacion::Semana => "semana",
            Agrupacion::Mes => "mes",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecaudacionQuery {
    pub playa_id: Option<Uuid>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
    pub agrupacion: Option<Agrupacion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayaQuery {
    pub playa_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodoRecaudacion {
    /// Primer día del período (día, lunes de la semana o 1ro del mes)
    pub periodo: NaiveDate,
    pub total: f64,
    pub cantidad: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalPorMetodo {
    pub metodo_pago: MetodoPago,
    pub total: f64,
    pub cantidad: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporteRecaudacion {
    pub agrupacion: Agrupacion,
    pub periodos: Vec<PeriodoRecaudacion>,
    pub por_metodo: Vec<TotalPorMetodo>,
    pub total: f64,
    pub total_ocupaciones: f64,
    pub total_boletas: f64,
    pub cantidad: u64,
    pub ticket_promedio: f64,
    pub total_formateado: String,
}

/// Fila de la vista `v_plazas_estado`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstadoPlazaFila {
    pub plaza_id: Uuid,
    pub playa_id: Uuid,
    pub ocupada: bool,
    #[serde(default = "habilitada_por_defecto")]
    pub habilitada: bool,
}

fn habilitada_por_defecto() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporteOcupacion {
    pub total_plazas: u64,
    pub ocupadas: u64,
    pub libres: u64,
    pub suspendidas: u64,
    pub porcentaje_ocupacion: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumenPlaya {
    pub playa_id: Uuid,
    pub recaudacion: ReporteRecaudacion,
    pub ocupacion: ReporteOcupacion,
}
