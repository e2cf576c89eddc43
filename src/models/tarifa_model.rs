//! models/tarifa_model.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::comun_model::{ModalidadOcupacion, TipoVehiculo};

/// Una tarifa se identifica por playa + tipo de plaza + modalidad + vehículo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tarifa {
    pub playa_id: Uuid,
    pub tipo_plaza_id: i64,
    pub modalidad_ocupacion: ModalidadOcupacion,
    pub tipo_vehiculo: TipoVehiculo,
    pub precio_base: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardarTarifaRequest {
    pub tipo_plaza_id: i64,
    pub modalidad_ocupacion: ModalidadOcupacion,
    pub tipo_vehiculo: TipoVehiculo,
    pub precio_base: f64,
}

/// Clave compuesta en el query string para borrar.
#[derive(Debug, Clone, Deserialize)]
pub struct TarifaClaveQuery {
    pub tipo_plaza_id: i64,
    pub modalidad_ocupacion: ModalidadOcupacion,
    pub tipo_vehiculo: TipoVehiculo,
}
