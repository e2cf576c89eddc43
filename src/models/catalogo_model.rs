//! models/catalogo_model.rs
//! Tablas de referencia de los formularios.

use serde::{Deserialize, Serialize};

use crate::models::comun_model::TipoVehiculo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ciudad {
    pub ciudad_id: i64,
    pub nombre: String,
    pub provincia: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caracteristica {
    pub caracteristica_id: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehiculo {
    pub patente: String,
    pub tipo_vehiculo: TipoVehiculo,
}
