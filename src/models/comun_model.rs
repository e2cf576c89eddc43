//! models/comun_model.rs
//! Enumerados compartidos por varias entidades.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetodoPago {
    Efectivo,
    Transferencia,
    MercadoPago,
    Tarjeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoVehiculo {
    Automovil,
    Motocicleta,
    Camioneta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModalidadOcupacion {
    PorHora,
    Diaria,
    Semanal,
    Mensual,
}

impl MetodoPago {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetodoPago::Efectivo => "EFECTIVO",
            MetodoPago::Transferencia => "TRANSFERENCIA",
            MetodoPago::MercadoPago => "MERCADO_PAGO",
            MetodoPago::Tarjeta => "TARJETA",
        }
    }
}

impl TipoVehiculo {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoVehiculo::Automovil => "AUTOMOVIL",
            TipoVehiculo::Motocicleta => "MOTOCICLETA",
            TipoVehiculo::Camioneta => "CAMIONETA",
        }
    }
}

impl ModalidadOcupacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalidadOcupacion::PorHora => "POR_HORA",
            ModalidadOcupacion::Diaria => "DIARIA",
            ModalidadOcupacion::Semanal => "SEMANAL",
            ModalidadOcupacion::Mensual => "MENSUAL",
        }
    }
}
