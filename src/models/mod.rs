//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod abono_model;
pub mod analytics_model;
pub mod auth_model;
pub mod catalogo_model;
pub mod comun_model;
pub mod cron_model;
pub mod ocupacion_model;
pub mod playa_model;
pub mod playero_model;
pub mod plaza_model;
pub mod respuesta_model;
pub mod tarifa_model;
pub mod turno_model;
