//! services/mod.rs
//! Capa de negocio: cada servicio valida, consulta la base (o el cache) e
//! invalida las etiquetas que correspondan.

pub mod abono_service;
pub mod analytics_service;
pub mod auth_service;
pub mod cache_service;
pub mod catalogo_service;
pub mod cron_run_service;
pub mod cron_service;
pub mod ocupacion_service;
pub mod playa_service;
pub mod playero_service;
pub mod plaza_service;
pub mod supabase_service;
pub mod tarifa_service;
pub mod turno_service;
