//! handlers/mod.rs
//! Endpoints HTTP. Todos responden con el sobre `{data, error}`.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::AppResult;
use crate::models::respuesta_model::ApiResponse;

pub mod abono_handler;
pub mod analytics_handler;
pub mod auth_handler;
pub mod catalogo_handler;
pub mod cron_handler;
pub mod ocupacion_handler;
pub mod playa_handler;
pub mod playero_handler;
pub mod plaza_handler;
pub mod revalidate_handler;
pub mod tarifa_handler;
pub mod turno_handler;

/// 200 con `data`
pub fn responder<T: Serialize>(data: T) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// 201 con `data`
pub fn creado<T: Serialize>(data: T) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Created().json(ApiResponse::ok(data)))
}
