//! handlers/ocupacion_handler.rs
use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::handlers::{creado, responder};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::ocupacion_model::{
    CambiarMetodoPagoRequest, FinalizarOcupacionRequest, OcupacionesQuery,
    RegistrarOcupacionRequest,
};
use crate::services::ocupacion_service::OcupacionService;

/// GET /api/playas/{playa_id}/ocupaciones?estado=&desde=&hasta=
pub async fn list_ocupaciones_endpoint(
    usuario: UsuarioAutenticado,
    ocupacion_service: web::Data<OcupacionService>,
    path: web::Path<Uuid>,
    query: web::Query<OcupacionesQuery>,
) -> AppResult<HttpResponse> {
    responder(
        ocupacion_service
            .listar(&usuario, path.into_inner(), query.into_inner(), Utc::now())
            .await?,
    )
}

/// POST /api/ocupaciones
pub async fn create_ocupacion_endpoint(
    usuario: UsuarioAutenticado,
    ocupacion_service: web::Data<OcupacionService>,
    body: web::Json<RegistrarOcupacionRequest>,
) -> AppResult<HttpResponse> {
    creado(
        ocupacion_service
            .registrar(&usuario, body.into_inner(), Utc::now())
            .await?,
    )
}

/// POST /api/ocupaciones/{ocupacion_id}/finalizar
pub async fn finish_ocupacion_endpoint(
    usuario: UsuarioAutenticado,
    ocupacion_service: web::Data<OcupacionService>,
    path: web::Path<Uuid>,
    body: web::Json<FinalizarOcupacionRequest>,
) -> AppResult<HttpResponse> {
    responder(
        ocupacion_service
            .finalizar(&usuario, path.into_inner(), body.into_inner(), Utc::now())
            .await?,
    )
}

/// PATCH /api/ocupaciones/{ocupacion_id}/metodo-pago
pub async fn change_metodo_pago_endpoint(
    usuario: UsuarioAutenticado,
    ocupacion_service: web::Data<OcupacionService>,
    path: web::Path<Uuid>,
    body: web::Json<CambiarMetodoPagoRequest>,
) -> AppResult<HttpResponse> {
    responder(
        ocupacion_service
            .cambiar_metodo_pago(&usuario, path.into_inner(), body.into_inner(), Utc::now())
            .await?,
    )
}
