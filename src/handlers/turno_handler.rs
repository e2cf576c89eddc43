//! handlers/turno_handler.rs
use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::handlers::{creado, responder};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::turno_model::{FinalizarTurnoRequest, IniciarTurnoRequest, TurnosQuery};
use crate::services::turno_service::TurnoService;

/// GET /api/playas/{playa_id}/turnos?desde=&hasta=
pub async fn list_turnos_endpoint(
    usuario: UsuarioAutenticado,
    turno_service: web::Data<TurnoService>,
    path: web::Path<Uuid>,
    query: web::Query<TurnosQuery>,
) -> AppResult<HttpResponse> {
    responder(
        turno_service
            .listar(&usuario, path.into_inner(), query.into_inner())
            .await?,
    )
}

/// GET /api/turnos/activo
///
/// `data: null` si el usuario no tiene turno abierto.
pub async fn active_turno_endpoint(
    usuario: UsuarioAutenticado,
    turno_service: web::Data<TurnoService>,
) -> AppResult<HttpResponse> {
    responder(turno_service.activo(&usuario).await?)
}

/// POST /api/turnos
pub async fn start_turno_endpoint(
    usuario: UsuarioAutenticado,
    turno_service: web::Data<TurnoService>,
    body: web::Json<IniciarTurnoRequest>,
) -> AppResult<HttpResponse> {
    creado(
        turno_service
            .iniciar(&usuario, body.into_inner(), Utc::now())
            .await?,
    )
}

/// POST /api/turnos/activo/finalizar
pub async fn finish_turno_endpoint(
    usuario: UsuarioAutenticado,
    turno_service: web::Data<TurnoService>,
    body: web::Json<FinalizarTurnoRequest>,
) -> AppResult<HttpResponse> {
    responder(
        turno_service
            .finalizar(&usuario, body.into_inner(), Utc::now())
            .await?,
    )
}

/// GET /api/turnos/{turno_id}/recaudacion
pub async fn turno_recaudacion_endpoint(
    usuario: UsuarioAutenticado,
    turno_service: web::Data<TurnoService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    responder(turno_service.recaudacion(&usuario, path.into_inner()).await?)
}
