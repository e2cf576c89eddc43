//! handlers/playero_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::handlers::{creado, responder};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::playero_model::{
    AceptarInvitacionRequest, AsignarPlayasRequest, CambiarEstadoPlayeroRequest,
    CrearInvitacionRequest, EliminarInvitacionQuery,
};
use crate::services::playero_service::PlayeroService;

/// GET /api/playeros
pub async fn list_playeros_endpoint(
    usuario: UsuarioAutenticado,
    playero_service: web::Data<PlayeroService>,
) -> AppResult<HttpResponse> {
    responder(playero_service.listar(&usuario).await?)
}

/// POST /api/playeros/invitaciones
pub async fn create_invitacion_endpoint(
    usuario: UsuarioAutenticado,
    playero_service: web::Data<PlayeroService>,
    body: web::Json<CrearInvitacionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();
    playero_service.invitar(&usuario, req).await?;
    creado(json!({ "email": email }))
}

/// DELETE /api/playeros/invitaciones?email=
pub async fn delete_invitacion_endpoint(
    usuario: UsuarioAutenticado,
    playero_service: web::Data<PlayeroService>,
    query: web::Query<EliminarInvitacionQuery>,
) -> AppResult<HttpResponse> {
    playero_service
        .eliminar_invitacion(&usuario, &query.email)
        .await?;
    responder(json!({ "email": query.email }))
}

/// POST /api/playeros/invitaciones/aceptar
pub async fn accept_invitacion_endpoint(
    usuario: UsuarioAutenticado,
    playero_service: web::Data<PlayeroService>,
    body: web::Json<AceptarInvitacionRequest>,
) -> AppResult<HttpResponse> {
    playero_service
        .aceptar_invitacion(&usuario, body.into_inner())
        .await?;
    responder(json!({ "usuario_id": usuario.usuario_id }))
}

/// PATCH /api/playeros/{playero_id}/estado
pub async fn change_playero_estado_endpoint(
    usuario: UsuarioAutenticado,
    playero_service: web::Data<PlayeroService>,
    path: web::Path<Uuid>,
    body: web::Json<CambiarEstadoPlayeroRequest>,
) -> AppResult<HttpResponse> {
    let playero_id = path.into_inner();
    let req = body.into_inner();
    let estado = req.estado;
    playero_service
        .cambiar_estado(&usuario, playero_id, req)
        .await?;
    responder(json!({ "playero_id": playero_id, "estado": estado }))
}

/// PUT /api/playeros/{playero_id}/playas
pub async fn assign_playas_endpoint(
    usuario: UsuarioAutenticado,
    playero_service: web::Data<PlayeroService>,
    path: web::Path<Uuid>,
    body: web::Json<AsignarPlayasRequest>,
) -> AppResult<HttpResponse> {
    let playero_id = path.into_inner();
    let req = body.into_inner();
    let playas_ids = req.playas_ids.clone();
    playero_service
        .asignar_playas(&usuario, playero_id, req)
        .await?;
    responder(json!({ "playero_id": playero_id, "playas_ids": playas_ids }))
}
