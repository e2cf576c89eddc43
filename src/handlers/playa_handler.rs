//! handlers/playa_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::handlers::{creado, responder};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::playa_model::{CambiarEstadoPlayaRequest, GuardarPlayaRequest};
use crate::services::playa_service::PlayaService;

/// GET /api/playas
pub async fn list_playas_endpoint(
    usuario: UsuarioAutenticado,
    playa_service: web::Data<PlayaService>,
) -> AppResult<HttpResponse> {
    responder(playa_service.listar(&usuario).await?)
}

/// GET /api/playas/{playa_id}
pub async fn get_playa_endpoint(
    usuario: UsuarioAutenticado,
    playa_service: web::Data<PlayaService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    responder(playa_service.obtener(&usuario, path.into_inner()).await?)
}

/// POST /api/playas
pub async fn create_playa_endpoint(
    usuario: UsuarioAutenticado,
    playa_service: web::Data<PlayaService>,
    body: web::Json<GuardarPlayaRequest>,
) -> AppResult<HttpResponse> {
    creado(playa_service.crear(&usuario, body.into_inner()).await?)
}

/// PUT /api/playas/{playa_id}
pub async fn update_playa_endpoint(
    usuario: UsuarioAutenticado,
    playa_service: web::Data<PlayaService>,
    path: web::Path<Uuid>,
    body: web::Json<GuardarPlayaRequest>,
) -> AppResult<HttpResponse> {
    responder(
        playa_service
            .actualizar(&usuario, path.into_inner(), body.into_inner())
            .await?,
    )
}

/// PATCH /api/playas/{playa_id}/estado
pub async fn change_playa_estado_endpoint(
    usuario: UsuarioAutenticado,
    playa_service: web::Data<PlayaService>,
    path: web::Path<Uuid>,
    body: web::Json<CambiarEstadoPlayaRequest>,
) -> AppResult<HttpResponse> {
    responder(
        playa_service
            .cambiar_estado(&usuario, path.into_inner(), body.into_inner().estado)
            .await?,
    )
}

/// DELETE /api/playas/{playa_id}
pub async fn delete_playa_endpoint(
    usuario: UsuarioAutenticado,
    playa_service: web::Data<PlayaService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let playa_id = path.into_inner();
    playa_service.eliminar(&usuario, playa_id).await?;
    responder(json!({ "playa_id": playa_id }))
}
