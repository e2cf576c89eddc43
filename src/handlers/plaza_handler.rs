//! handlers/plaza_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::handlers::{creado, responder};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::plaza_model::{ActualizarPlazaRequest, CrearPlazaRequest};
use crate::services::plaza_service::PlazaService;

/// GET /api/playas/{playa_id}/plazas
pub async fn list_plazas_endpoint(
    usuario: UsuarioAutenticado,
    plaza_service: web::Data<PlazaService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    responder(plaza_service.listar(&usuario, path.into_inner()).await?)
}

/// POST /api/playas/{playa_id}/plazas
pub async fn create_plaza_endpoint(
    usuario: UsuarioAutenticado,
    plaza_service: web::Data<PlazaService>,
    path: web::Path<Uuid>,
    body: web::Json<CrearPlazaRequest>,
) -> AppResult<HttpResponse> {
    creado(
        plaza_service
            .crear(&usuario, path.into_inner(), body.into_inner())
            .await?,
    )
}

/// PUT /api/plazas/{plaza_id}
pub async fn update_plaza_endpoint(
    usuario: UsuarioAutenticado,
    plaza_service: web::Data<PlazaService>,
    path: web::Path<Uuid>,
    body: web::Json<ActualizarPlazaRequest>,
) -> AppResult<HttpResponse> {
    responder(
        plaza_service
            .actualizar(&usuario, path.into_inner(), body.into_inner())
            .await?,
    )
}

/// DELETE /api/plazas/{plaza_id}
pub async fn delete_plaza_endpoint(
    usuario: UsuarioAutenticado,
    plaza_service: web::Data<PlazaService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let plaza_id = path.into_inner();
    plaza_service.eliminar(&usuario, plaza_id).await?;
    responder(json!({ "plaza_id": plaza_id }))
}
