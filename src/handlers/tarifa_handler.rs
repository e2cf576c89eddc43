//! handlers/tarifa_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::handlers::responder;
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::tarifa_model::{GuardarTarifaRequest, TarifaClaveQuery};
use crate::services::tarifa_service::TarifaService;

/// GET /api/playas/{playa_id}/tarifas
pub async fn list_tarifas_endpoint(
    usuario: UsuarioAutenticado,
    tarifa_service: web::Data<TarifaService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    responder(tarifa_service.listar(&usuario, path.into_inner()).await?)
}

/// PUT /api/playas/{playa_id}/tarifas
pub async fn save_tarifa_endpoint(
    usuario: UsuarioAutenticado,
    tarifa_service: web::Data<TarifaService>,
    path: web::Path<Uuid>,
    body: web::Json<GuardarTarifaRequest>,
) -> AppResult<HttpResponse> {
    responder(
        tarifa_service
            .guardar(&usuario, path.into_inner(), body.into_inner())
            .await?,
    )
}

/// DELETE /api/playas/{playa_id}/tarifas?tipo_plaza_id=&modalidad_ocupacion=&tipo_vehiculo=
pub async fn delete_tarifa_endpoint(
    usuario: UsuarioAutenticado,
    tarifa_service: web::Data<TarifaService>,
    path: web::Path<Uuid>,
    query: web::Query<TarifaClaveQuery>,
) -> AppResult<HttpResponse> {
    let clave = query.into_inner();
    let respuesta = json!({
        "tipo_plaza_id": clave.tipo_plaza_id,
        "modalidad_ocupacion": clave.modalidad_ocupacion,
        "tipo_vehiculo": clave.tipo_vehiculo,
    });
    tarifa_service
        .eliminar(&usuario, path.into_inner(), clave)
        .await?;
    responder(respuesta)
}
