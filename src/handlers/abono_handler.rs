//! handlers/abono_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::handlers::{creado, responder};
use crate::models::abono_model::{AbonosQuery, CrearAbonoRequest, RegistrarPagoBoletaRequest};
use crate::models::auth_model::UsuarioAutenticado;
use crate::services::abono_service::AbonoService;

/// GET /api/playas/{playa_id}/abonos?estado=
pub async fn list_abonos_endpoint(
    usuario: UsuarioAutenticado,
    abono_service: web::Data<AbonoService>,
    path: web::Path<Uuid>,
    query: web::Query<AbonosQuery>,
) -> AppResult<HttpResponse> {
    responder(
        abono_service
            .listar(&usuario, path.into_inner(), query.estado)
            .await?,
    )
}

/// POST /api/abonos
pub async fn create_abono_endpoint(
    usuario: UsuarioAutenticado,
    abono_service: web::Data<AbonoService>,
    body: web::Json<CrearAbonoRequest>,
) -> AppResult<HttpResponse> {
    creado(abono_service.crear(&usuario, body.into_inner()).await?)
}

/// POST /api/abonos/{abono_id}/finalizar
pub async fn finish_abono_endpoint(
    usuario: UsuarioAutenticado,
    abono_service: web::Data<AbonoService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let abono_id = path.into_inner();
    abono_service.finalizar(&usuario, abono_id).await?;
    responder(json!({ "abono_id": abono_id }))
}

/// GET /api/abonos/{abono_id}/boletas
pub async fn list_boletas_endpoint(
    usuario: UsuarioAutenticado,
    abono_service: web::Data<AbonoService>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    responder(abono_service.boletas(&usuario, path.into_inner()).await?)
}

/// POST /api/boletas/{boleta_id}/pagos
pub async fn pay_boleta_endpoint(
    usuario: UsuarioAutenticado,
    abono_service: web::Data<AbonoService>,
    path: web::Path<Uuid>,
    body: web::Json<RegistrarPagoBoletaRequest>,
) -> AppResult<HttpResponse> {
    responder(
        abono_service
            .registrar_pago_boleta(&usuario, path.into_inner(), body.into_inner())
            .await?,
    )
}
