//! handlers/cron_handler.rs
//! Endpoints del scheduler externo. No usan el usuario de la sesión sino el
//! secreto `CRON_SECRET`.
use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::AppResult;
use crate::handlers::responder;
use crate::models::respuesta_model::PaginationQuery;
use crate::services::cron_service::CronService;

fn authorization(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
}

/// POST /api/cron/boletas
pub async fn run_boletas_endpoint(
    req: HttpRequest,
    cron_service: web::Data<CronService>,
) -> AppResult<HttpResponse> {
    cron_service.autorizar(authorization(&req))?;
    responder(cron_service.ejecutar().await?)
}

/// GET /api/cron/runs?page=&page_size=
pub async fn list_runs_endpoint(
    req: HttpRequest,
    cron_service: web::Data<CronService>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    cron_service.autorizar(authorization(&req))?;
    let (page, page_size) = query.normalizar();
    responder(cron_service.listar_corridas(page, page_size).await?)
}

/// GET /api/cron/runs/{id}
pub async fn get_run_endpoint(
    req: HttpRequest,
    cron_service: web::Data<CronService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    cron_service.autorizar(authorization(&req))?;
    responder(cron_service.obtener_corrida(&path.into_inner()).await?)
}
