//! handlers/analytics_handler.rs
use actix_web::{web, HttpResponse};

use crate::errors::AppResult;
use crate::handlers::responder;
use crate::models::analytics_model::{PlayaQuery, RecaudacionQuery};
use crate::models::auth_model::UsuarioAutenticado;
use crate::services::analytics_service::AnalyticsService;

/// GET /api/analytics/recaudacion?playa_id=&desde=&hasta=&agrupacion=
pub async fn recaudacion_endpoint(
    usuario: UsuarioAutenticado,
    analytics_service: web::Data<AnalyticsService>,
    query: web::Query<RecaudacionQuery>,
) -> AppResult<HttpResponse> {
    responder(
        analytics_service
            .recaudacion(&usuario, query.into_inner())
            .await?,
    )
}

/// GET /api/analytics/ocupacion?playa_id=
pub async fn ocupacion_endpoint(
    usuario: UsuarioAutenticado,
    analytics_service: web::Data<AnalyticsService>,
    query: web::Query<PlayaQuery>,
) -> AppResult<HttpResponse> {
    responder(analytics_service.ocupacion(&usuario, query.playa_id).await?)
}

/// GET /api/analytics/resumen?playa_id=
pub async fn resumen_endpoint(
    usuario: UsuarioAutenticado,
    analytics_service: web::Data<AnalyticsService>,
    query: web::Query<PlayaQuery>,
) -> AppResult<HttpResponse> {
    responder(analytics_service.resumen(&usuario, query.playa_id).await?)
}
