//! handlers/catalogo_handler.rs
use actix_web::{web, HttpResponse};

use crate::errors::AppResult;
use crate::handlers::responder;
use crate::models::auth_model::UsuarioAutenticado;
use crate::services::catalogo_service::CatalogoService;

/// GET /api/ciudades
pub async fn list_ciudades_endpoint(
    usuario: UsuarioAutenticado,
    catalogo_service: web::Data<CatalogoService>,
) -> AppResult<HttpResponse> {
    responder(catalogo_service.ciudades(&usuario).await?)
}

/// GET /api/caracteristicas
pub async fn list_caracteristicas_endpoint(
    usuario: UsuarioAutenticado,
    catalogo_service: web::Data<CatalogoService>,
) -> AppResult<HttpResponse> {
    responder(catalogo_service.caracteristicas(&usuario).await?)
}

/// GET /api/vehiculos/{patente}
pub async fn get_vehiculo_endpoint(
    usuario: UsuarioAutenticado,
    catalogo_service: web::Data<CatalogoService>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    responder(catalogo_service.vehiculo(&usuario, &path.into_inner()).await?)
}
