//! handlers/auth_handler.rs
use actix_web::HttpResponse;

use crate::errors::AppResult;
use crate::handlers::responder;
use crate::models::auth_model::UsuarioAutenticado;

/// GET /api/me
pub async fn me_endpoint(usuario: UsuarioAutenticado) -> AppResult<HttpResponse> {
    responder(usuario)
}
