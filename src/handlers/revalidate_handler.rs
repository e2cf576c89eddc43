//! handlers/revalidate_handler.rs
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppResult;
use crate::handlers::responder;
use crate::models::auth_model::UsuarioAutenticado;
use crate::services::cache_service::{CacheService, RevalidateType};

#[derive(Debug, Deserialize)]
pub struct RevalidateQuery {
    #[serde(rename = "type")]
    pub tipo: RevalidateType,
}

/// POST /api/revalidate?type=
pub async fn revalidate_endpoint(
    usuario: UsuarioAutenticado,
    cache: web::Data<CacheService>,
    query: web::Query<RevalidateQuery>,
) -> AppResult<HttpResponse> {
    let tipo = query.tipo;
    let invalidadas = match tipo.tag() {
        Some(tag) => cache.invalidar(tag),
        None => cache.invalidar_todo(),
    };
    log::info!(
        "Revalidate {:?} pedido por {}: {} entradas invalidadas, quedan {}",
        tipo,
        usuario.usuario_id,
        invalidadas,
        cache.len()
    );
    responder(json!({ "type": tipo, "invalidadas": invalidadas }))
}
