//! extractors/auth_extractor.rs
//! Extractor para las rutas protegidas: `Authorization: Bearer <token>`.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::UsuarioAutenticado;
use crate::services::auth_service::AuthService;

/// Token del header Authorization (sin el prefijo `Bearer `).
pub fn extraer_bearer(req: &HttpRequest) -> AppResult<String> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::NoAutenticado("Falta el header Authorization".into()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::NoAutenticado("Formato de Authorization inválido".into()))
}

impl FromRequest for UsuarioAutenticado {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = extraer_bearer(req);
        let auth_service = req.app_data::<web::Data<AuthService>>().cloned();

        Box::pin(async move {
            let token = token?;
            let auth_service = auth_service
                .ok_or_else(|| AppError::Interno("AuthService no registrado".into()))?;
            auth_service.usuario_desde_token(&token).await
        })
    }
}
