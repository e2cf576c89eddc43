//! services/auth_service.rs
//! Resuelve el usuario y sus roles a partir del access token del pedido.

use serde_json::json;

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::UsuarioAutenticado;
use crate::services::supabase_service::{primera_fila, SharedBackend};

const RPC_USUARIO_CON_ROLES: &str = "get_authenticated_user_with_roles";

#[derive(Clone)]
pub struct AuthService {
    db: SharedBackend,
}

impl AuthService {
    pub fn new(db: SharedBackend) -> Self {
        AuthService { db }
    }

    pub async fn usuario_desde_token(&self, token: &str) -> AppResult<UsuarioAutenticado> {
        let valor = self
            .db
            .rpc(RPC_USUARIO_CON_ROLES, json!({}), Some(token))
            .await
            .map_err(|e| {
                let es_sesion = e.message.contains("JWT")
                    || matches!(e.code.as_deref(), Some("PGRST301") | Some("PGRST302"));
                if es_sesion {
                    log::info!("Token rechazado: {}", e.message);
                    AppError::NoAutenticado("Tu sesión no es válida, volvé a iniciar sesión".into())
                } else {
                    AppError::from(e)
                }
            })?;

        let mut usuario: UsuarioAutenticado =
            primera_fila(valor, "el usuario").map_err(|err| match err {
                AppError::NoEncontrado(_) => {
                    AppError::NoAutenticado("Tenés que iniciar sesión".into())
                }
                otro => otro,
            })?;
        usuario.token = token.to_string();
        Ok(usuario)
    }
}
