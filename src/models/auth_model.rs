//! models/auth_model.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rol {
    Dueno,
    Playero,
}

/// Usuario resuelto por `get_authenticated_user_with_roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioAutenticado {
    pub usuario_id: Uuid,
    pub email: String,
    pub nombre: Option<String>,
    #[serde(default)]
    pub roles: Vec<Rol>,

    /// Access token del pedido; se reenvía a la base para que apliquen las
    /// políticas RLS del usuario. Nunca se serializa.
    #[serde(skip)]
    pub token: String,
}

impl UsuarioAutenticado {
    pub fn tiene_rol(&self, rol: Rol) -> bool {
        self.roles.contains(&rol)
    }

    pub fn requiere_rol(&self, rol: Rol) -> AppResult<()> {
        if self.tiene_rol(rol) {
            Ok(())
        } else {
            Err(AppError::Prohibido(
                "No tenés permisos para realizar esta acción".to_string(),
            ))
        }
    }

    pub fn token(&self) -> Option<&str> {
        Some(self.token.as_str())
    }
}
