//! services/playero_service.rs
//! Playeros de las playas del dueño e invitaciones por email.

use serde_json::json;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::{Rol, UsuarioAutenticado};
use crate::models::playero_model::{
    AceptarInvitacionRequest, AsignarPlayasRequest, CambiarEstadoPlayeroRequest,
    CrearInvitacionRequest, EstadoPlayero, Playero,
};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar_filas, ConsultaTabla, SharedBackend};
use crate::utils::validacion::{texto_requerido, validar_email};

fn validar_playas(playas_ids: &[Uuid]) -> AppResult<()> {
    if playas_ids.is_empty() {
        return Err(AppError::validacion(
            "playas_ids",
            "Seleccioná al menos una playa",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PlayeroService {
    db: SharedBackend,
    cache: CacheService,
}

impl PlayeroService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        PlayeroService { db, cache }
    }

    pub async fn listar(&self, usuario: &UsuarioAutenticado) -> AppResult<Vec<Playero>> {
        usuario.requiere_rol(Rol::Dueno)?;
        let clave = format!("playeros:{}", usuario.usuario_id);
        self.cache
            .obtener_o_cargar(clave, &[CacheTag::Playeros], move || async move {
                let consulta = ConsultaTabla::new()
                    .select("*")
                    .eq("dueno_id", usuario.usuario_id)
                    .order("email", true);
                let filas = self.db.select("v_playeros", &consulta, usuario.token()).await?;
                decodificar_filas(filas)
            })
            .await
    }

    pub async fn invitar(
        &self,
        usuario: &UsuarioAutenticado,
        req: CrearInvitacionRequest,
    ) -> AppResult<()> {
        usuario.requiere_rol(Rol::Dueno)?;
        let email = validar_email(&req.email)?;
        let nombre = texto_requerido("nombre", &req.nombre, 100)?;
        validar_playas(&req.playas_ids)?;

        self.db
            .rpc(
                "crear_invitacion_playero",
                json!({
                    "p_email": email,
                    "p_nombre": nombre,
                    "p_playas_ids": req.playas_ids,
                }),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar(CacheTag::Playeros);
        log::info!("Invitación enviada a {}", email);
        Ok(())
    }

    pub async fn eliminar_invitacion(
        &self,
        usuario: &UsuarioAutenticado,
        email: &str,
    ) -> AppResult<()> {
        usuario.requiere_rol(Rol::Dueno)?;
        let email = validar_email(email)?;
        self.db
            .rpc(
                "eliminar_invitacion_playero",
                json!({ "p_email": email }),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar(CacheTag::Playeros);
        Ok(())
    }

    /// La acepta el propio invitado, con cualquier rol.
    pub async fn aceptar_invitacion(
        &self,
        usuario: &UsuarioAutenticado,
        req: AceptarInvitacionRequest,
    ) -> AppResult<()> {
        let token = texto_requerido("token", &req.token, 200)?;
        self.db
            .rpc(
                "aceptar_invitacion_playero",
                json!({ "p_token": token }),
                usuario.token(),
            )
            .await?;
        self.cache
            .invalidar_varias(&[CacheTag::Playeros, CacheTag::Playas]);
        log::info!("Invitación aceptada por {}", usuario.usuario_id);
        Ok(())
    }

    /// Suspende o reactiva al playero en todas las playas del dueño.
    pub async fn cambiar_estado(
        &self,
        usuario: &UsuarioAutenticado,
        playero_id: Uuid,
        req: CambiarEstadoPlayeroRequest,
    ) -> AppResult<()> {
        usuario.requiere_rol(Rol::Dueno)?;
        if req.estado == EstadoPlayero::Pendiente {
            return Err(AppError::validacion(
                "estado",
                "El estado tiene que ser ACTIVO o SUSPENDIDO",
            ));
        }

        let actualizados = self
            .db
            .update(
                "playero_playa",
                &ConsultaTabla::new()
                    .eq("playero_id", playero_id)
                    .eq("dueno_id", usuario.usuario_id),
                json!({ "estado": req.estado }),
                usuario.token(),
            )
            .await?;
        if actualizados.is_empty() {
            return Err(AppError::NoEncontrado("No se encontró el playero".into()));
        }
        self.cache.invalidar(CacheTag::Playeros);
        Ok(())
    }

    pub async fn asignar_playas(
        &self,
        usuario: &UsuarioAutenticado,
        playero_id: Uuid,
        req: AsignarPlayasRequest,
    ) -> AppResult<()> {
        usuario.requiere_rol(Rol::Dueno)?;
        validar_playas(&req.playas_ids)?;
        self.db
            .rpc(
                "asignar_playas_playero",
                json!({
                    "p_playero_id": playero_id,
                    "p_playas_ids": req.playas_ids,
                }),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar(CacheTag::Playeros);
        Ok(())
    }
}
