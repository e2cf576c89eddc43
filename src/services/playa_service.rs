//! services/playa_service.rs
//! ABM de playas del dueño.

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::{Rol, UsuarioAutenticado};
use crate::models::playa_model::{EstadoPlaya, GuardarPlayaRequest, Playa};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar_filas, ConsultaTabla, SharedBackend};
use crate::utils::fechas::texto_utc;
use crate::utils::validacion::{texto_opcional, texto_requerido};

const TABLA_PLAYA: &str = "playa";

#[derive(Clone)]
pub struct PlayaService {
    db: SharedBackend,
    cache: CacheService,
}

/// Valida el formulario y arma las columnas a guardar.
pub fn validar_playa(req: &GuardarPlayaRequest) -> AppResult<Value> {
    let nombre = texto_opcional("nombre", req.nombre.as_deref(), 100)?;
    let direccion = texto_requerido("direccion", &req.direccion, 255)?;
    let ciudad_id = req
        .ciudad_id
        .ok_or_else(|| AppError::validacion("ciudad_id", "Seleccioná una ciudad"))?;
    let descripcion = texto_opcional("descripcion", req.descripcion.as_deref(), 500)?;
    let horario = texto_opcional("horario", req.horario.as_deref(), 100)?;

    if let Some(lat) = req.latitud {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::validacion("latitud", "La latitud no es válida"));
        }
    }
    if let Some(lng) = req.longitud {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::validacion("longitud", "La longitud no es válida"));
        }
    }

    Ok(json!({
        "nombre": nombre,
        "direccion": direccion,
        "ciudad_id": ciudad_id,
        "descripcion": descripcion,
        "horario": horario,
        "latitud": req.latitud,
        "longitud": req.longitud,
    }))
}

impl PlayaService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        PlayaService { db, cache }
    }

    fn consulta_playa(id: Uuid) -> ConsultaTabla {
        ConsultaTabla::new()
            .eq("playa_id", id)
            .is_null("fecha_eliminacion")
    }

    /// Playas visibles para el usuario; al dueño se le filtran las propias,
    /// al playero se las recorta la política RLS.
    pub async fn listar(&self, usuario: &UsuarioAutenticado) -> AppResult<Vec<Playa>> {
        let clave = format!("playas:{}", usuario.usuario_id);
        self.cache
            .obtener_o_cargar(clave, &[CacheTag::Playas], move || async move {
                let mut consulta = ConsultaTabla::new().select("*").is_null("fecha_eliminacion");
                if usuario.tiene_rol(Rol::Dueno) {
                    consulta = consulta.eq("playa_dueno_id", usuario.usuario_id);
                }
                let filas = self
                    .db
                    .select(TABLA_PLAYA, &consulta.order("nombre", true), usuario.token())
                    .await?;
                decodificar_filas(filas)
            })
            .await
    }

    pub async fn obtener(&self, usuario: &UsuarioAutenticado, id: Uuid) -> AppResult<Playa> {
        let filas = self
            .db
            .select(
                TABLA_PLAYA,
                &Self::consulta_playa(id).select("*").limit(1),
                usuario.token(),
            )
            .await?;
        decodificar_filas(filas)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoEncontrado("No se encontró la playa".into()))
    }

    /// Las playas nuevas quedan en BORRADOR hasta que tengan plazas y tarifas.
    pub async fn crear(
        &self,
        usuario: &UsuarioAutenticado,
        req: GuardarPlayaRequest,
    ) -> AppResult<Playa> {
        usuario.requiere_rol(Rol::Dueno)?;
        let mut fila = validar_playa(&req)?;
        fila["playa_dueno_id"] = json!(usuario.usuario_id);
        fila["estado"] = json!(EstadoPlaya::Borrador);

        let creada = self.db.insert(TABLA_PLAYA, fila, usuario.token()).await?;
        self.cache.invalidar(CacheTag::Playas);
        log::info!("Playa creada por {}", usuario.usuario_id);
        Ok(serde_json::from_value(creada)?)
    }

    pub async fn actualizar(
        &self,
        usuario: &UsuarioAutenticado,
        id: Uuid,
        req: GuardarPlayaRequest,
    ) -> AppResult<Playa> {
        usuario.requiere_rol(Rol::Dueno)?;
        let cambios = validar_playa(&req)?;
        self.actualizar_columnas(usuario, id, cambios).await
    }

    async fn actualizar_columnas(
        &self,
        usuario: &UsuarioAutenticado,
        id: Uuid,
        cambios: Value,
    ) -> AppResult<Playa> {
        let filas = self
            .db
            .update(TABLA_PLAYA, &Self::consulta_playa(id), cambios, usuario.token())
            .await?;
        self.cache.invalidar(CacheTag::Playas);
        decodificar_filas(filas)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoEncontrado("No se encontró la playa".into()))
    }

    /// Para activar una playa tiene que tener al menos una plaza activa y una
    /// tarifa cargada.
    pub async fn cambiar_estado(
        &self,
        usuario: &UsuarioAutenticado,
        id: Uuid,
        estado: EstadoPlaya,
    ) -> AppResult<Playa> {
        usuario.requiere_rol(Rol::Dueno)?;

        if estado == EstadoPlaya::Activo {
            let plazas = self
                .db
                .select(
                    "plaza",
                    &ConsultaTabla::new()
                        .select("plaza_id")
                        .eq("playa_id", id)
                        .eq("estado", "ACTIVO")
                        .is_null("fecha_eliminacion")
                        .limit(1),
                    usuario.token(),
                )
                .await?;
            if plazas.is_empty() {
                return Err(AppError::validacion(
                    "estado",
                    "La playa necesita al menos una plaza activa para activarse",
                ));
            }
            let tarifas = self
                .db
                .select(
                    "tarifa",
                    &ConsultaTabla::new().select("playa_id").eq("playa_id", id).limit(1),
                    usuario.token(),
                )
                .await?;
            if tarifas.is_empty() {
                return Err(AppError::validacion(
                    "estado",
                    "La playa necesita al menos una tarifa para activarse",
                ));
            }
        }

        let playa = self
            .actualizar_columnas(usuario, id, json!({ "estado": estado }))
            .await?;
        log::info!("Playa {} pasó a {:?}", id, estado);
        Ok(playa)
    }

    /// Baja lógica
    pub async fn eliminar(&self, usuario: &UsuarioAutenticado, id: Uuid) -> AppResult<()> {
        usuario.requiere_rol(Rol::Dueno)?;
        self.actualizar_columnas(
            usuario,
            id,
            json!({ "fecha_eliminacion": texto_utc(Utc::now()) }),
        )
        .await?;
        self.cache.invalidar_varias(&[CacheTag::Plazas, CacheTag::Tarifas]);
        Ok(())
    }
}
