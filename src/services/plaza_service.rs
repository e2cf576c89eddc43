//! services/plaza_service.rs

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::{Rol, UsuarioAutenticado};
use crate::models::plaza_model::{ActualizarPlazaRequest, CrearPlazaRequest, EstadoPlaza, Plaza};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar, decodificar_filas, ConsultaTabla, SharedBackend};
use crate::utils::validacion::texto_requerido;

const TABLA_PLAZA: &str = "plaza";
const MAX_IDENTIFICADOR: usize = 20;

#[derive(Clone)]
pub struct PlazaService {
    db: SharedBackend,
    cache: CacheService,
}

impl PlazaService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        PlazaService { db, cache }
    }

    pub async fn listar(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
    ) -> AppResult<Vec<Plaza>> {
        let clave = format!("plazas:{}:{}", usuario.usuario_id, playa_id);
        self.cache
            .obtener_o_cargar(clave, &[CacheTag::Plazas], move || async move {
                let consulta = ConsultaTabla::new()
                    .select("*")
                    .eq("playa_id", playa_id)
                    .is_null("fecha_eliminacion")
                    .order("identificador", true);
                let filas = self.db.select(TABLA_PLAZA, &consulta, usuario.token()).await?;
                decodificar_filas(filas)
            })
            .await
    }

    pub async fn crear(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
        req: CrearPlazaRequest,
    ) -> AppResult<Plaza> {
        usuario.requiere_rol(Rol::Dueno)?;
        let identificador = texto_requerido("identificador", &req.identificador, MAX_IDENTIFICADOR)?;
        let tipo_plaza_id = req
            .tipo_plaza_id
            .ok_or_else(|| AppError::validacion("tipo_plaza_id", "Seleccioná un tipo de plaza"))?;

        let fila = json!({
            "playa_id": playa_id,
            "tipo_plaza_id": tipo_plaza_id,
            "identificador": identificador,
            "estado": req.estado.unwrap_or(EstadoPlaza::Activo),
        });
        let creada = self.db.insert(TABLA_PLAZA, fila, usuario.token()).await?;
        self.cache.invalidar(CacheTag::Plazas);
        decodificar(creada)
    }

    /// Edición parcial; al menos un campo tiene que venir.
    pub async fn actualizar(
        &self,
        usuario: &UsuarioAutenticado,
        plaza_id: Uuid,
        req: ActualizarPlazaRequest,
    ) -> AppResult<Plaza> {
        usuario.requiere_rol(Rol::Dueno)?;

        let mut cambios = Map::new();
        if let Some(identificador) = &req.identificador {
            let identificador = texto_requerido("identificador", identificador, MAX_IDENTIFICADOR)?;
            cambios.insert("identificador".into(), json!(identificador));
        }
        if let Some(tipo) = req.tipo_plaza_id {
            cambios.insert("tipo_plaza_id".into(), json!(tipo));
        }
        if let Some(estado) = req.estado {
            cambios.insert("estado".into(), json!(estado));
        }
        if cambios.is_empty() {
            return Err(AppError::validacion("plaza", "No hay cambios para guardar"));
        }

        let filas = self
            .db
            .update(
                TABLA_PLAZA,
                &ConsultaTabla::new()
                    .eq("plaza_id", plaza_id)
                    .is_null("fecha_eliminacion"),
                Value::Object(cambios),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar(CacheTag::Plazas);
        decodificar_filas(filas)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoEncontrado("No se encontró la plaza".into()))
    }

    /// `delete_plaza` decide si borra o da de baja lógica según tenga historial.
    pub async fn eliminar(&self, usuario: &UsuarioAutenticado, plaza_id: Uuid) -> AppResult<()> {
        usuario.requiere_rol(Rol::Dueno)?;
        self.db
            .rpc("delete_plaza", json!({ "p_plaza_id": plaza_id }), usuario.token())
            .await?;
        self.cache
            .invalidar_varias(&[CacheTag::Plazas, CacheTag::Ocupaciones]);
        log::info!("Plaza {} eliminada", plaza_id);
        Ok(())
    }
}
