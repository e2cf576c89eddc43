//! services/catalogo_service.rs

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::catalogo_model::{Caracteristica, Ciudad, Vehiculo};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar_filas, ConsultaTabla, SharedBackend};
use crate::utils::validacion::validar_patente;

#[derive(Clone)]
pub struct CatalogoService {
    db: SharedBackend,
    cache: CacheService,
}

impl CatalogoService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        CatalogoService { db, cache }
    }

    /// Las tablas de referencia son iguales para todos los usuarios.
    pub async fn ciudades(&self, usuario: &UsuarioAutenticado) -> AppResult<Vec<Ciudad>> {
        self.cache
            .obtener_o_cargar("catalogo:ciudades".into(), &[CacheTag::Catalogo], move || async move {
                let consulta = ConsultaTabla::new()
                    .select("ciudad_id,nombre,provincia")
                    .order("provincia", true)
                    .order("nombre", true);
                let filas = self.db.select("ciudad", &consulta, usuario.token()).await?;
                decodificar_filas(filas)
            })
            .await
    }

    pub async fn caracteristicas(
        &self,
        usuario: &UsuarioAutenticado,
    ) -> AppResult<Vec<Caracteristica>> {
        self.cache
            .obtener_o_cargar(
                "catalogo:caracteristicas".into(),
                &[CacheTag::Catalogo],
                move || async move {
                    let consulta = ConsultaTabla::new()
                        .select("caracteristica_id,nombre")
                        .order("nombre", true);
                    let filas = self
                        .db
                        .select("caracteristica", &consulta, usuario.token())
                        .await?;
                    decodificar_filas(filas)
                },
            )
            .await
    }

    /// Vehículo ya registrado, para autocompletar el ingreso.
    pub async fn vehiculo(&self, usuario: &UsuarioAutenticado, patente: &str) -> AppResult<Vehiculo> {
        let patente = validar_patente(patente)?;
        let consulta = ConsultaTabla::new()
            .select("patente,tipo_vehiculo")
            .eq("patente", &patente)
            .limit(1);
        let filas = self.db.select("vehiculo", &consulta, usuario.token()).await?;
        decodificar_filas(filas)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoEncontrado(format!("No hay un vehículo con patente {}", patente)))
    }
}
