//! services/tarifa_service.rs

use serde_json::json;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::auth_model::{Rol, UsuarioAutenticado};
use crate::models::tarifa_model::{GuardarTarifaRequest, Tarifa, TarifaClaveQuery};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar, decodificar_filas, ConsultaTabla, SharedBackend};
use crate::utils::validacion::validar_monto;

const TABLA_TARIFA: &str = "tarifa";
const CLAVE_TARIFA: &str = "playa_id,tipo_plaza_id,modalidad_ocupacion,tipo_vehiculo";

#[derive(Clone)]
pub struct TarifaService {
    db: SharedBackend,
    cache: CacheService,
}

impl TarifaService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        TarifaService { db, cache }
    }

    pub async fn listar(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
    ) -> AppResult<Vec<Tarifa>> {
        let clave = format!("tarifas:{}:{}", usuario.usuario_id, playa_id);
        self.cache
            .obtener_o_cargar(clave, &[CacheTag::Tarifas], move || async move {
                let consulta = ConsultaTabla::new()
                    .select("*")
                    .eq("playa_id", playa_id)
                    .order("tipo_plaza_id", true)
                    .order("modalidad_ocupacion", true);
                let filas = self.db.select(TABLA_TARIFA, &consulta, usuario.token()).await?;
                decodificar_filas(filas)
            })
            .await
    }

    /// Alta o modificación: si ya existe la combinación se pisa el precio.
    pub async fn guardar(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
        req: GuardarTarifaRequest,
    ) -> AppResult<Tarifa> {
        usuario.requiere_rol(Rol::Dueno)?;
        let precio_base = validar_monto("precio_base", req.precio_base)?;

        let fila = json!({
            "playa_id": playa_id,
            "tipo_plaza_id": req.tipo_plaza_id,
            "modalidad_ocupacion": req.modalidad_ocupacion,
            "tipo_vehiculo": req.tipo_vehiculo,
            "precio_base": precio_base,
        });
        let guardada = self
            .db
            .upsert(TABLA_TARIFA, fila, CLAVE_TARIFA, usuario.token())
            .await?;
        self.cache.invalidar(CacheTag::Tarifas);
        decodificar(guardada)
    }

    pub async fn eliminar(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
        clave: TarifaClaveQuery,
    ) -> AppResult<()> {
        usuario.requiere_rol(Rol::Dueno)?;
        let consulta = ConsultaTabla::new()
            .eq("playa_id", playa_id)
            .eq("tipo_plaza_id", clave.tipo_plaza_id)
            .eq("modalidad_ocupacion", clave.modalidad_ocupacion.as_str())
            .eq("tipo_vehiculo", clave.tipo_vehiculo.as_str());
        self.db.delete(TABLA_TARIFA, &consulta, usuario.token()).await?;
        self.cache.invalidar(CacheTag::Tarifas);
        Ok(())
    }
}
