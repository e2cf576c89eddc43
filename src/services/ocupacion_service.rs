//! services/ocupacion_service.rs
//! Ingresos, egresos y corrección del método de pago de las ocupaciones.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::ocupacion_model::{
    CambiarMetodoPagoRequest, FinalizarOcupacionRequest, Ocupacion, OcupacionVista,
    OcupacionesQuery, RegistrarOcupacionRequest,
};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar_filas, primera_fila, ConsultaTabla, SharedBackend};
use crate::utils::billing::redondear_2;
use crate::utils::fechas::{fin_dia_utc, inicio_dia_utc, texto_utc};
use crate::utils::formato::formatear_duracion;
use crate::utils::ocupacion::{
    horas_restantes_edicion, puede_editar_metodo_pago, HORAS_LIMITE_EDICION_PAGO,
};
use crate::utils::validacion::{texto_opcional, validar_patente, validar_rango_fechas};

const VISTA_OCUPACIONES: &str = "v_ocupaciones";
const MAX_FILAS_LISTADO: u64 = 500;

/// Agrega duración y ventana de edición a una ocupación.
pub fn a_vista(ocupacion: Ocupacion, ahora: DateTime<Utc>) -> OcupacionVista {
    let fin = ocupacion.hora_egreso.unwrap_or(ahora);
    let duracion = formatear_duracion((fin - ocupacion.hora_ingreso).num_minutes());
    let horas_restantes = horas_restantes_edicion(ocupacion.estado, ocupacion.hora_egreso, ahora)
        .map(redondear_2);
    OcupacionVista {
        ocupacion,
        duracion,
        puede_editar_metodo_pago: horas_restantes.is_some(),
        horas_restantes_edicion: horas_restantes,
    }
}

#[derive(Clone)]
pub struct OcupacionService {
    db: SharedBackend,
    cache: CacheService,
}

impl OcupacionService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        OcupacionService { db, cache }
    }

    pub async fn listar(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
        filtro: OcupacionesQuery,
        ahora: DateTime<Utc>,
    ) -> AppResult<Vec<OcupacionVista>> {
        validar_rango_fechas(filtro.desde, filtro.hasta)?;

        let clave = format!(
            "ocupaciones:{}:{}:{:?}:{:?}:{:?}",
            usuario.usuario_id, playa_id, filtro.estado, filtro.desde, filtro.hasta
        );
        let ocupaciones: Vec<Ocupacion> = self
            .cache
            .obtener_o_cargar(clave, &[CacheTag::Ocupaciones], move || async move {
                let mut consulta = ConsultaTabla::new().select("*").eq("playa_id", playa_id);
                if let Some(estado) = filtro.estado {
                    consulta = consulta.eq("estado", estado.as_str());
                }
                if let Some(desde) = filtro.desde {
                    consulta = consulta.gte("hora_ingreso", texto_utc(inicio_dia_utc(desde)));
                }
                if let Some(hasta) = filtro.hasta {
                    consulta = consulta.lt("hora_ingreso", texto_utc(fin_dia_utc(hasta)));
                }
                let consulta = consulta
                    .order("hora_ingreso", false)
                    .limit(MAX_FILAS_LISTADO);
                let filas = self
                    .db
                    .select(VISTA_OCUPACIONES, &consulta, usuario.token())
                    .await?;
                decodificar_filas(filas)
            })
            .await?;

        Ok(ocupaciones.into_iter().map(|o| a_vista(o, ahora)).collect())
    }

    async fn obtener(&self, usuario: &UsuarioAutenticado, id: Uuid) -> AppResult<Ocupacion> {
        let filas = self
            .db
            .select(
                VISTA_OCUPACIONES,
                &ConsultaTabla::new().select("*").eq("ocupacion_id", id).limit(1),
                usuario.token(),
            )
            .await?;
        decodificar_filas(filas)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoEncontrado("No se encontró la ocupación".into()))
    }

    /// Ingreso de un vehículo. Que la plaza esté libre lo controla la RPC.
    pub async fn registrar(
        &self,
        usuario: &UsuarioAutenticado,
        req: RegistrarOcupacionRequest,
        ahora: DateTime<Utc>,
    ) -> AppResult<OcupacionVista> {
        let patente = validar_patente(&req.patente)?;
        let observaciones = texto_opcional("observaciones", req.observaciones.as_deref(), 500)?;

        let valor = self
            .db
            .rpc(
                "registrar_ocupacion",
                json!({
                    "p_playa_id": req.playa_id,
                    "p_plaza_id": req.plaza_id,
                    "p_patente": patente,
                    "p_tipo_vehiculo": req.tipo_vehiculo,
                    "p_modalidad_ocupacion": req.modalidad_ocupacion,
                    "p_observaciones": observaciones,
                }),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar(CacheTag::Ocupaciones);
        log::info!("Ingreso de {} en playa {}", patente, req.playa_id);
        Ok(a_vista(primera_fila(valor, "la ocupación")?, ahora))
    }

    /// Egreso: la RPC calcula la tarifa y registra el pago.
    pub async fn finalizar(
        &self,
        usuario: &UsuarioAutenticado,
        ocupacion_id: Uuid,
        req: FinalizarOcupacionRequest,
        ahora: DateTime<Utc>,
    ) -> AppResult<OcupacionVista> {
        let observaciones = texto_opcional("observaciones", req.observaciones.as_deref(), 500)?;
        let valor = self
            .db
            .rpc(
                "finalizar_ocupacion",
                json!({
                    "p_ocupacion_id": ocupacion_id,
                    "p_metodo_pago": req.metodo_pago,
                    "p_observaciones": observaciones,
                }),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar_varias(&[
            CacheTag::Ocupaciones,
            CacheTag::Recaudacion,
            CacheTag::Turnos,
        ]);
        Ok(a_vista(primera_fila(valor, "la ocupación")?, ahora))
    }

    /// Corrige el método de pago, sólo dentro de las 48 h posteriores al egreso.
    pub async fn cambiar_metodo_pago(
        &self,
        usuario: &UsuarioAutenticado,
        ocupacion_id: Uuid,
        req: CambiarMetodoPagoRequest,
        ahora: DateTime<Utc>,
    ) -> AppResult<OcupacionVista> {
        let mut ocupacion = self.obtener(usuario, ocupacion_id).await?;
        if !puede_editar_metodo_pago(ocupacion.estado, ocupacion.hora_egreso, ahora) {
            return Err(AppError::validacion(
                "metodo_pago",
                format!(
                    "El método de pago sólo se puede modificar en ocupaciones finalizadas hace menos de {} horas",
                    HORAS_LIMITE_EDICION_PAGO
                ),
            ));
        }

        let actualizados = self
            .db
            .update(
                "pago",
                &ConsultaTabla::new().eq("ocupacion_id", ocupacion_id),
                json!({ "metodo_pago": req.metodo_pago }),
                usuario.token(),
            )
            .await?;
        if actualizados.is_empty() {
            return Err(AppError::NoEncontrado(
                "No se encontró el pago de la ocupación".into(),
            ));
        }

        self.cache.invalidar_varias(&[
            CacheTag::Ocupaciones,
            CacheTag::Recaudacion,
            CacheTag::Turnos,
        ]);
        log::info!(
            "Método de pago de la ocupación {} cambiado a {}",
            ocupacion_id,
            req.metodo_pago.as_str()
        );
        ocupacion.metodo_pago = Some(req.metodo_pago);
        Ok(a_vista(ocupacion, ahora))
    }
}
