//! services/turno_service.rs
//! Apertura y cierre de turnos, y arqueo de caja.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::auth_model::UsuarioAutenticado;
use crate::models::turno_model::{
    FinalizarTurnoRequest, IniciarTurnoRequest, RecaudacionTurno, RecaudacionTurnoRaw, Turno,
    TurnosQuery,
};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar, decodificar_filas, primera_fila, ConsultaTabla, SharedBackend};
use crate::utils::billing::redondear_2;
use crate::utils::fechas::{fin_dia_utc, inicio_dia_utc, texto_utc};
use crate::utils::validacion::{validar_monto_no_negativo, validar_rango_fechas};

const TABLA_TURNO: &str = "turno";

/// Totales del turno y diferencia de caja (sólo si el turno está cerrado).
pub fn calcular_arqueo(turno: &Turno, raw: RecaudacionTurnoRaw) -> RecaudacionTurno {
    let total = redondear_2(
        raw.total_efectivo + raw.total_transferencia + raw.total_mercado_pago + raw.total_tarjeta,
    );
    let efectivo_esperado = redondear_2(turno.efectivo_inicial + raw.total_efectivo);
    let diferencia_caja = turno
        .efectivo_final
        .map(|final_| redondear_2(final_ - efectivo_esperado));

    RecaudacionTurno {
        turno_id: turno.turno_id,
        detalle: raw,
        total,
        efectivo_esperado,
        diferencia_caja,
    }
}

#[derive(Clone)]
pub struct TurnoService {
    db: SharedBackend,
    cache: CacheService,
}

impl TurnoService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        TurnoService { db, cache }
    }

    pub async fn listar(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
        filtro: TurnosQuery,
    ) -> AppResult<Vec<Turno>> {
        validar_rango_fechas(filtro.desde, filtro.hasta)?;
        let clave = format!(
            "turnos:{}:{}:{:?}:{:?}",
            usuario.usuario_id, playa_id, filtro.desde, filtro.hasta
        );
        self.cache
            .obtener_o_cargar(clave, &[CacheTag::Turnos], move || async move {
                let mut consulta = ConsultaTabla::new().select("*").eq("playa_id", playa_id);
                if let Some(desde) = filtro.desde {
                    consulta =
                        consulta.gte("fecha_hora_ingreso", texto_utc(inicio_dia_utc(desde)));
                }
                if let Some(hasta) = filtro.hasta {
                    consulta = consulta.lt("fecha_hora_ingreso", texto_utc(fin_dia_utc(hasta)));
                }
                let filas = self
                    .db
                    .select(
                        TABLA_TURNO,
                        &consulta.order("fecha_hora_ingreso", false),
                        usuario.token(),
                    )
                    .await?;
                decodificar_filas(filas)
            })
            .await
    }

    /// Turno abierto del usuario, si tiene.
    pub async fn activo(&self, usuario: &UsuarioAutenticado) -> AppResult<Option<Turno>> {
        let consulta = ConsultaTabla::new()
            .select("*")
            .eq("playero_id", usuario.usuario_id)
            .is_null("fecha_hora_salida")
            .limit(1);
        let filas = self.db.select(TABLA_TURNO, &consulta, usuario.token()).await?;
        Ok(decodificar_filas(filas)?.into_iter().next())
    }

    pub async fn iniciar(
        &self,
        usuario: &UsuarioAutenticado,
        req: IniciarTurnoRequest,
        ahora: DateTime<Utc>,
    ) -> AppResult<Turno> {
        let efectivo_inicial = validar_monto_no_negativo("efectivo_inicial", req.efectivo_inicial)?;
        if self.activo(usuario).await?.is_some() {
            return Err(AppError::validacion(
                "turno",
                "Ya tenés un turno abierto, cerralo antes de iniciar otro",
            ));
        }

        let fila = json!({
            "playa_id": req.playa_id,
            "playero_id": usuario.usuario_id,
            "fecha_hora_ingreso": texto_utc(ahora),
            "efectivo_inicial": efectivo_inicial,
        });
        let creado = self.db.insert(TABLA_TURNO, fila, usuario.token()).await?;
        self.cache.invalidar(CacheTag::Turnos);
        log::info!("Turno iniciado por {} en playa {}", usuario.usuario_id, req.playa_id);
        decodificar(creado)
    }

    pub async fn finalizar(
        &self,
        usuario: &UsuarioAutenticado,
        req: FinalizarTurnoRequest,
        ahora: DateTime<Utc>,
    ) -> AppResult<Turno> {
        let efectivo_final = validar_monto_no_negativo("efectivo_final", req.efectivo_final)?;
        let turno = self
            .activo(usuario)
            .await?
            .ok_or_else(|| AppError::NoEncontrado("No tenés un turno abierto".into()))?;

        let filas = self
            .db
            .update(
                TABLA_TURNO,
                &ConsultaTabla::new()
                    .eq("turno_id", turno.turno_id)
                    .is_null("fecha_hora_salida"),
                json!({
                    "fecha_hora_salida": texto_utc(ahora),
                    "efectivo_final": efectivo_final,
                }),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar(CacheTag::Turnos);
        decodificar_filas(filas)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoEncontrado("El turno ya estaba cerrado".into()))
    }

    pub async fn recaudacion(
        &self,
        usuario: &UsuarioAutenticado,
        turno_id: Uuid,
    ) -> AppResult<RecaudacionTurno> {
        let filas = self
            .db
            .select(
                TABLA_TURNO,
                &ConsultaTabla::new().select("*").eq("turno_id", turno_id).limit(1),
                usuario.token(),
            )
            .await?;
        let turno: Turno = decodificar_filas(filas)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NoEncontrado("No se encontró el turno".into()))?;

        let valor = self
            .db
            .rpc(
                "get_recaudacion_turno",
                json!({ "p_turno_id": turno_id }),
                usuario.token(),
            )
            .await?;
        let raw: RecaudacionTurnoRaw = match primera_fila(valor, "la recaudación") {
            Ok(raw) => raw,
            Err(AppError::NoEncontrado(_)) => RecaudacionTurnoRaw::default(),
            Err(e) => return Err(e),
        };
        Ok(calcular_arqueo(&turno, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turno(efectivo_final: Option<f64>) -> Turno {
        Turno {
            turno_id: Uuid::nil(),
            playa_id: Uuid::nil(),
            playero_id: Uuid::nil(),
            fecha_hora_ingreso: Utc::now(),
            fecha_hora_salida: None,
            efectivo_inicial: 1000.0,
            efectivo_final,
        }
    }

    fn raw() -> RecaudacionTurnoRaw {
        RecaudacionTurnoRaw {
            total_efectivo: 5500.5,
            total_transferencia: 2000.0,
            total_mercado_pago: 1000.0,
            total_tarjeta: 0.0,
            cantidad_ocupaciones: 7,
            cantidad_boletas: 1,
        }
    }

    #[test]
    fn arqueo_con_faltante() {
        let r = calcular_arqueo(&turno(Some(6400.0)), raw());
        assert_eq!(r.total, 8500.5);
        assert_eq!(r.efectivo_esperado, 6500.5);
        assert_eq!(r.diferencia_caja, Some(-100.5));
    }

    #[test]
    fn turno_abierto_sin_diferencia() {
        let r = calcular_arqueo(&turno(None), raw());
        assert_eq!(r.diferencia_caja, None);
    }
}
