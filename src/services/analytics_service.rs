//! services/analytics_service.rs
//! Reportes de recaudación y ocupación armados sobre filas de vistas.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use futures_util::future::try_join;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::analytics_model::{
    Agrupacion, EstadoPlazaFila, OrigenPago, PagoRecaudacion, PeriodoRecaudacion,
    RecaudacionQuery, ReporteOcupacion, ReporteRecaudacion, ResumenPlaya, TotalPorMetodo,
};
use crate::models::auth_model::{Rol, UsuarioAutenticado};
use crate::models::comun_model::MetodoPago;
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar_filas, ConsultaTabla, SharedBackend};
use crate::utils::billing::redondear_2;
use crate::utils::fechas::{fecha_local, fin_dia_utc, hoy_local, inicio_dia_utc, texto_utc};
use crate::utils::formato::formatear_moneda;
use crate::utils::validacion::validar_rango_fechas;

/// Días hacia atrás cuando no se indica `desde`.
const DIAS_POR_DEFECTO: i64 = 30;

fn inicio_periodo(fecha: NaiveDate, agrupacion: Agrupacion) -> NaiveDate {
    match agrupacion {
        Agrupacion::Dia => fecha,
        Agrupacion::Semana => {
            fecha - Duration::days(fecha.weekday().num_days_from_monday() as i64)
        }
        Agrupacion::Mes => fecha.with_day(1).unwrap_or(fecha),
    }
}

/// Agrupa los pagos por período (en fecha local) y por método.
pub fn agregar_recaudacion(pagos: &[PagoRecaudacion], agrupacion: Agrupacion) -> ReporteRecaudacion {
    let mut periodos: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
    let mut metodos: BTreeMap<MetodoPago, (f64, u64)> = BTreeMap::new();
    let mut total_ocupaciones = 0.0;
    let mut total_boletas = 0.0;

    for pago in pagos {
        let periodo = inicio_periodo(fecha_local(pago.fecha), agrupacion);
        let p = periodos.entry(periodo).or_insert((0.0, 0));
        p.0 += pago.monto;
        p.1 += 1;

        let m = metodos.entry(pago.metodo_pago).or_insert((0.0, 0));
        m.0 += pago.monto;
        m.1 += 1;

        match pago.origen {
            OrigenPago::Ocupacion => total_ocupaciones += pago.monto,
            OrigenPago::Boleta => total_boletas += pago.monto,
        }
    }

    let total = redondear_2(total_ocupaciones + total_boletas);
    let cantidad = pagos.len() as u64;
    let ticket_promedio = if cantidad == 0 {
        0.0
    } else {
        redondear_2(total / cantidad as f64)
    };

    ReporteRecaudacion {
        agrupacion,
        periodos: periodos
            .into_iter()
            .map(|(periodo, (total, cantidad))| PeriodoRecaudacion {
                periodo,
                total: redondear_2(total),
                cantidad,
            })
            .collect(),
        por_metodo: metodos
            .into_iter()
            .map(|(metodo_pago, (total, cantidad))| TotalPorMetodo {
                metodo_pago,
                total: redondear_2(total),
                cantidad,
            })
            .collect(),
        total,
        total_ocupaciones: redondear_2(total_ocupaciones),
        total_boletas: redondear_2(total_boletas),
        cantidad,
        ticket_promedio,
        total_formateado: formatear_moneda(total),
    }
}

/// Las plazas suspendidas no cuentan para el porcentaje, salvo que tengan
/// un vehículo adentro.
pub fn calcular_ocupacion(filas: &[EstadoPlazaFila]) -> ReporteOcupacion {
    let total_plazas = filas.len() as u64;
    let ocupadas = filas.iter().filter(|f| f.ocupada).count() as u64;
    let suspendidas = filas.iter().filter(|f| !f.habilitada && !f.ocupada).count() as u64;
    let libres = total_plazas - ocupadas - suspendidas;
    let disponibles = ocupadas + libres;
    let porcentaje_ocupacion = if disponibles == 0 {
        0.0
    } else {
        redondear_2(ocupadas as f64 * 100.0 / disponibles as f64)
    };

    ReporteOcupacion {
        total_plazas,
        ocupadas,
        libres,
        suspendidas,
        porcentaje_ocupacion,
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    db: SharedBackend,
    cache: CacheService,
}

impl AnalyticsService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        AnalyticsService { db, cache }
    }

    pub async fn recaudacion(
        &self,
        usuario: &UsuarioAutenticado,
        filtro: RecaudacionQuery,
    ) -> AppResult<ReporteRecaudacion> {
        usuario.requiere_rol(Rol::Dueno)?;
        validar_rango_fechas(filtro.desde, filtro.hasta)?;

        let hasta = filtro.hasta.unwrap_or_else(hoy_local);
        let desde = filtro
            .desde
            .unwrap_or(hasta - Duration::days(DIAS_POR_DEFECTO - 1));
        let agrupacion = filtro.agrupacion.unwrap_or_default();
        let playa_id = filtro.playa_id;

        let clave = format!(
            "recaudacion:{}:{:?}:{}:{}",
            usuario.usuario_id, playa_id, desde, hasta
        );
        let pagos: Vec<PagoRecaudacion> = self
            .cache
            .obtener_o_cargar(clave, &[CacheTag::Recaudacion], move || async move {
                let mut consulta = ConsultaTabla::new()
                    .select("fecha,monto,metodo_pago,origen")
                    .gte("fecha", texto_utc(inicio_dia_utc(desde)))
                    .lt("fecha", texto_utc(fin_dia_utc(hasta)));
                if let Some(playa_id) = playa_id {
                    consulta = consulta.eq("playa_id", playa_id);
                }
                let filas = self
                    .db
                    .select("v_recaudacion", &consulta.order("fecha", true), usuario.token())
                    .await?;
                decodificar_filas(filas)
            })
            .await?;

        log::debug!(
            "Recaudación {}..{} ({}): {} pagos",
            desde,
            hasta,
            agrupacion.as_str(),
            pagos.len()
        );
        Ok(agregar_recaudacion(&pagos, agrupacion))
    }

    pub async fn ocupacion(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
    ) -> AppResult<ReporteOcupacion> {
        let consulta = ConsultaTabla::new().select("*").eq("playa_id", playa_id);
        let filas = self
            .db
            .select("v_plazas_estado", &consulta, usuario.token())
            .await?;
        let filas: Vec<EstadoPlazaFila> = decodificar_filas(filas)?;
        Ok(calcular_ocupacion(&filas))
    }

    /// Recaudación de los últimos 30 días y ocupación actual, en paralelo.
    pub async fn resumen(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
    ) -> AppResult<ResumenPlaya> {
        let filtro = RecaudacionQuery {
            playa_id: Some(playa_id),
            desde: None,
            hasta: None,
            agrupacion: None,
        };
        let (recaudacion, ocupacion) = try_join(
            self.recaudacion(usuario, filtro),
            self.ocupacion(usuario, playa_id),
        )
        .await?;

        Ok(ResumenPlaya {
            playa_id,
            recaudacion,
            ocupacion,
        })
    }
}
