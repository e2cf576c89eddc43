//! services/abono_service.rs
//! Abonos mensuales: alta con cobro prorrateado, baja, boletas y pagos.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::abono_model::{
    Abono, AbonoCreado, Boleta, CrearAbonoRequest, EstadoAbono, RegistrarPagoBoletaRequest,
};
use crate::models::auth_model::UsuarioAutenticado;
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::supabase_service::{decodificar_filas, primera_fila, ConsultaTabla, SharedBackend};
use crate::utils::billing::calcular_monto_prorrateado;
use crate::utils::fechas::hoy_local;
use crate::utils::validacion::{
    texto_opcional, texto_requerido, validar_email, validar_monto, validar_patente,
};

/// Parámetros ya validados para `crear_abono`.
#[derive(Debug, Clone, PartialEq)]
pub struct AltaAbono {
    pub params: Value,
    pub monto_inicial: f64,
}

fn validar_dni(dni: &str) -> AppResult<String> {
    let limpio: String = dni.chars().filter(|c| *c != '.' && !c.is_whitespace()).collect();
    let largo_ok = (7..=8).contains(&limpio.len());
    if largo_ok && limpio.chars().all(|c| c.is_ascii_digit()) {
        Ok(limpio)
    } else {
        Err(AppError::validacion("dni", "El DNI debe tener 7 u 8 dígitos"))
    }
}

/// Valida el formulario de alta y calcula el primer cobro prorrateado.
pub fn preparar_alta(req: &CrearAbonoRequest, hoy: NaiveDate) -> AppResult<AltaAbono> {
    let nombre = texto_requerido("nombre", &req.nombre, 100)?;
    let apellido = texto_requerido("apellido", &req.apellido, 100)?;
    let dni = validar_dni(&req.dni)?;
    let email = match req.email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(e) => Some(validar_email(e)?),
    };
    let telefono = texto_opcional("telefono", req.telefono.as_deref(), 30)?;
    let precio_mensual = validar_monto("precio_mensual", req.precio_mensual)?;

    if req.vehiculos.is_empty() {
        return Err(AppError::validacion(
            "vehiculos",
            "El abono tiene que tener al menos un vehículo",
        ));
    }
    let mut vistas = HashSet::new();
    let mut vehiculos = Vec::with_capacity(req.vehiculos.len());
    for v in &req.vehiculos {
        let patente = validar_patente(&v.patente)?;
        if !vistas.insert(patente.clone()) {
            return Err(AppError::validacion(
                "vehiculos",
                format!("La patente {} está repetida", patente),
            ));
        }
        vehiculos.push(json!({ "patente": patente, "tipo_vehiculo": v.tipo_vehiculo }));
    }

    let fecha_inicio = req.fecha_inicio.unwrap_or(hoy);
    if fecha_inicio < hoy {
        return Err(AppError::validacion(
            "fecha_inicio",
            "El abono no puede empezar en una fecha pasada",
        ));
    }
    let monto_inicial = calcular_monto_prorrateado(precio_mensual, fecha_inicio);

    Ok(AltaAbono {
        params: json!({
            "p_playa_id": req.playa_id,
            "p_plaza_id": req.plaza_id,
            "p_nombre": nombre,
            "p_apellido": apellido,
            "p_dni": dni,
            "p_email": email,
            "p_telefono": telefono,
            "p_vehiculos": vehiculos,
            "p_fecha_inicio": fecha_inicio,
            "p_precio_mensual": precio_mensual,
            "p_monto_inicial": monto_inicial,
            "p_metodo_pago": req.metodo_pago,
        }),
        monto_inicial,
    })
}

#[derive(Clone)]
pub struct AbonoService {
    db: SharedBackend,
    cache: CacheService,
}

impl AbonoService {
    pub fn new(db: SharedBackend, cache: CacheService) -> Self {
        AbonoService { db, cache }
    }

    pub async fn listar(
        &self,
        usuario: &UsuarioAutenticado,
        playa_id: Uuid,
        estado: Option<EstadoAbono>,
    ) -> AppResult<Vec<Abono>> {
        let clave = format!("abonos:{}:{}:{:?}", usuario.usuario_id, playa_id, estado);
        self.cache
            .obtener_o_cargar(clave, &[CacheTag::Abonos], move || async move {
                let mut consulta = ConsultaTabla::new().select("*").eq("playa_id", playa_id);
                if let Some(estado) = estado {
                    let estado = match estado {
                        EstadoAbono::Activo => "ACTIVO",
                        EstadoAbono::Finalizado => "FINALIZADO",
                    };
                    consulta = consulta.eq("estado", estado);
                }
                let filas = self
                    .db
                    .select(
                        "v_abonos",
                        &consulta.order("fecha_hora_inicio", false),
                        usuario.token(),
                    )
                    .await?;
                decodificar_filas(filas)
            })
            .await
    }

    pub async fn crear(
        &self,
        usuario: &UsuarioAutenticado,
        req: CrearAbonoRequest,
    ) -> AppResult<AbonoCreado> {
        let alta = preparar_alta(&req, hoy_local())?;
        let valor = self
            .db
            .rpc("crear_abono", alta.params, usuario.token())
            .await?;
        let mut creado: AbonoCreado = primera_fila(valor, "el abono creado")?;
        creado.monto_inicial = alta.monto_inicial;

        self.cache.invalidar_varias(&[
            CacheTag::Abonos,
            CacheTag::Plazas,
            CacheTag::Recaudacion,
        ]);
        log::info!(
            "Abono {} creado, primer cobro {:.2}",
            creado.abono_id,
            creado.monto_inicial
        );
        Ok(creado)
    }

    pub async fn finalizar(&self, usuario: &UsuarioAutenticado, abono_id: Uuid) -> AppResult<()> {
        self.db
            .rpc("finalizar_abono", json!({ "p_abono_id": abono_id }), usuario.token())
            .await?;
        self.cache
            .invalidar_varias(&[CacheTag::Abonos, CacheTag::Plazas]);
        Ok(())
    }

    pub async fn boletas(
        &self,
        usuario: &UsuarioAutenticado,
        abono_id: Uuid,
    ) -> AppResult<Vec<Boleta>> {
        let consulta = ConsultaTabla::new()
            .select("*")
            .eq("abono_id", abono_id)
            .order("fecha_generacion_boleta", false);
        let filas = self.db.select("boleta", &consulta, usuario.token()).await?;
        decodificar_filas(filas)
    }

    pub async fn registrar_pago_boleta(
        &self,
        usuario: &UsuarioAutenticado,
        boleta_id: Uuid,
        req: RegistrarPagoBoletaRequest,
    ) -> AppResult<Boleta> {
        let monto = validar_monto("monto", req.monto)?;
        let valor = self
            .db
            .rpc(
                "registrar_pago_boleta",
                json!({
                    "p_boleta_id": boleta_id,
                    "p_monto": monto,
                    "p_metodo_pago": req.metodo_pago,
                }),
                usuario.token(),
            )
            .await?;
        self.cache.invalidar_varias(&[
            CacheTag::Abonos,
            CacheTag::Recaudacion,
            CacheTag::Turnos,
        ]);
        primera_fila(valor, "la boleta")
    }
}
