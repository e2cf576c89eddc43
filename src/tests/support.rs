//! tests/support.rs
//! `DatabaseBackend` en memoria: tablas como vectores de filas JSON, respuestas
//! fijas para las RPC y registro de cada llamada.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use crate::app::Servicios;
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::cron_run_service::CronRunService;
use crate::services::supabase_service::{ConsultaTabla, DatabaseBackend, DbError};

pub const TOKEN_DUENO: &str = "token-dueno";
pub const TOKEN_PLAYERO: &str = "token-playero";

pub fn dueno_id() -> Uuid {
    Uuid::parse_str("11111111-1111-4111-8111-111111111111").unwrap()
}

pub fn playero_id() -> Uuid {
    Uuid::parse_str("22222222-2222-4222-8222-222222222222").unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Llamada {
    pub operacion: &'static str,
    pub nombre: String,
    pub params: Value,
    pub token: Option<String>,
}

#[derive(Default)]
pub struct FakeBackend {
    usuarios: Mutex<HashMap<String, Value>>,
    tablas: Mutex<HashMap<String, Vec<Value>>>,
    rpcs: Mutex<HashMap<String, Result<Value, DbError>>>,
    llamadas: Mutex<Vec<Llamada>>,
}

impl FakeBackend {
    /// Backend con un dueño y un playero ya logueados.
    pub fn new() -> Arc<Self> {
        let fake = FakeBackend::default();
        fake.con_usuario(
            TOKEN_DUENO,
            json!({
                "usuario_id": dueno_id(),
                "email": "duena@playas.com",
                "nombre": "Marta",
                "roles": ["DUENO"],
            }),
        );
        fake.con_usuario(
            TOKEN_PLAYERO,
            json!({
                "usuario_id": playero_id(),
                "email": "playero@playas.com",
                "nombre": null,
                "roles": ["PLAYERO"],
            }),
        );
        Arc::new(fake)
    }

    pub fn con_usuario(&self, token: &str, usuario: Value) {
        self.usuarios
            .lock()
            .unwrap()
            .insert(token.to_string(), usuario);
    }

    pub fn con_filas(&self, tabla: &str, filas: Vec<Value>) {
        self.tablas
            .lock()
            .unwrap()
            .entry(tabla.to_string())
            .or_default()
            .extend(filas);
    }

    pub fn con_rpc(&self, funcion: &str, respuesta: Value) {
        self.rpcs
            .lock()
            .unwrap()
            .insert(funcion.to_string(), Ok(respuesta));
    }

    pub fn con_rpc_error(&self, funcion: &str, error: DbError) {
        self.rpcs
            .lock()
            .unwrap()
            .insert(funcion.to_string(), Err(error));
    }

    pub fn filas(&self, tabla: &str) -> Vec<Value> {
        self.tablas
            .lock()
            .unwrap()
            .get(tabla)
            .cloned()
            .unwrap_or_default()
    }

    pub fn llamadas(&self) -> Vec<Llamada> {
        self.llamadas.lock().unwrap().clone()
    }

    /// Nombres de las RPC llamadas, sin contar la de autenticación.
    pub fn rpcs_llamadas(&self) -> Vec<String> {
        self.llamadas()
            .into_iter()
            .filter(|l| l.operacion == "rpc" && l.nombre != "get_authenticated_user_with_roles")
            .map(|l| l.nombre)
            .collect()
    }

    pub fn cantidad(&self, operacion: &str, nombre: &str) -> usize {
        self.llamadas()
            .iter()
            .filter(|l| l.operacion == operacion && l.nombre == nombre)
            .count()
    }

    fn registrar(&self, operacion: &'static str, nombre: &str, params: Value, token: Option<&str>) {
        self.llamadas.lock().unwrap().push(Llamada {
            operacion,
            nombre: nombre.to_string(),
            params,
            token: token.map(str::to_string),
        });
    }
}

fn mezclar(fila: &mut Value, cambios: &Value) {
    if let (Some(destino), Some(origen)) = (fila.as_object_mut(), cambios.as_object()) {
        for (k, v) in origen {
            destino.insert(k.clone(), v.clone());
        }
    }
}

#[async_trait]
impl DatabaseBackend for FakeBackend {
    async fn rpc(&self, funcion: &str, params: Value, token: Option<&str>) -> Result<Value, DbError> {
        self.registrar("rpc", funcion, params, token);
        if funcion == "get_authenticated_user_with_roles" {
            let usuarios = self.usuarios.lock().unwrap();
            return token
                .and_then(|t| usuarios.get(t).cloned())
                .ok_or_else(|| DbError::new("JWT expired").with_code("PGRST301"));
        }
        self.rpcs
            .lock()
            .unwrap()
            .get(funcion)
            .cloned()
            .unwrap_or_else(|| {
                Err(DbError::new(format!("Could not find the function public.{}", funcion))
                    .with_code("PGRST202"))
            })
    }

    async fn select(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        token: Option<&str>,
    ) -> Result<Vec<Value>, DbError> {
        self.registrar("select", tabla, Value::Null, token);
        let filas = self.filas(tabla);
        let limite = consulta.limite().unwrap_or(u64::MAX) as usize;
        Ok(filas
            .into_iter()
            .filter(|f| consulta.coincide(f))
            .take(limite)
            .collect())
    }

    async fn insert(&self, tabla: &str, fila: Value, token: Option<&str>) -> Result<Value, DbError> {
        self.registrar("insert", tabla, fila.clone(), token);
        let mut fila = fila;
        let columna_id = format!("{}_id", tabla);
        if fila.get(&columna_id).is_none() {
            fila[columna_id.as_str()] = json!(Uuid::new_v4());
        }
        self.con_filas(tabla, vec![fila.clone()]);
        Ok(fila)
    }

    async fn upsert(
        &self,
        tabla: &str,
        fila: Value,
        on_conflict: &str,
        token: Option<&str>,
    ) -> Result<Value, DbError> {
        self.registrar("upsert", tabla, fila.clone(), token);
        let columnas: Vec<&str> = on_conflict.split(',').collect();
        let mut tablas = self.tablas.lock().unwrap();
        let filas = tablas.entry(tabla.to_string()).or_default();
        match filas
            .iter_mut()
            .find(|f| columnas.iter().all(|c| f.get(*c) == fila.get(*c)))
        {
            Some(existente) => {
                mezclar(existente, &fila);
                Ok(existente.clone())
            }
            None => {
                filas.push(fila.clone());
                Ok(fila)
            }
        }
    }

    async fn update(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        cambios: Value,
        token: Option<&str>,
    ) -> Result<Vec<Value>, DbError> {
        self.registrar("update", tabla, cambios.clone(), token);
        let mut tablas = self.tablas.lock().unwrap();
        let mut modificadas = Vec::new();
        if let Some(filas) = tablas.get_mut(tabla) {
            for fila in filas.iter_mut().filter(|f| consulta.coincide(f)) {
                mezclar(fila, &cambios);
                modificadas.push(fila.clone());
            }
        }
        Ok(modificadas)
    }

    async fn delete(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        token: Option<&str>,
    ) -> Result<(), DbError> {
        self.registrar("delete", tabla, Value::Null, token);
        if let Some(filas) = self.tablas.lock().unwrap().get_mut(tabla) {
            filas.retain(|f| !consulta.coincide(f));
        }
        Ok(())
    }
}

/// Registro del cron sobre SQLite en memoria, con migraciones corridas.
pub async fn cron_runs_en_memoria() -> CronRunService {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("sqlite en memoria");
    let runs = CronRunService::new(pool);
    runs.run_migrations().await.expect("migraciones");
    runs
}

pub async fn servicios(backend: Arc<FakeBackend>, cron_secret: Option<&str>) -> Servicios {
    Servicios::new(
        backend,
        CacheService::new(Duration::from_secs(60)),
        cron_runs_en_memoria().await,
        cron_secret.map(str::to_string),
    )
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub const TODAS_LAS_ETIQUETAS: [CacheTag; 9] = [
    CacheTag::Playas,
    CacheTag::Plazas,
    CacheTag::Tarifas,
    CacheTag::Abonos,
    CacheTag::Ocupaciones,
    CacheTag::Turnos,
    CacheTag::Playeros,
    CacheTag::Recaudacion,
    CacheTag::Catalogo,
];

/// Deja una entrada cacheada por etiqueta.
pub async fn sembrar_cache(cache: &CacheService) {
    for tag in TODAS_LAS_ETIQUETAS {
        let _: bool = cache
            .obtener_o_cargar(format!("sembrada:{:?}", tag), &[tag], || async { Ok(true) })
            .await
            .unwrap();
    }
}

/// Etiquetas cuya entrada sembrada desapareció, en el orden de
/// `TODAS_LAS_ETIQUETAS`.
pub async fn etiquetas_invalidadas(cache: &CacheService) -> Vec<CacheTag> {
    let mut invalidadas = Vec::new();
    for tag in TODAS_LAS_ETIQUETAS {
        let sigue: bool = cache
            .obtener_o_cargar(format!("sembrada:{:?}", tag), &[tag], || async { Ok(false) })
            .await
            .unwrap();
        if !sigue {
            invalidadas.push(tag);
        }
    }
    invalidadas
}
