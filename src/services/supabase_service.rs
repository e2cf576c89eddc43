//! services/supabase_service.rs
//! Cliente HTTP de la base de datos administrada (PostgREST).
//!
//! Todo lo que la app le pide a la base pasa por el trait `DatabaseBackend`:
//! llamadas a funciones RPC y operaciones simples sobre tablas y vistas. La
//! lógica transaccional (tarifas, cierre de ocupaciones, boletas) vive en las
//! funciones de la base; acá sólo se arma el pedido y se interpreta el error.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::app_config::AppConfig;
use crate::errors::{AppError, AppResult};

/// Error tal como lo devuelve PostgREST: `{message, code, details, hint}`.
#[derive(Debug, Clone, PartialEq, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct DbError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl DbError {
    pub fn new(message: impl Into<String>) -> Self {
        DbError {
            message: message.into(),
            code: None,
            details: None,
            hint: None,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Filtro {
    Eq(String, String),
    Gte(String, String),
    Lt(String, String),
    IsNull(String),
}

/// Filtros, orden y límite de una consulta sobre una tabla o vista.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsultaTabla {
    columnas: Option<String>,
    filtros: Vec<Filtro>,
    orden: Vec<(String, bool)>,
    limite: Option<u64>,
}

impl ConsultaTabla {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columnas: &str) -> Self {
        self.columnas = Some(columnas.to_string());
        self
    }

    pub fn eq(mut self, columna: &str, valor: impl ToString) -> Self {
        self.filtros
            .push(Filtro::Eq(columna.to_string(), valor.to_string()));
        self
    }

    pub fn gte(mut self, columna: &str, valor: impl ToString) -> Self {
        self.filtros
            .push(Filtro::Gte(columna.to_string(), valor.to_string()));
        self
    }

    pub fn lt(mut self, columna: &str, valor: impl ToString) -> Self {
        self.filtros
            .push(Filtro::Lt(columna.to_string(), valor.to_string()));
        self
    }

    pub fn is_null(mut self, columna: &str) -> Self {
        self.filtros.push(Filtro::IsNull(columna.to_string()));
        self
    }

    pub fn order(mut self, columna: &str, ascendente: bool) -> Self {
        self.orden.push((columna.to_string(), ascendente));
        self
    }

    pub fn limit(mut self, limite: u64) -> Self {
        self.limite = Some(limite);
        self
    }

    /// Parámetros de query string con la sintaxis de PostgREST.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(columnas) = &self.columnas {
            params.push(("select".to_string(), columnas.clone()));
        }
        for filtro in &self.filtros {
            let (columna, valor) = match filtro {
                Filtro::Eq(c, v) => (c, format!("eq.{}", v)),
                Filtro::Gte(c, v) => (c, format!("gte.{}", v)),
                Filtro::Lt(c, v) => (c, format!("lt.{}", v)),
                Filtro::IsNull(c) => (c, "is.null".to_string()),
            };
            params.push((columna.clone(), valor));
        }
        if !self.orden.is_empty() {
            let orden = self
                .orden
                .iter()
                .map(|(c, asc)| format!("{}.{}", c, if *asc { "asc" } else { "desc" }))
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), orden));
        }
        if let Some(limite) = self.limite {
            params.push(("limit".to_string(), limite.to_string()));
        }
        params
    }

    /// Evalúa los filtros contra una fila JSON (usado por el backend en memoria
    /// de los tests).
    #[cfg(test)]
    pub fn coincide(&self, fila: &Value) -> bool {
        fn texto(v: Option<&Value>) -> Option<String> {
            match v {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(otro) => Some(otro.to_string()),
            }
        }
        self.filtros.iter().all(|filtro| match filtro {
            Filtro::Eq(c, v) => texto(fila.get(c)).as_deref() == Some(v.as_str()),
            Filtro::Gte(c, v) => texto(fila.get(c)).map_or(false, |x| x.as_str() >= v.as_str()),
            Filtro::Lt(c, v) => texto(fila.get(c)).map_or(false, |x| x.as_str() < v.as_str()),
            Filtro::IsNull(c) => texto(fila.get(c)).is_none(),
        })
    }

    #[cfg(test)]
    pub fn limite(&self) -> Option<u64> {
        self.limite
    }
}

/// Operaciones que la app necesita de la base. `token` es el access token del
/// usuario; `None` usa la service role key (cron).
#[async_trait]
pub trait DatabaseBackend: Send + Sync {
    async fn rpc(&self, funcion: &str, params: Value, token: Option<&str>)
        -> Result<Value, DbError>;

    async fn select(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        token: Option<&str>,
    ) -> Result<Vec<Value>, DbError>;

    /// Inserta una fila y devuelve la fila creada.
    async fn insert(&self, tabla: &str, fila: Value, token: Option<&str>)
        -> Result<Value, DbError>;

    /// Inserta o actualiza según las columnas de `on_conflict`.
    async fn upsert(
        &self,
        tabla: &str,
        fila: Value,
        on_conflict: &str,
        token: Option<&str>,
    ) -> Result<Value, DbError>;

    /// Actualiza las filas que cumplen la consulta y devuelve las modificadas.
    async fn update(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        cambios: Value,
        token: Option<&str>,
    ) -> Result<Vec<Value>, DbError>;

    async fn delete(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        token: Option<&str>,
    ) -> Result<(), DbError>;
}

pub type SharedBackend = Arc<dyn DatabaseBackend>;

/// Deserializa la respuesta de una RPC o fila a un tipo concreto.
pub fn decodificar<T: DeserializeOwned>(valor: Value) -> AppResult<T> {
    Ok(serde_json::from_value(valor)?)
}

pub fn decodificar_filas<T: DeserializeOwned>(filas: Vec<Value>) -> AppResult<Vec<T>> {
    filas.into_iter().map(decodificar).collect()
}

/// Las funciones `RETURNS SETOF` devuelven un array; nos quedamos con la
/// primera fila. `null` o array vacío se reportan como no encontrado.
pub fn primera_fila<T: DeserializeOwned>(valor: Value, que: &str) -> AppResult<T> {
    let fila = match valor {
        Value::Array(filas) => filas.into_iter().next(),
        Value::Null => None,
        otro => Some(otro),
    };
    match fila {
        Some(f) => decodificar(f),
        None => Err(AppError::NoEncontrado(format!("No se encontró {}", que))),
    }
}

#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    rest_url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("No se pudo construir el cliente HTTP")?;

        Ok(SupabaseClient {
            http,
            rest_url: format!("{}/rest/v1", config.supabase_url.trim_end_matches('/')),
            anon_key: config.supabase_anon_key.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
        })
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let (apikey, bearer) = match token {
            Some(t) => (self.anon_key.as_str(), t),
            None => (self.service_role_key.as_str(), self.service_role_key.as_str()),
        };
        self.http
            .request(method, format!("{}/{}", self.rest_url, path))
            .header("apikey", apikey)
            .bearer_auth(bearer)
    }

    async fn enviar(&self, rb: RequestBuilder) -> Result<Value, DbError> {
        let resp = rb
            .send()
            .await
            .map_err(|e| DbError::new(format!("error sending request: {}", e)))?;
        let status = resp.status();
        let cuerpo = resp
            .text()
            .await
            .map_err(|e| DbError::new(format!("error leyendo respuesta: {}", e)))?;

        if status.is_success() {
            if cuerpo.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&cuerpo)
                .map_err(|e| DbError::new(format!("respuesta JSON inválida: {}", e)));
        }

        log::warn!("PostgREST respondió {}: {}", status, cuerpo);
        Err(serde_json::from_str::<DbError>(&cuerpo)
            .unwrap_or_else(|_| DbError::new(format!("HTTP {}: {}", status.as_u16(), cuerpo))))
    }
}

fn como_filas(valor: Value) -> Vec<Value> {
    match valor {
        Value::Array(filas) => filas,
        Value::Null => Vec::new(),
        otro => vec![otro],
    }
}

#[async_trait]
impl DatabaseBackend for SupabaseClient {
    async fn rpc(
        &self,
        funcion: &str,
        params: Value,
        token: Option<&str>,
    ) -> Result<Value, DbError> {
        log::debug!("RPC {}", funcion);
        let rb = self
            .request(Method::POST, &format!("rpc/{}", funcion), token)
            .json(&params);
        self.enviar(rb).await
    }

    async fn select(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        token: Option<&str>,
    ) -> Result<Vec<Value>, DbError> {
        let rb = self
            .request(Method::GET, tabla, token)
            .query(&consulta.query_params());
        self.enviar(rb).await.map(como_filas)
    }

    async fn insert(
        &self,
        tabla: &str,
        fila: Value,
        token: Option<&str>,
    ) -> Result<Value, DbError> {
        let rb = self
            .request(Method::POST, tabla, token)
            .header("Prefer", "return=representation")
            .json(&fila);
        let filas = como_filas(self.enviar(rb).await?);
        Ok(filas.into_iter().next().unwrap_or(Value::Null))
    }

    async fn upsert(
        &self,
        tabla: &str,
        fila: Value,
        on_conflict: &str,
        token: Option<&str>,
    ) -> Result<Value, DbError> {
        let rb = self
            .request(Method::POST, tabla, token)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&fila);
        let filas = como_filas(self.enviar(rb).await?);
        Ok(filas.into_iter().next().unwrap_or(Value::Null))
    }

    async fn update(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        cambios: Value,
        token: Option<&str>,
    ) -> Result<Vec<Value>, DbError> {
        let rb = self
            .request(Method::PATCH, tabla, token)
            .query(&consulta.query_params())
            .header("Prefer", "return=representation")
            .json(&cambios);
        self.enviar(rb).await.map(como_filas)
    }

    async fn delete(
        &self,
        tabla: &str,
        consulta: &ConsultaTabla,
        token: Option<&str>,
    ) -> Result<(), DbError> {
        let rb = self
            .request(Method::DELETE, tabla, token)
            .query(&consulta.query_params());
        self.enviar(rb).await.map(|_| ())
    }
}
