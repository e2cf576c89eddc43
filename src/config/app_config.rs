//! config/app_config.rs
//! Configuración global leída del entorno (después de cargar `.env`).

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_role_key: String,
    /// Secreto que tiene que mandar el scheduler en `Authorization: Bearer`.
    /// Sin secreto el endpoint del cron queda deshabilitado.
    pub cron_secret: Option<String>,
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub cron_db_path: String,
    pub cache_ttl_secs: u64,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_role_key: String::new(),
            cron_secret: None,
            host: "0.0.0.0".to_string(),
            port: 5022,
            workers: 2,
            cron_db_path: "data/cron_runs.db".to_string(),
            cache_ttl_secs: 60,
            http_timeout_secs: 15,
        }
    }
}

fn requerida(nombre: &str) -> Result<String> {
    env::var(nombre)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Falta la variable de entorno {}", nombre))
}

fn opcional(nombre: &str) -> Option<String> {
    env::var(nombre).ok().filter(|v| !v.trim().is_empty())
}

fn numerica<T: FromStr>(nombre: &str, por_defecto: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match opcional(nombre) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválida ({}): {}", nombre, v, e)),
        None => Ok(por_defecto),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defecto = AppConfig::default();
        Ok(AppConfig {
            supabase_url: requerida("SUPABASE_URL")?,
            supabase_anon_key: requerida("SUPABASE_ANON_KEY")?,
            supabase_service_role_key: requerida("SUPABASE_SERVICE_ROLE_KEY")?,
            cron_secret: opcional("CRON_SECRET"),
            host: opcional("HOST").unwrap_or(defecto.host),
            port: numerica("PORT", defecto.port)?,
            workers: numerica("WORKERS", defecto.workers)?,
            cron_db_path: opcional("CRON_DB_PATH").unwrap_or(defecto.cron_db_path),
            cache_ttl_secs: numerica("CACHE_TTL_SECS", defecto.cache_ttl_secs)?,
            http_timeout_secs: numerica("HTTP_TIMEOUT_SECS", defecto.http_timeout_secs)?,
        })
    }
}
