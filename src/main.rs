use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware, App, HttpServer};
use anyhow::{Context, Result};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::app::Servicios;
use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::cache_service::CacheService;
use crate::services::cron_run_service::CronRunService;
use crate::services::supabase_service::{SharedBackend, SupabaseClient};

mod app;
mod config;
mod errors;
mod extractors;
mod handlers;
mod logger;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod tests;

/// Base SQLite local con el registro de corridas del cron.
async fn setup_database(ruta: &str) -> Result<Pool<Sqlite>> {
    if let Some(carpeta) = Path::new(ruta).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(carpeta)
            .with_context(|| format!("No se pudo crear el directorio {}", carpeta.display()))?;
    }

    log::info!("Conectando a SQLite en {}", ruta);
    let opciones = SqliteConnectOptions::new()
        .filename(ruta)
        .create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(opciones)
        .await
        .context("No se pudo conectar a la base de datos SQLite")
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().context("Configuración inválida")?;
    if config.cron_secret.is_none() {
        log::warn!("CRON_SECRET no configurado: /api/cron queda deshabilitado");
    }

    let db_pool = setup_database(&config.cron_db_path).await?;
    let cron_runs = CronRunService::new(db_pool);
    cron_runs.run_migrations().await?;

    let backend: SharedBackend = Arc::new(SupabaseClient::new(&config)?);
    let cache = CacheService::new(Duration::from_secs(config.cache_ttl_secs));
    let servicios = Servicios::new(backend, cache, cron_runs, config.cron_secret.clone());

    log::info!("Levantando servidor en {}:{}", config.host, config.port);
    HttpServer::new(move || {
        let servicios = servicios.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .configure(|cfg| servicios.registrar(cfg))
            .configure(app::init_app)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("No se pudo escuchar en {}:{}", config.host, config.port))?
    .run()
    .await
    .context("El servidor terminó con error")
}
