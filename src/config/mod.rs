//! config/mod.rs
//! Configuración de la app (variables de entorno / .env).

pub mod app_config;
