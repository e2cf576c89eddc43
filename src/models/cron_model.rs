//! models/cron_model.rs
//! Registro local de las corridas del cron de boletas.

use serde::{Deserialize, Serialize};

pub const JOB_BOLETAS_MENSUALES: &str = "boletas_mensuales";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CronRunRecord {
    pub id: String,
    pub job: String,
    pub status: String, // "pending", "running", "done", "failed"
    pub error_message: Option<String>,
    pub resultado: Option<String>, // JSON devuelto por las RPC
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListCronRunsResponse {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub items: Vec<CronRunRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultadoCronBoletas {
    pub run_id: String,
    pub boletas_generadas: serde_json::Value,
    pub boletas_vencidas: serde_json::Value,
}
