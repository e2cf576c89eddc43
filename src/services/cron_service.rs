//! services/cron_service.rs
//! Disparo externo de la generación mensual de boletas.
//!
//! Lo llama un scheduler con `Authorization: Bearer <CRON_SECRET>`. Cada
//! corrida queda registrada en SQLite: pending -> running -> done | failed.

use serde_json::{json, Value};

use crate::errors::{AppError, AppResult};
use crate::models::cron_model::{
    CronRunRecord, ListCronRunsResponse, ResultadoCronBoletas, JOB_BOLETAS_MENSUALES,
};
use crate::services::cache_service::{CacheService, CacheTag};
use crate::services::cron_run_service::CronRunService;
use crate::services::supabase_service::{DbError, SharedBackend};

/// Compara sin cortar en el primer byte distinto. El largo no se oculta.
fn iguales_en_tiempo_constante(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Clone)]
pub struct CronService {
    db: SharedBackend,
    runs: CronRunService,
    cache: CacheService,
    secreto: Option<String>,
}

impl CronService {
    pub fn new(
        db: SharedBackend,
        runs: CronRunService,
        cache: CacheService,
        secreto: Option<String>,
    ) -> Self {
        CronService {
            db,
            runs,
            cache,
            secreto,
        }
    }

    /// Sin secreto configurado no se acepta ningún pedido.
    pub fn autorizar(&self, authorization: Option<&str>) -> AppResult<()> {
        let no_autorizado = || AppError::NoAutenticado("No autorizado".into());
        let secreto = self.secreto.as_deref().ok_or_else(no_autorizado)?;
        let token = authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or_else(no_autorizado)?;
        if token.is_empty() || !iguales_en_tiempo_constante(token, secreto) {
            log::warn!("Cron: pedido con secreto inválido");
            return Err(no_autorizado());
        }
        Ok(())
    }

    async fn llamar_rpcs(&self) -> Result<(Value, Value), DbError> {
        // sin token de usuario: service role
        let generadas = self
            .db
            .rpc("generar_boletas_mensuales", json!({}), None)
            .await?;
        let vencidas = self
            .db
            .rpc("actualizar_boletas_vencidas", json!({}), None)
            .await?;
        Ok((generadas, vencidas))
    }

    pub async fn ejecutar(&self) -> AppResult<ResultadoCronBoletas> {
        let run_id = self.runs.create_run(JOB_BOLETAS_MENSUALES).await?;
        self.runs.update_run(&run_id, "running", None, None).await?;
        log::info!("Cron {}: corrida {} iniciada", JOB_BOLETAS_MENSUALES, run_id);

        match self.llamar_rpcs().await {
            Ok((boletas_generadas, boletas_vencidas)) => {
                let resultado = json!({
                    "boletas_generadas": boletas_generadas,
                    "boletas_vencidas": boletas_vencidas,
                })
                .to_string();
                self.runs
                    .update_run(&run_id, "done", None, Some(&resultado))
                    .await?;
                self.cache
                    .invalidar_varias(&[CacheTag::Abonos, CacheTag::Recaudacion]);
                log::info!("Cron {}: corrida {} terminada", JOB_BOLETAS_MENSUALES, run_id);

                Ok(ResultadoCronBoletas {
                    run_id,
                    boletas_generadas,
                    boletas_vencidas,
                })
            }
            Err(e) => {
                log::error!("Cron {}: corrida {} falló: {}", JOB_BOLETAS_MENSUALES, run_id, e);
                self.runs
                    .update_run(&run_id, "failed", Some(&e.message), None)
                    .await?;
                Err(e.into())
            }
        }
    }

    pub async fn listar_corridas(&self, page: u64, page_size: u64) -> AppResult<ListCronRunsResponse> {
        Ok(self.runs.list_runs(page, page_size).await?)
    }

    pub async fn obtener_corrida(&self, run_id: &str) -> AppResult<CronRunRecord> {
        self.runs
            .get_run(run_id)
            .await?
            .ok_or_else(|| AppError::NoEncontrado(format!("No existe la corrida {}", run_id)))
    }
}
