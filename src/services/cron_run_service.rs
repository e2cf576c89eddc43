use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::cron_model::{CronRunRecord, ListCronRunsResponse};

const COLUMNAS: &str = "id, job, status, error_message, resultado, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct CronRunService {
    db_pool: Pool<Sqlite>,
}

impl CronRunService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        CronRunService { db_pool }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Fallo al correr migraciones del registro del cron")?;
        Ok(())
    }

    /// Registra una corrida nueva en estado "pending" y devuelve su id.
    pub async fn create_run(&self, job: &str) -> Result<String> {
        let run_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO cron_runs (id, job, status, error_message, resultado, created_at, updated_at)
            VALUES (?1, ?2, 'pending', NULL, NULL, ?3, ?3)
            "#,
        )
        .bind(&run_id)
        .bind(job)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al insertar corrida del cron")?;

        Ok(run_id)
    }

    /// Actualiza estado, error y resultado
    pub async fn update_run(
        &self,
        run_id: &str,
        status: &str,
        error_message: Option<&str>,
        resultado: Option<&str>,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let afectadas = sqlx::query(
            r#"
            UPDATE cron_runs
            SET status = ?2,
                error_message = ?3,
                resultado = COALESCE(?4, resultado),
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(run_id)
        .bind(status)
        .bind(error_message)
        .bind(resultado)
        .bind(&now)
        .execute(&self.db_pool)
        .await
        .context("Fallo al actualizar corrida del cron")?
        .rows_affected();

        if afectadas == 0 {
            anyhow::bail!("No existe la corrida {}", run_id);
        }
        Ok(())
    }

    /// Obtiene una corrida; `None` si no existe.
    pub async fn get_run(&self, run_id: &str) -> Result<Option<CronRunRecord>> {
        sqlx::query_as::<_, CronRunRecord>(&format!(
            "SELECT {} FROM cron_runs WHERE id = ?1",
            COLUMNAS
        ))
        .bind(run_id)
        .fetch_optional(&self.db_pool)
        .await
        .context("Fallo al leer corrida del cron")
    }

    /// Lista corridas con paginación, más recientes primero. Una página que
    /// queda fuera de rango devuelve `items` vacío.
    pub async fn list_runs(&self, page: u64, page_size: u64) -> Result<ListCronRunsResponse> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cron_runs")
            .fetch_one(&self.db_pool)
            .await
            .context("Fallo al contar corridas del cron")?;

        let limite = i64::try_from(page_size).context("page_size fuera de rango")?;
        let offset = page
            .saturating_sub(1)
            .checked_mul(page_size)
            .and_then(|o| i64::try_from(o).ok());

        let items = match offset {
            Some(offset) if offset < total => sqlx::query_as::<_, CronRunRecord>(&format!(
                "SELECT {} FROM cron_runs ORDER BY created_at DESC, id LIMIT ?1 OFFSET ?2",
                COLUMNAS
            ))
            .bind(limite)
            .bind(offset)
            .fetch_all(&self.db_pool)
            .await
            .context("Fallo al listar corridas del cron")?,
            _ => Vec::new(),
        };

        Ok(ListCronRunsResponse {
            total: u64::try_from(total).unwrap_or_default(),
            page,
            page_size,
            items,
        })
    }
}
