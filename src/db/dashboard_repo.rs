// src/db/dashboard_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{MonthlySales, StatusCount},
};

// Cada consulta é independente: o serviço trata a falha de uma sem afetar as outras
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_properties_by_status(&self) -> Result<Vec<StatusCount>, AppError> {
        let rows = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM properties GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_active_agents(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_active")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn monthly_approved_sales(&self) -> Result<MonthlySales, AppError> {
        let sales = sqlx::query_as::<_, MonthlySales>(
            r#"
            SELECT
                COALESCE(SUM(total_commission), 0) AS total_income,
                COUNT(*) AS sales_count
            FROM sales
            WHERE status = 'APROBADO'
              AND closed_at >= date_trunc('month', NOW())
              AND closed_at < date_trunc('month', NOW()) + interval '1 month'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(sales)
    }

    pub async fn count_pending_sales(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE status = 'PENDIENTE'")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
