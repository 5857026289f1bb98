// src/db/sale_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::Procedure, error::AppError},
    models::sale::{NewSale, Sale, SaleReportRow, SaleStatus},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ROTINAS ARMAZENADAS
    // =========================================================================

    pub async fn register(&self, new_sale: NewSale) -> Result<Sale, AppError> {
        Procedure::new("sp_sale_register")
            .bind(new_sale.property_id)
            .bind(new_sale.final_price)
            .bind(new_sale.total_commission)
            .bind(new_sale.listing_agent_id)
            .bind(new_sale.is_shared)
            .bind(new_sale.external_agency)
            .bind(new_sale.shared_pct)
            .bind(new_sale.selling_agent_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Vendas fechadas entre as datas (inclusive), de qualquer status.
    pub async fn report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SaleReportRow>, AppError> {
        Procedure::new("sp_report_sales")
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
    }

    // =========================================================================
    //  SQL DIRETO
    // =========================================================================

    pub async fn list(&self, status: Option<SaleStatus>) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT * FROM sales
            WHERE ($1::sale_status IS NULL OR status = $1)
            ORDER BY closed_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    /// `SELECT ... FOR UPDATE`: aprovações concorrentes da mesma venda ficam em fila.
    pub async fn lock<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sale)
    }

    pub async fn set_approved<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: SaleStatus,
        approved_by: Uuid,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales
            SET status = $2, approved_at = NOW(), approved_by = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(approved_by)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn delete_by_property<'e, E>(
        &self,
        executor: E,
        property_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM sales WHERE property_id = $1")
            .bind(property_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
