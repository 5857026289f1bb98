// src/services/sale_service.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{AppError, Entity},
    db::{PropertyRepository, SaleRepository},
    models::sale::{NewSale, Sale, SaleReportRow, SaleStatus},
};

#[derive(Clone)]
pub struct SaleService {
    pool: PgPool,
    sale_repo: SaleRepository,
    property_repo: PropertyRepository,
}

impl SaleService {
    pub fn new(pool: PgPool, sale_repo: SaleRepository, property_repo: PropertyRepository) -> Self {
        Self {
            pool,
            sale_repo,
            property_repo,
        }
    }

    /// Registra como PENDIENTE. O status do imóvel não muda aqui.
    pub async fn register(&self, new_sale: NewSale) -> Result<Sale, AppError> {
        let sale = self.sale_repo.register(new_sale).await?;
        tracing::info!(sale_id = %sale.id, property_id = %sale.property_id, "venda registrada");
        Ok(sale)
    }

    pub async fn list(&self, status: Option<SaleStatus>) -> Result<Vec<Sale>, AppError> {
        self.sale_repo.list(status).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Sale, AppError> {
        self.sale_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Sale))
    }

    /// PENDIENTE -> APROBADO e imóvel -> VENDIDO, atomicamente.
    pub async fn approve(&self, id: Uuid, approver: Uuid) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = self
            .sale_repo
            .lock(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Entity::Sale))?;

        let next = sale.status.approve()?;

        let approved = self
            .sale_repo
            .set_approved(&mut *tx, id, next, approver)
            .await?;

        self.property_repo
            .mark_sold(&mut *tx, approved.property_id)
            .await?;

        tx.commit().await?;

        tracing::info!(
            sale_id = %approved.id,
            property_id = %approved.property_id,
            approved_by = %approver,
            "venda aprovada"
        );
        Ok(approved)
    }

    pub async fn report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SaleReportRow>, AppError> {
        self.sale_repo.report(start, end).await
    }
}

/// Valida o intervalo do relatório antes de qualquer acesso ao banco.
pub fn parse_report_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = start
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingParameter("startDate"))?;
    let end = end
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingParameter("endDate"))?;

    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidParameter("startDate"))?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidParameter("endDate"))?;

    if start > end {
        return Err(AppError::InvalidParameter("startDate"));
    }

    Ok((start, end))
}
