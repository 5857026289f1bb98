// src/db/property_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{Procedure, WriteOutcome},
        error::AppError,
    },
    models::property::{
        ContractData, NewProperty, Property, PropertyChanges, PropertyFilters, PropertyListing,
        PropertyStatus,
    },
};

#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ROTINAS ARMAZENADAS
    // =========================================================================

    pub async fn create(&self, new_property: NewProperty) -> Result<Property, AppError> {
        Procedure::new("sp_property_create")
            .bind(new_property.title)
            .bind(new_property.description)
            .bind(new_property.address)
            .bind(new_property.city)
            .bind(new_property.price)
            .bind(new_property.currency)
            .bind(new_property.commission_pct)
            .bind(new_property.operation)
            .bind(new_property.agent_id)
            .bind(new_property.owner_id)
            .bind(new_property.is_exclusive)
            .fetch_one(&self.pool)
            .await
    }

    /// Listagem com nomes do agente e do proprietário, mais recentes primeiro.
    pub async fn list(&self, filters: PropertyFilters) -> Result<Vec<PropertyListing>, AppError> {
        Procedure::new("sp_property_list")
            .bind(filters.status)
            .bind(filters.agent_id)
            .fetch_all(&self.pool)
            .await
    }

    // =========================================================================
    //  SQL DIRETO
    // =========================================================================

    pub async fn find_listing(&self, id: Uuid) -> Result<Option<PropertyListing>, AppError> {
        let listing = sqlx::query_as::<_, PropertyListing>(
            r#"
            SELECT p.*, u.full_name AS agent_name, c.full_name AS owner_name
            FROM properties p
            LEFT JOIN users u ON u.id = p.agent_id
            LEFT JOIN clients c ON c.id = p.owner_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(listing)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM properties WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Trava a linha do imóvel até o fim da transação e devolve o status atual.
    pub async fn lock_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<PropertyStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let status = sqlx::query_scalar::<_, PropertyStatus>(
            "SELECT status FROM properties WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(status)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: PropertyChanges,
    ) -> Result<WriteOutcome, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET title          = COALESCE($2, title),
                description    = COALESCE($3, description),
                price          = COALESCE($4, price),
                status         = COALESCE($5, status),
                commission_pct = COALESCE($6, commission_pct)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.price)
        .bind(changes.status)
        .bind(changes.commission_pct)
        .execute(executor)
        .await?;

        Ok(WriteOutcome::from_result(result))
    }

    // Único caminho para VENDIDO: a aprovação de uma venda
    pub async fn mark_sold<'e, E>(&self, executor: E, id: Uuid) -> Result<WriteOutcome, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE properties SET status = 'VENDIDO' WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(WriteOutcome::from_result(result))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<WriteOutcome, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(WriteOutcome::from_result(result))
    }

    pub async fn contract_data(&self, id: Uuid) -> Result<Option<ContractData>, AppError> {
        let data = sqlx::query_as::<_, ContractData>(
            r#"
            SELECT
                p.id AS property_id, p.title, p.description, p.address, p.city,
                p.price, p.currency, p.commission_pct, p.operation, p.status,
                p.is_exclusive,
                c.full_name AS owner_name,
                c.dni_ruc   AS owner_dni_ruc,
                c.phone     AS owner_phone,
                c.email     AS owner_email,
                u.full_name AS agent_name,
                u.email     AS agent_email,
                u.phone     AS agent_phone
            FROM properties p
            JOIN users u ON u.id = p.agent_id
            LEFT JOIN clients c ON c.id = p.owner_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(data)
    }
}
