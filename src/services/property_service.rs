// src/services/property_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::WriteOutcome,
        error::{AppError, Entity},
    },
    db::{DocumentRepository, PropertyRepository, SaleRepository},
    models::property::{
        NewProperty, Property, PropertyChanges, PropertyDeletion, PropertyDetail, PropertyFilters,
        PropertyListing,
    },
};

#[derive(Clone)]
pub struct PropertyService {
    pool: PgPool,
    property_repo: PropertyRepository,
    document_repo: DocumentRepository,
    sale_repo: SaleRepository,
}

impl PropertyService {
    pub fn new(
        pool: PgPool,
        property_repo: PropertyRepository,
        document_repo: DocumentRepository,
        sale_repo: SaleRepository,
    ) -> Self {
        Self {
            pool,
            property_repo,
            document_repo,
            sale_repo,
        }
    }

    pub async fn list(&self, filters: PropertyFilters) -> Result<Vec<PropertyListing>, AppError> {
        self.property_repo.list(filters).await
    }

    pub async fn create(&self, new_property: NewProperty) -> Result<Property, AppError> {
        let property = self.property_repo.create(new_property).await?;
        tracing::info!(property_id = %property.id, "imóvel cadastrado");
        Ok(property)
    }

    /// Imóvel com nomes do agente/proprietário e seus documentos.
    pub async fn get_detail(&self, id: Uuid) -> Result<PropertyDetail, AppError> {
        let listing = self
            .property_repo
            .find_listing(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Property))?;

        let documents = self.document_repo.list_by_property(id).await?;

        Ok(PropertyDetail { listing, documents })
    }

    pub async fn update(&self, id: Uuid, changes: PropertyChanges) -> Result<WriteOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Trava a linha para que uma aprovação concorrente não passe no meio
        let current = self
            .property_repo
            .lock_status(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound(Entity::Property))?;

        if let Some(next) = changes.status {
            current.check_manual_change(next)?;
        }

        let outcome = self
            .property_repo
            .update(&mut *tx, id, changes)
            .await?
            .require(Entity::Property)?;

        tx.commit().await?;
        Ok(outcome)
    }

    /// Documentos, vendas e o imóvel numa única transação: ou tudo, ou nada.
    pub async fn delete(&self, id: Uuid) -> Result<PropertyDeletion, AppError> {
        let mut tx = self.pool.begin().await?;

        let documents_deleted = self.document_repo.delete_by_property(&mut *tx, id).await?;
        let sales_deleted = self.sale_repo.delete_by_property(&mut *tx, id).await?;

        // Se o imóvel não existe, o drop do tx desfaz os passos anteriores
        self.property_repo
            .delete(&mut *tx, id)
            .await?
            .require(Entity::Property)?;

        tx.commit().await?;

        tracing::info!(
            property_id = %id,
            documents_deleted,
            sales_deleted,
            "imóvel apagado em cascata"
        );

        Ok(PropertyDeletion {
            documents_deleted,
            sales_deleted,
        })
    }
}
