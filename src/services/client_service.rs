// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::WriteOutcome,
        error::{AppError, Entity},
    },
    db::ClientRepository,
    models::client::{Client, ClientChanges, NewClient},
};

#[derive(Clone)]
pub struct ClientService {
    pool: PgPool,
    repo: ClientRepository,
}

impl ClientService {
    pub fn new(pool: PgPool, repo: ClientRepository) -> Self {
        Self { pool, repo }
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Client))
    }

    pub async fn create(&self, new_client: NewClient) -> Result<Client, AppError> {
        self.repo.create(new_client).await
    }

    pub async fn update(&self, id: Uuid, changes: ClientChanges) -> Result<WriteOutcome, AppError> {
        self.repo.update(id, changes).await?.require(Entity::Client)
    }

    /// Checagem e exclusão na mesma transação.
    pub async fn delete(&self, id: Uuid) -> Result<WriteOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        if self.repo.owns_properties(&mut *tx, id).await? {
            return Err(AppError::ClientHasProperties);
        }

        let outcome = self
            .repo
            .delete(&mut *tx, id)
            .await?
            .require(Entity::Client)?;

        tx.commit().await?;

        tracing::info!(client_id = %id, "cliente apagado");
        Ok(outcome)
    }
}
