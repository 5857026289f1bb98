// src/db/social_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{Acknowledgement, Procedure},
        error::AppError,
    },
    models::social::SocialMediaLog,
};

#[derive(Clone)]
pub struct SocialRepository {
    pool: PgPool,
}

impl SocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Procedure sem resultado: só confirma
    pub async fn log<'e, E>(
        &self,
        executor: E,
        property_id: Uuid,
        network: &str,
        post_url: &str,
    ) -> Result<Acknowledgement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        Procedure::new("sp_social_log")
            .bind(property_id)
            .bind(network.to_string())
            .bind(post_url.to_string())
            .execute(executor)
            .await
    }

    pub async fn list_by_property(&self, property_id: Uuid) -> Result<Vec<SocialMediaLog>, AppError> {
        let logs = sqlx::query_as::<_, SocialMediaLog>(
            "SELECT * FROM social_media_logs WHERE property_id = $1 ORDER BY created_at DESC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
