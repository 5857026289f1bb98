// src/db/post_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_constraint_error, WriteOutcome},
        error::AppError,
    },
    models::post::PostWithAuthor,
};

#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<PostWithAuthor>, AppError> {
        let posts = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.*, u.full_name AS author_name
            FROM internal_posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<PostWithAuthor>, AppError> {
        let post = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.*, u.full_name AS author_name
            FROM internal_posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Só o id volta: o handler relê o post com o nome do autor.
    pub async fn create(
        &self,
        title: &str,
        body: &str,
        category: &str,
        author_id: Uuid,
    ) -> Result<WriteOutcome, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO internal_posts (title, body, category, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(category)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_error)?;

        Ok(WriteOutcome::inserted(id))
    }

    pub async fn author_of(&self, id: Uuid) -> Result<Option<Uuid>, AppError> {
        let author: Option<Uuid> =
            sqlx::query_scalar("SELECT author_id FROM internal_posts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(author)
    }

    pub async fn delete(&self, id: Uuid) -> Result<WriteOutcome, AppError> {
        let result = sqlx::query("DELETE FROM internal_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(WriteOutcome::from_result(result))
    }
}
