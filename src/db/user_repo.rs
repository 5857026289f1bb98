// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{Procedure, WriteOutcome},
        error::AppError,
    },
    models::user::{NewUser, User, UserChanges},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail (ativo ou não, quem decide é o serviço)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // E-mail duplicado vira AppError::EmailAlreadyExists dentro do Procedure
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        Procedure::new("sp_user_create")
            .bind(new_user.email)
            .bind(new_user.password_hash)
            .bind(new_user.full_name)
            .bind(new_user.phone)
            .bind(new_user.role)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<WriteOutcome, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                phone     = COALESCE($3, phone),
                role      = COALESCE($4, role),
                photo_url = COALESCE($5, photo_url)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.full_name)
        .bind(changes.phone)
        .bind(changes.role)
        .bind(changes.photo_url)
        .execute(&self.pool)
        .await?;

        Ok(WriteOutcome::from_result(result))
    }

    // Exclusão lógica
    pub async fn deactivate(&self, id: Uuid) -> Result<WriteOutcome, AppError> {
        let result = sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(WriteOutcome::from_result(result))
    }
}
