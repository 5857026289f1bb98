// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    config::AppConfig,
    db::UserRepository,
    models::{
        auth::{Claims, CurrentUser},
        user::{CreateUserPayload, NewUser, User, UserRole},
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, token_ttl_hours: i64) -> Self {
        Self {
            user_repo,
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// Usuário desconhecido, inativo ou senha errada dão o mesmo erro.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        tracing::info!(user_id = %user.id, "login realizado");
        Ok((user, token))
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<User, AppError> {
        let password_hash = hash_password(&payload.password).await?;

        let user = self
            .user_repo
            .create(NewUser {
                email: payload.email.trim().to_lowercase(),
                password_hash,
                full_name: payload.full_name,
                phone: payload.phone,
                role: payload.role.unwrap_or(UserRole::Agente),
            })
            .await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "usuário criado");
        Ok(user)
    }

    /// Cria o primeiro ADMIN quando a tabela de usuários está vazia.
    pub async fn ensure_bootstrap_admin(&self, config: &AppConfig) -> Result<(), AppError> {
        let Some(admin) = &config.bootstrap_admin else {
            return Ok(());
        };

        if self.user_repo.count().await? > 0 {
            return Ok(());
        }

        self.create_user(CreateUserPayload {
            email: admin.email.clone(),
            password: admin.password.clone(),
            full_name: "Administrador".to_string(),
            phone: None,
            role: Some(UserRole::Admin),
        })
        .await?;

        tracing::info!("👤 Administrador inicial criado ({})", admin.email);
        Ok(())
    }

    // Sem ida ao banco: id e papel vêm das claims
    pub fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(CurrentUser {
            id: token_data.claims.sub,
            role: token_data.claims.role,
        })
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.token_ttl_hours);

        let claims = Claims {
            sub: user.id,
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// bcrypt é CPU-bound: roda fora das threads do runtime
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(valid)
}
