// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        ClientRepository, DashboardRepository, DocumentRepository, PostRepository,
        PropertyRepository, SaleRepository, SocialRepository, UserRepository,
    },
    services::{
        auth::AuthService, client_service::ClientService, contract_service::ContractService,
        dashboard_service::DashboardService, property_service::PropertyService,
        sale_service::SaleService, social_service::SocialService,
    },
};

/// Credenciais do primeiro administrador, criado só quando a tabela de usuários está vazia.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub token_ttl_hours: i64,
    pub fonts_dir: PathBuf,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bootstrap_admin = match (
            env::var("BOOTSTRAP_ADMIN_EMAIL").ok(),
            env::var("BOOTSTRAP_ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            token_ttl_hours: env_or("TOKEN_TTL_HOURS", 8)?,
            fonts_dir: env::var("FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./fonts")),
            bootstrap_admin,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} tem um valor inválido: '{raw}'")),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub user_repo: UserRepository,
    pub property_service: PropertyService,
    pub client_service: ClientService,
    pub document_repo: DocumentRepository,
    pub sale_service: SaleService,
    pub post_repo: PostRepository,
    pub social_service: SocialService,
    pub dashboard_service: DashboardService,
    pub contract_service: ContractService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre um pool já criado.
    pub fn from_pool(db_pool: PgPool, config: AppConfig) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let property_repo = PropertyRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let document_repo = DocumentRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            config.token_ttl_hours,
        );
        let property_service = PropertyService::new(
            db_pool.clone(),
            property_repo.clone(),
            document_repo.clone(),
            sale_repo.clone(),
        );
        let client_service = ClientService::new(db_pool.clone(), client_repo);
        let sale_service = SaleService::new(db_pool.clone(), sale_repo, property_repo.clone());
        let social_service =
            SocialService::new(SocialRepository::new(db_pool.clone()), property_repo.clone());
        let dashboard_service = DashboardService::new(DashboardRepository::new(db_pool.clone()));
        let contract_service = ContractService::new(property_repo, config.fonts_dir.clone());

        Self {
            config: Arc::new(config),
            i18n_store: Arc::new(I18nStore::builtin()),
            post_repo: PostRepository::new(db_pool.clone()),
            db_pool,
            auth_service,
            user_repo,
            property_service,
            client_service,
            document_repo,
            sale_service,
            social_service,
            dashboard_service,
            contract_service,
        }
    }
}
