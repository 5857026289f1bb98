// src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use arteca_backend::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("arteca_backend=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env()?;
    let app_state = AppState::new(config).await?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    app_state.auth_service.ensure_bootstrap_admin(&app_state.config).await?;

    let app = arteca_backend::app(app_state.clone());

    let listener = TcpListener::bind(&app_state.config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
