//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use administrativo::{
    config::{AppState, Settings},
    router::build_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; sem ele, info.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env().context("Configuração inválida")?;

    // Se o estado não puder ser montado, a aplicação não deve iniciar.
    let app_state = AppState::new(&settings)
        .await
        .context("Falha ao inicializar o estado da aplicação.")?;

    let app = build_router(&app_state);

    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .context("Falha ao iniciar o listener TCP")?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;

    Ok(())
}
