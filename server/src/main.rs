use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::{
    config::Config, postgres::PostgresTodoRepository, AppState, InMemoryTodoRepository,
    TodoRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let repository: Arc<dyn TodoRepository> = match &config.database_url {
        Some(url) => {
            let repo = PostgresTodoRepository::connect(url, config.database_max_connections)
                .await
                .context("connecting to DATABASE_URL")?;
            repo.ensure_schema().await?;
            tracing::info!("using postgres repository");
            Arc::new(repo)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory repository");
            Arc::new(InMemoryTodoRepository::new())
        }
    };

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, docs = %format!("{}/api-docs/openapi.json", config.public_url), "listening");

    let state = AppState::new(repository, &config.doc_settings());
    todo_server::run(listener, state, shutdown_signal()).await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
