use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use bacheca_server::{build_store, routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // La configurazione serve prima di tutto, anche per il livello di log
    let config = Config::from_env().context("load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Apri lo store (SQLite con migrazioni, oppure in memoria)
    let store = build_store(&config).await.context("open message store")?;
    // Crea lo stato dell'applicazione condiviso
    let state = Arc::new(AppState::new(store, config.hostname.clone()));
    let app = routes::router(state);

    // HOST può essere un IP o un nome: se non si risolve l'avvio si ferma qui
    let resolved = config.resolve_bind_addr().await?;
    // Crea il listener TCP, un socket tcp legato a HOST:PORT
    let listener = tokio::net::TcpListener::bind((config.bind_host(), config.port))
        .await
        .with_context(|| format!("bind tcp listener on {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().unwrap_or(resolved);
    tracing::info!(%addr, hostname = %config.hostname, "listening");

    // Avvia il server Axum
    axum::serve(listener, app.into_make_service())
        .await
        .context("server shutdown")?;

    Ok(())
}
