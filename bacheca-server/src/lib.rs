use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod config;
pub mod controllers;
pub mod error;
pub mod routes;
pub mod store;

pub use config::{Config, StoreBackend};
pub use error::ApiError;
pub use store::{InMemoryStore, MessageStore, SqliteStore, StoreError};

/// Stato condiviso tra le richieste: lo store e l'hostname dell'istanza, nient'altro.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub hostname: String,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>, hostname: impl Into<String>) -> Self {
        Self {
            store,
            hostname: hostname.into(),
        }
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    Ok(format!("sqlite:///{}", s.trim_start_matches('/')))
}

/// Normalizza il valore di DATABASE_URL in un URL SQLite.
/// Accetta "sqlite::memory:", "sqlite://percorso", "sqlite:percorso" oppure un semplice percorso di file.
/// Eventuali parametri di query ("?mode=rwc") vengono scartati: il file lo crea già `sqlite_url_for_path`.
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    // "sqlite:///abs/path" -> "/abs/path", "sqlite:rel.db" -> "rel.db"
    let without_scheme = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw);
    let path_part = without_scheme.split('?').next().unwrap_or_default();
    if path_part.is_empty() {
        anyhow::bail!("DATABASE_URL {:?} has no database path", raw);
    }
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let options = if db_url == "sqlite::memory:" {
        // ogni connessione in-memory è un database diverso: ne teniamo una sola, per sempre
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };
    let pool = options
        .connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea le tabelle se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            message_id TEXT PRIMARY KEY,
            content    TEXT NOT NULL,
            created_at TEXT NOT NULL
        );"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", s.trim().lines().next().unwrap_or_default()))?;
    }
    Ok(())
}

/// Costruisce lo store indicato dalla configurazione; per SQLite apre il pool e applica le migrazioni.
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn MessageStore>> {
    match config.store_backend()? {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, messages are lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::Sqlite(db_url) => {
            tracing::info!(%db_url, "using sqlite store");
            let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
            run_migrations(&pool).await.context("run migrations")?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
    }
}

/// Controlla lo stato di salute dello store.
pub async fn health_with_store(store: &dyn MessageStore) -> StatusCode {
    match store.health().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
