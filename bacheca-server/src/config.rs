use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATABASE_URL: &str = "bacheca.db";
pub const DEFAULT_RUST_LOG: &str = "info";

/// Configurazione letta una sola volta all'avvio del processo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `memory` seleziona lo store volatile, tutto il resto è trattato come SQLite.
    pub database_url: String,
    pub rust_log: String,
    /// Restituito da GET / per distinguere le istanze.
    pub hostname: String,
}

/// Backend di persistenza scelto in base a `DATABASE_URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite(String),
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Come [`Config::from_env`] ma con una sorgente di variabili arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("parse PORT {:?}", raw))?,
            None => DEFAULT_PORT,
        };
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.to_string());
        let hostname = lookup("HOSTNAME")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(system_hostname);

        if host.trim().is_empty() {
            anyhow::bail!("HOST is empty");
        }

        Ok(Self {
            host,
            port,
            database_url,
            rust_log,
            hostname,
        })
    }

    /// Host di bind senza le parentesi di un IPv6 letterale ("[::1]" -> "::1").
    pub fn bind_host(&self) -> &str {
        self.host.trim().trim_start_matches('[').trim_end_matches(']')
    }

    /// Risolve HOST:PORT (IP letterale o nome, es. "localhost" o un servizio del container).
    /// Un HOST che non si risolve deve fermare l'avvio prima del bind.
    pub async fn resolve_bind_addr(&self) -> anyhow::Result<SocketAddr> {
        tokio::net::lookup_host((self.bind_host(), self.port))
            .await
            .with_context(|| format!("resolve HOST {:?}", self.host))?
            .next()
            .with_context(|| format!("HOST {:?} resolved to no address", self.host))
    }

    pub fn store_backend(&self) -> anyhow::Result<StoreBackend> {
        if self.database_url.eq_ignore_ascii_case("memory") {
            return Ok(StoreBackend::Memory);
        }
        Ok(StoreBackend::Sqlite(crate::build_sqlite_url(&self.database_url)?))
    }
}

fn system_hostname() -> String {
    let name = gethostname::gethostname().to_string_lossy().trim().to_string();
    if name.is_empty() {
        "localhost".to_string()
    } else {
        name
    }
}
