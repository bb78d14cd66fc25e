//! Persistenza dei messaggi.
//!
//! Il livello API dipende solo dal trait [`MessageStore`]; le implementazioni
//! concrete sono [`InMemoryStore`] (test e `DATABASE_URL=memory`) e
//! [`SqliteStore`] (produzione).

use async_trait::async_trait;
use bacheca_core::Message;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Qualsiasi fallimento del livello di persistenza.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Collezione durevole di messaggi, unico punto di sincronizzazione del servizio.
///
/// Ogni metodo corrisponde a una sola operazione sullo store: niente retry,
/// niente batching.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Tutti i messaggi, in ordine di inserimento.
    async fn find_all(&self) -> Result<Vec<Message>, StoreError>;

    /// Assegna un id nuovo, persiste il testo così com'è e restituisce il messaggio creato.
    async fn create(&self, text: &str) -> Result<Message, StoreError>;

    /// Rimuove ogni messaggio presente al momento dell'invocazione.
    async fn delete_all(&self) -> Result<(), StoreError>;

    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
