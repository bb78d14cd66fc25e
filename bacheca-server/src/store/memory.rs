use async_trait::async_trait;
use bacheca_core::{new_message_id, now_timestamp, Message};
use std::sync::{Mutex, MutexGuard};

use super::{MessageStore, StoreError};

/// Store volatile: un vettore protetto da mutex, l'ordine del vettore è l'ordine di inserimento.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Vec<Message>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn messages(&self) -> Result<MutexGuard<'_, Vec<Message>>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.messages()?.clone())
    }

    async fn create(&self, text: &str) -> Result<Message, StoreError> {
        let message = Message::stored(new_message_id(), text, now_timestamp());
        self.messages()?.push(message.clone());
        Ok(message)
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.messages()?.clear();
        Ok(())
    }

    async fn health(&self) -> Result<(), StoreError> {
        self.messages().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_appends_in_insertion_order() {
        let store = InMemoryStore::new();
        for text in ["a", "b", "c"] {
            store.create(text).await.unwrap();
        }

        let texts: Vec<String> = store.find_all().await.unwrap().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn delete_all_on_empty_store_is_ok() {
        let store = InMemoryStore::new();
        store.delete_all().await.unwrap();
        store.delete_all().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn text_is_stored_verbatim() {
        let store = InMemoryStore::new();
        let created = store.create("  spazi e\nnewline  ").await.unwrap();

        assert_eq!(created.text, "  spazi e\nnewline  ");
        assert!(created.id.is_some());
        assert!(created.created_at.is_some());
        assert_eq!(store.find_all().await.unwrap(), vec![created]);
    }
}
