use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{Message, NewMessage};
use crate::storage::{
    error::{Result, StoreError},
    store::MessageStore,
};

/// In-process message store
///
/// Stands in for PostgreSQL in tests. Assigns ids and timestamps the same
/// way the `messages` table defaults do.
#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<Message>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-stored messages
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Mutex::new(messages),
        }
    }

    /// Number of stored messages
    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert_message(&self, message: NewMessage) -> Result<Message> {
        let stored = Message {
            id: Uuid::new_v4(),
            name: message.name,
            message: message.message,
            created_at: Utc::now(),
        };

        self.messages.lock().map_err(poisoned)?.push(stored.clone());
        Ok(stored)
    }

    async fn find_latest_by_name(&self, name: &str) -> Result<Option<Message>> {
        let needle = name.to_lowercase();
        let messages = self.messages.lock().map_err(poisoned)?;

        // Later inserts win ties on created_at, like a serial insert order would
        let latest = messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.name.to_lowercase() == needle)
            .max_by_key(|(i, m)| (m.created_at, *i))
            .map(|(_, m)| m.clone());

        Ok(latest)
    }
}
