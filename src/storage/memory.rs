use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;

use super::{CredentialStore, Entry, SessionStorage};
use crate::error::{Error, Result};

/// In-memory store for tests and short-lived embeddings.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let guard = self.entries.read().map_err(poisoned)?;
        Ok(guard
            .get(key)
            .filter(|entry| entry.is_live(Utc::now()))
            .map(|entry| entry.value.clone()))
    }

    fn write(&self, key: &str, entry: Entry) -> Result<()> {
        let mut guard = self.entries.write().map_err(poisoned)?;
        guard.insert(key.to_string(), entry);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut guard = self.entries.write().map_err(poisoned)?;
        guard.remove(key);
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> Error {
    Error::Storage("memory store lock poisoned".to_string())
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.read(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.write(key, Entry::expiring(value, ttl)?)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.delete(key)
    }
}

impl SessionStorage for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.read(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.write(key, Entry::persistent(value))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.delete(key)
    }
}
