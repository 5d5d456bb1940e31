use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use super::{CredentialStore, Entry, SessionStorage};
use crate::error::{Error, Result};

/// JSON-file backed store.
///
/// The whole map is rewritten on every change through a temporary file and a
/// rename, so a crash never leaves a half-written credential file. Expired
/// entries are dropped on the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, Entry>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &HashMap<String, Entry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let entries = self.load()?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(Utc::now()))
            .map(|entry| entry.value.clone()))
    }

    fn update(&self, apply: impl FnOnce(&mut HashMap<String, Entry>)) -> Result<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut entries = self.load()?;
        apply(&mut entries);
        let now = Utc::now();
        entries.retain(|_, entry| entry.is_live(now));
        self.save(&entries)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> Error {
    Error::Storage("file store lock poisoned".to_string())
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.read(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let entry = Entry::expiring(value, ttl)?;
        self.update(|entries| {
            entries.insert(key.to_string(), entry);
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

impl SessionStorage for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.read(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let entry = Entry::persistent(value);
        self.update(|entries| {
            entries.insert(key.to_string(), entry);
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = FileStore::new(&path);
        store
            .set("tmb_cookie", r#"{"access_token":"x"}"#, Duration::from_secs(3600))
            .unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            CredentialStore::get(&reopened, "tmb_cookie").unwrap().as_deref(),
            Some(r#"{"access_token":"x"}"#)
        );
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert!(store.get_item("email").unwrap().is_none());
        store.remove_item("email").unwrap();
    }

    #[test]
    fn test_expired_entries_are_pruned_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("s.json"));
        store.set("old", "1", Duration::ZERO).unwrap();
        store.set_item("email", "a@b.c").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("\"old\""));
        assert!(raw.contains("a@b.c"));
    }
}
