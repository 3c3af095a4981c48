//! In-memory key-value backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, RepositoryError, validate_key};

/// A [`KeyValueStore`] that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Number of keys currently stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Poisoned` if a writer panicked.
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self
            .entries
            .read()
            .map_err(|_| RepositoryError::Poisoned)?
            .len())
    }

    /// Whether no keys are stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Poisoned` if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| RepositoryError::Poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().map_err(|_| RepositoryError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::default();
        assert!(store.is_empty().unwrap());

        store.set("shopwai_users", "[]").unwrap();
        assert_eq!(store.get("shopwai_users").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len().unwrap(), 1);

        store.remove("shopwai_users").unwrap();
        store.remove("shopwai_users").unwrap();
        assert!(store.get("shopwai_users").unwrap().is_none());
    }

    #[test]
    fn test_rejects_invalid_key() {
        let store = MemoryStore::default();
        assert!(matches!(
            store.set("a/b", "x"),
            Err(RepositoryError::InvalidKey(_))
        ));
    }
}
