//! Persistence for the storefront.
//!
//! # Layout
//!
//! Everything is stored as whole-collection JSON values in a flat key-value
//! namespace, one key per collection:
//!
//! - `<prefix>_users` - registered accounts
//! - `<prefix>_products` - the catalog, all vendors
//! - `<prefix>_current_user` - the logged-in user, absent when logged out
//! - `<prefix>_cart_<user_id>` - one cart per user
//!
//! Backends only know how to get, set and remove a string under a key
//! ([`KeyValueStore`]). [`Storage`] adds the key prefix, JSON encoding and an
//! in-process write lock, and [`Table`] layers keyed upsert/delete on top so
//! callers never hand-roll a read-modify-write cycle.

pub mod carts;
pub mod file;
pub mod memory;
pub mod products;
pub mod session;
pub mod users;

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Filesystem error from a file-backed store.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored value exists but does not decode as the expected collection.
    #[error("data corruption in {key}: {source}")]
    DataCorruption {
        /// Storage key holding the malformed value.
        key: String,
        /// Decoder error.
        source: serde_json::Error,
    },

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// A uniqueness rule was violated (e.g. duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the write lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A flat string key-value namespace.
///
/// Mirrors what a browser's local storage offers: no transactions, no partial
/// updates, just whole values under string keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific `RepositoryError`.
    fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Store `value` under `key`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific `RepositoryError`.
    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific `RepositoryError`.
    fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}

/// Check that a key only uses characters every backend can store.
pub(crate) fn validate_key(key: &str) -> Result<(), RepositoryError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidKey(key.to_owned()))
    }
}

/// Typed, prefixed access to a [`KeyValueStore`].
///
/// Cheap to clone; clones share the backend and the write lock.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
    prefix: String,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Storage {
    /// Wrap a backend, namespacing every key with `prefix`.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static, prefix: impl Into<String>) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
            prefix: prefix.into(),
        }
    }

    /// An empty in-memory storage, mostly for tests.
    #[must_use]
    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self::new(MemoryStore::default(), prefix)
    }

    /// Full key for a collection name (`users` -> `shopwai_users`).
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        format!("{}_{name}", self.prefix)
    }

    /// Read and decode the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored value does not
    /// decode as `T`, or a backend error.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RepositoryError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| RepositoryError::DataCorruption {
                key: key.to_owned(),
                source,
            })
    }

    /// Encode and store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` or a backend error.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Whether anything is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub fn contains(&self, key: &str) -> Result<bool, RepositoryError> {
        Ok(self.backend.get(key)?.is_some())
    }

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        self.backend.remove(key)
    }

    /// Hold the write lock for the duration of a read-modify-write cycle.
    fn exclusive(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.write_lock.lock().map_err(|_| RepositoryError::Poisoned)
    }
}

/// A record stored in a [`Table`], identified by a key field.
pub trait Record: Serialize + DeserializeOwned {
    /// Type of the identifying field.
    type Key: PartialEq + ?Sized;

    /// The identifying field of this record.
    fn key(&self) -> &Self::Key;
}

/// An ordered collection of records stored as one JSON array.
pub struct Table<'a, T> {
    storage: &'a Storage,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Record> Table<'a, T> {
    /// Open the collection stored under the full key `key`.
    #[must_use]
    pub const fn new(storage: &'a Storage, key: String) -> Self {
        Self {
            storage,
            key,
            _marker: PhantomData,
        }
    }

    /// Whether the collection has ever been written.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub fn exists(&self) -> Result<bool, RepositoryError> {
        self.storage.contains(&self.key)
    }

    /// All records in stored order. A missing collection is empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` for malformed data.
    pub fn all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.storage.read(&self.key)?.unwrap_or_default())
    }

    /// First record whose key equals `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` for malformed data.
    pub fn find(&self, key: &T::Key) -> Result<Option<T>, RepositoryError> {
        Ok(self.all()?.into_iter().find(|r| r.key() == key))
    }

    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn replace_all(&self, records: &[T]) -> Result<(), RepositoryError> {
        let _guard = self.storage.exclusive()?;
        self.storage.write(&self.key, records)
    }

    /// Run `f` against the stored records and write the result back, holding
    /// the write lock throughout. Nothing is written if `f` fails.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a storage error converted into `E`.
    pub fn modify<R, E>(&self, f: impl FnOnce(&mut Vec<T>) -> Result<R, E>) -> Result<R, E>
    where
        E: From<RepositoryError>,
    {
        let _guard = self.storage.exclusive()?;
        let mut records = self.all()?;
        let out = f(&mut records)?;
        self.storage.write(&self.key, &records)?;
        Ok(out)
    }

    /// Insert `record`, or replace the stored record with the same key in place.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn upsert(&self, record: T) -> Result<(), RepositoryError> {
        self.modify(|records| {
            match records.iter_mut().find(|r| r.key() == record.key()) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
            Ok::<_, RepositoryError>(())
        })
    }

    /// Delete every record with this key. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn delete(&self, key: &T::Key) -> Result<bool, RepositoryError> {
        self.modify(|records| {
            let before = records.len();
            records.retain(|r| r.key() != key);
            Ok::<_, RepositoryError>(records.len() != before)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        value: u32,
    }

    impl Record for Row {
        type Key = str;

        fn key(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, value: u32) -> Row {
        Row {
            id: id.to_owned(),
            value,
        }
    }

    #[test]
    fn test_key_prefix() {
        let storage = Storage::in_memory("shopwai");
        assert_eq!(storage.key("users"), "shopwai_users");
        assert_eq!(storage.key("cart_42"), "shopwai_cart_42");
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let storage = Storage::in_memory("t");
        let table: Table<'_, Row> = Table::new(&storage, storage.key("rows"));
        assert!(!table.exists().unwrap());
        assert!(table.all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let storage = Storage::in_memory("t");
        let table: Table<'_, Row> = Table::new(&storage, storage.key("rows"));

        table.upsert(row("a", 1)).unwrap();
        table.upsert(row("b", 2)).unwrap();
        table.upsert(row("a", 3)).unwrap();

        assert_eq!(table.all().unwrap(), vec![row("a", 3), row("b", 2)]);
    }

    #[test]
    fn test_delete_reports_removal() {
        let storage = Storage::in_memory("t");
        let table: Table<'_, Row> = Table::new(&storage, storage.key("rows"));
        table.replace_all(&[row("a", 1), row("b", 2)]).unwrap();

        assert!(table.delete("a").unwrap());
        assert!(!table.delete("a").unwrap());
        assert_eq!(table.all().unwrap(), vec![row("b", 2)]);
    }

    #[test]
    fn test_failed_modify_writes_nothing() {
        let storage = Storage::in_memory("t");
        let table: Table<'_, Row> = Table::new(&storage, storage.key("rows"));
        table.replace_all(&[row("a", 1)]).unwrap();

        let result: Result<(), RepositoryError> = table.modify(|rows| {
            rows.clear();
            Err(RepositoryError::InvalidKey("boom".to_owned()))
        });

        assert!(result.is_err());
        assert_eq!(table.all().unwrap(), vec![row("a", 1)]);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let storage = Storage::in_memory("t");
        let table: Table<'_, Row> = Table::new(&storage, storage.key("rows"));
        let rows: Vec<Row> = (0..20).rev().map(|i| row(&format!("r{i}"), i)).collect();

        table.replace_all(&rows).unwrap();
        assert_eq!(table.all().unwrap(), rows);
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let backend = MemoryStore::default();
        backend.set("t_rows", "{not json").unwrap();
        let storage = Storage::new(backend, "t");
        let table: Table<'_, Row> = Table::new(&storage, storage.key("rows"));

        let err = table.all().unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption { ref key, .. } if key == "t_rows"));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("shopwai_cart_abc-1").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a b").is_err());
    }
}
