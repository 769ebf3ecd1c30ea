//! Credential persistence behind an injectable store abstraction.

use std::collections::HashMap;
use std::error::Error;
use std::sync::Mutex;

use keyring::Entry;

use crate::core::constants::KEYRING_SERVICE;

/// A named credential store with get/set/delete semantics.
///
/// The production implementation persists to the platform keyring; tests
/// use [`MemoryStore`]. Deleting an absent entry is not an error.
pub trait CredentialStore {
    fn get(&self, name: &str) -> Result<Option<String>, Box<dyn Error>>;
    fn set(&self, name: &str, value: &str) -> Result<(), Box<dyn Error>>;
    fn delete(&self, name: &str) -> Result<(), Box<dyn Error>>;
}

/// Platform keyring store under the fixed `anveshak` service name.
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringStore {
    fn get(&self, name: &str) -> Result<Option<String>, Box<dyn Error>> {
        let entry = Entry::new(KEYRING_SERVICE, name)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(Box::new(err)),
        }
    }

    fn set(&self, name: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let entry = Entry::new(KEYRING_SERVICE, name)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), Box<dyn Error>> {
        let entry = Entry::new(KEYRING_SERVICE, name)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(Box::new(err)),
        }
    }
}

/// In-memory store. Used by tests to observe persistence without touching
/// the platform keyring; every successful `set` is also appended to a
/// write log so callers can assert how many times a value was persisted.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(name: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        store
    }

    pub fn write_log(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, name: &str) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self.values.lock().unwrap().get(name).cloned())
    }

    fn set(&self, name: &str, value: &str) -> Result<(), Box<dyn Error>> {
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), Box<dyn Error>> {
        self.values.lock().unwrap().remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert!(store.get("key").unwrap().is_none());
        store.set("key", "value").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn memory_store_delete_is_idempotent() {
        let store = MemoryStore::with_value("key", "value");
        store.delete("key").unwrap();
        store.delete("key").unwrap();
        assert!(store.get("key").unwrap().is_none());
    }

    #[test]
    fn memory_store_records_every_write() {
        let store = MemoryStore::new();
        store.set("key", "first").unwrap();
        store.set("key", "second").unwrap();
        assert_eq!(
            store.write_log(),
            vec![
                ("key".to_string(), "first".to_string()),
                ("key".to_string(), "second".to_string()),
            ]
        );
    }
}
