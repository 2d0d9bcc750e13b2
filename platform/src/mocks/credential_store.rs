//! In-memory credential jar.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::credentials::{CredentialStore, Expiry};
use crate::error::{PlatformError, Result};

/// In-memory credential jar for tests.
///
/// Records every write together with its expiry so tests can assert the
/// persistence policy, not just the stored values. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct MockCredentialStore {
    entries: Arc<Mutex<HashMap<String, (String, Expiry)>>>,
}

impl MockCredentialStore {
    /// Create an empty jar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jar pre-seeded with session-scoped `(key, value)` entries.
    #[must_use]
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let map = entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), ((*value).to_string(), Expiry::Session)))
            .collect::<HashMap<_, _>>();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    /// The expiry recorded for `key`, if present.
    #[must_use]
    pub fn expiry_of(&self, key: &str) -> Option<Expiry> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).map(|(_, expiry)| *expiry))
    }

    /// The value recorded for `key`, if present.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).map(|(value, _)| value.clone()))
    }

    /// `true` when the jar holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .is_ok_and(|entries| entries.is_empty())
    }
}

impl CredentialStore for MockCredentialStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| PlatformError::Internal("Mutex lock failed".to_string()))?;
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    fn write(&self, key: &str, value: &str, expiry: Expiry) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PlatformError::Internal("Mutex lock failed".to_string()))?;
        entries.insert(key.to_string(), (value.to_string(), expiry));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| PlatformError::Internal("Mutex lock failed".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_remove() {
        let store = MockCredentialStore::new();

        assert!(store.write("k", "v", Expiry::Days(1)).is_ok());
        assert_eq!(store.read("k"), Ok(Some("v".to_string())));
        assert_eq!(store.expiry_of("k"), Some(Expiry::Days(1)));

        assert!(store.remove("k").is_ok());
        assert_eq!(store.read("k"), Ok(None));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_storage() {
        let store = MockCredentialStore::new();
        let clone = store.clone();

        assert!(store.write("k", "v", Expiry::Session).is_ok());
        assert_eq!(clone.value_of("k").as_deref(), Some("v"));
    }
}
