//! Key-value configuration store
//!
//! [`ConfigStore`] is the seam to the host's plugin configuration table.
//! Records are addressed by (plugin, name).

use crate::error::ConfigError;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;

/// Primary key of a configuration record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    /// Plugin namespace
    pub plugin: String,
    /// Setting name
    pub name: String,
}

impl ConfigKey {
    /// Create new key
    #[inline]
    pub fn new(plugin: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            name: name.into(),
        }
    }

    /// Not found error for this key
    #[inline]
    #[must_use]
    pub fn not_found(&self) -> ConfigError {
        ConfigError::not_found(&self.plugin, &self.name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.plugin, self.name)
    }
}

/// A stored configuration value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    /// Row id assigned by the store
    pub id: u64,
    /// Primary key
    pub key: ConfigKey,
    /// Stored value
    pub value: String,
}

/// Read/write access to plugin configuration
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore {
    /// Fetch a record
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if no record exists
    fn get(&self, key: &ConfigKey) -> Result<ConfigRecord, ConfigError>;

    /// Overwrite the value of an existing record
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if no record exists
    fn update(&self, record: &ConfigRecord) -> Result<(), ConfigError>;

    /// Insert or overwrite a value
    ///
    /// # Errors
    /// Returns an error if the backend rejects the write
    fn set(&self, key: &ConfigKey, value: &str) -> Result<(), ConfigError>;
}

/// In-memory configuration store
///
/// Row ids start at 1 and are never reused, even after [`remove`](Self::remove).
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    records: IndexMap<ConfigKey, ConfigRecord>,
    last_id: u64,
}

impl InMemoryConfigStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value
    #[must_use]
    pub fn with_value(self, plugin: &str, name: &str, value: &str) -> Self {
        self.insert(ConfigKey::new(plugin, name), value);
        self
    }

    /// Current value for a key
    #[must_use]
    pub fn value(&self, key: &ConfigKey) -> Option<String> {
        self.inner.read().records.get(key).map(|r| r.value.clone())
    }

    /// Remove a record
    pub fn remove(&self, key: &ConfigKey) -> Option<ConfigRecord> {
        self.inner.write().records.shift_remove(key)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    fn insert(&self, key: ConfigKey, value: &str) {
        let mut inner = self.inner.write();
        if let Some(record) = inner.records.get_mut(&key) {
            record.value = value.to_string();
            return;
        }
        inner.last_id += 1;
        let id = inner.last_id;
        inner.records.insert(
            key.clone(),
            ConfigRecord {
                id,
                key,
                value: value.to_string(),
            },
        );
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get(&self, key: &ConfigKey) -> Result<ConfigRecord, ConfigError> {
        self.inner
            .read()
            .records
            .get(key)
            .cloned()
            .ok_or_else(|| key.not_found())
    }

    fn update(&self, record: &ConfigRecord) -> Result<(), ConfigError> {
        let mut inner = self.inner.write();
        let stored = inner
            .records
            .get_mut(&record.key)
            .ok_or_else(|| record.key.not_found())?;
        stored.value.clone_from(&record.value);
        Ok(())
    }

    fn set(&self, key: &ConfigKey, value: &str) -> Result<(), ConfigError> {
        self.insert(key.clone(), value);
        Ok(())
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn get(&self, key: &ConfigKey) -> Result<ConfigRecord, ConfigError> {
        (**self).get(key)
    }

    fn update(&self, record: &ConfigRecord) -> Result<(), ConfigError> {
        (**self).update(record)
    }

    fn set(&self, key: &ConfigKey, value: &str) -> Result<(), ConfigError> {
        (**self).set(key, value)
    }
}
