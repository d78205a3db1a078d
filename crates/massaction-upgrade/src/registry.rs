//! Plugin registry access
//!
//! [`PluginRegistry`] enumerates installed plugins of a category. The
//! enumeration order is significant: reconciled format lists are written in
//! that order.

use crate::error::RegistryError;
use indexmap::IndexMap;
use parking_lot::RwLock;

/// Snapshot of installed plugins of one category
///
/// Maps plugin identifier to display name in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledPlugins {
    plugins: IndexMap<String, String>,
}

impl InstalledPlugins {
    /// Create empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plugin, keeping its position if already present
    pub fn insert(&mut self, id: impl Into<String>, display_name: impl Into<String>) {
        self.plugins.insert(id.into(), display_name.into());
    }

    /// Check if plugin is installed
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    /// Display name of a plugin
    #[inline]
    #[must_use]
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.plugins.get(id).map(String::as_str)
    }

    /// Plugin identifiers in enumeration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    /// Number of plugins
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if snapshot is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InstalledPlugins {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut plugins = Self::new();
        for (id, name) in iter {
            plugins.insert(id, name);
        }
        plugins
    }
}

/// Read-only view of the host plugin registry
#[cfg_attr(test, mockall::automock)]
pub trait PluginRegistry {
    /// Enumerate installed plugins of a category
    ///
    /// # Errors
    /// Returns [`RegistryError::Unavailable`] if the registry cannot be read
    fn installed_plugins(&self, category: &str) -> Result<InstalledPlugins, RegistryError>;
}

/// In-memory plugin registry
#[derive(Debug, Default)]
pub struct InMemoryPluginRegistry {
    categories: RwLock<IndexMap<String, InstalledPlugins>>,
}

impl InMemoryPluginRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn install(&self, category: &str, id: &str, display_name: &str) {
        self.categories
            .write()
            .entry(category.to_string())
            .or_default()
            .insert(id, display_name);
    }

    /// Remove a plugin, preserving the order of the rest
    pub fn uninstall(&self, category: &str, id: &str) -> bool {
        self.categories
            .write()
            .get_mut(category)
            .is_some_and(|plugins| plugins.plugins.shift_remove(id).is_some())
    }
}

impl PluginRegistry for InMemoryPluginRegistry {
    fn installed_plugins(&self, category: &str) -> Result<InstalledPlugins, RegistryError> {
        Ok(self
            .categories
            .read()
            .get(category)
            .cloned()
            .unwrap_or_default())
    }
}

impl<R: PluginRegistry + ?Sized> PluginRegistry for &R {
    fn installed_plugins(&self, category: &str) -> Result<InstalledPlugins, RegistryError> {
        (**self).installed_plugins(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_order() {
        let plugins: InstalledPlugins =
            [("weeks", "Weekly sections"), ("topics", "Topics"), ("social", "Social")]
                .into_iter()
                .collect();
        let ids: Vec<&str> = plugins.ids().collect();
        assert_eq!(ids, vec!["weeks", "topics", "social"]);
        assert_eq!(plugins.display_name("topics"), Some("Topics"));
    }

    #[test]
    fn unknown_category_is_empty() {
        let registry = InMemoryPluginRegistry::new();
        assert!(registry.installed_plugins("format").unwrap().is_empty());
    }

    #[test]
    fn install_and_uninstall() {
        let registry = InMemoryPluginRegistry::new();
        registry.install("format", "topics", "Topics");
        registry.install("format", "weeks", "Weekly sections");
        registry.install("format", "social", "Social");
        registry.install("block", "massaction", "Mass Actions");

        assert!(registry.uninstall("format", "weeks"));
        assert!(!registry.uninstall("format", "weeks"));

        let formats = registry.installed_plugins("format").unwrap();
        let ids: Vec<&str> = formats.ids().collect();
        assert_eq!(ids, vec!["topics", "social"]);
        assert!(!formats.contains("massaction"));
    }
}
