//! Supported-format reconciliation
//!
//! Recomputes the supported-format setting when a course format is added to
//! or removed from the registry. Every operation:
//! 1. Reads the stored record
//! 2. Takes one snapshot of installed formats
//! 3. Keeps installed formats that pass the change filter, in enumeration order
//! 4. Overwrites the record
//!
//! Formats that are no longer installed always drop out. A format to add that
//! is not installed is not added.

use crate::error::UpgradeResult;
use crate::formats::SupportedFormatList;
use crate::registry::PluginRegistry;
use crate::settings::UpgradeSettings;
use crate::store::ConfigStore;
use std::fmt;

/// A change to the supported-format list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormatChange {
    /// Start supporting a format
    Add(String),
    /// Stop supporting a format
    Remove(String),
}

impl FormatChange {
    /// Format the change targets
    #[inline]
    #[must_use]
    pub fn format(&self) -> &str {
        match self {
            FormatChange::Add(format) | FormatChange::Remove(format) => format,
        }
    }

    /// Whether an installed format belongs in the new list
    fn keeps(&self, installed: &str, selected: bool) -> bool {
        match self {
            FormatChange::Add(format) => selected || installed == format,
            FormatChange::Remove(format) => selected && installed != format,
        }
    }
}

impl fmt::Display for FormatChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatChange::Add(format) => write!(f, "add '{format}'"),
            FormatChange::Remove(format) => write!(f, "remove '{format}'"),
        }
    }
}

/// Applies [`FormatChange`]s against injected collaborators
#[derive(Debug)]
pub struct FormatReconciler<'a, R: ?Sized, S: ?Sized> {
    registry: &'a R,
    store: &'a S,
    settings: UpgradeSettings,
}

impl<'a, R, S> FormatReconciler<'a, R, S>
where
    R: PluginRegistry + ?Sized,
    S: ConfigStore + ?Sized,
{
    /// Create reconciler with default settings
    #[inline]
    #[must_use]
    pub fn new(registry: &'a R, store: &'a S) -> Self {
        Self {
            registry,
            store,
            settings: UpgradeSettings::default(),
        }
    }

    /// With settings
    #[inline]
    #[must_use]
    pub fn with_settings(mut self, settings: UpgradeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Active settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &UpgradeSettings {
        &self.settings
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Add a format to the supported list
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`](crate::ConfigError::NotFound) if the
    /// setting has no record, or any collaborator failure
    pub fn add_format(&self, format: &str) -> UpgradeResult<SupportedFormatList> {
        self.apply(&FormatChange::Add(format.to_string()))
    }

    /// Remove a format from the supported list
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`](crate::ConfigError::NotFound) if the
    /// setting has no record, or any collaborator failure
    pub fn remove_format(&self, format: &str) -> UpgradeResult<SupportedFormatList> {
        self.apply(&FormatChange::Remove(format.to_string()))
    }

    /// Apply a change and persist the reconciled list
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`](crate::ConfigError::NotFound) if the
    /// setting has no record, or any collaborator failure
    pub fn apply(&self, change: &FormatChange) -> UpgradeResult<SupportedFormatList> {
        let key = self.settings.formats_key();
        tracing::debug!(%key, %change, "Reconciling supported formats");

        let mut record = self.store.get(&key)?;
        let selected = SupportedFormatList::parse(&record.value);
        let installed = self.registry.installed_plugins(&self.settings.category)?;

        if let FormatChange::Add(format) = change {
            if !installed.contains(format) {
                tracing::warn!(format = %format, "Format is not installed; not adding it");
            }
        }

        let supported: SupportedFormatList = installed
            .ids()
            .filter(|id| change.keeps(id, selected.contains(id)))
            .collect();

        record.value = supported.to_string();
        self.store.update(&record)?;

        tracing::info!(%key, %change, value = %record.value, "Supported formats updated");
        Ok(supported)
    }
}

/// Add a format using default settings
///
/// # Errors
/// See [`FormatReconciler::add_format`]
pub fn add_supported_format<R, S>(
    registry: &R,
    store: &S,
    format: &str,
) -> UpgradeResult<SupportedFormatList>
where
    R: PluginRegistry + ?Sized,
    S: ConfigStore + ?Sized,
{
    FormatReconciler::new(registry, store).add_format(format)
}

/// Remove a format using default settings
///
/// # Errors
/// See [`FormatReconciler::remove_format`]
pub fn remove_supported_format<R, S>(
    registry: &R,
    store: &S,
    format: &str,
) -> UpgradeResult<SupportedFormatList>
where
    R: PluginRegistry + ?Sized,
    S: ConfigStore + ?Sized,
{
    FormatReconciler::new(registry, store).remove_format(format)
}
