//! Mass Action Upgrade Helpers
//!
//! Keeps the supported course-format setting in step with the plugin
//! registry when formats are added or removed.
//!
//! # Core Concepts
//!
//! - [`PluginRegistry`]: enumerates installed plugins of a category
//! - [`ConfigStore`]: key-value plugin configuration
//! - [`SupportedFormatList`]: the comma-separated setting as an ordered set
//! - [`FormatReconciler`]: applies add/remove changes and persists the result
//! - [`UpgradePlan`]: versioned steps with savepoints
//!
//! # Example
//!
//! ```rust
//! use massaction_upgrade::{
//!     add_supported_format, ConfigKey, InMemoryConfigStore, InMemoryPluginRegistry,
//! };
//!
//! let registry = InMemoryPluginRegistry::new();
//! registry.install("format", "topics", "Topics");
//! registry.install("format", "weeks", "Weekly sections");
//! registry.install("format", "social", "Social");
//!
//! let store = InMemoryConfigStore::new()
//!     .with_value("block_massaction", "applicablecourseformats", "topics,social");
//!
//! add_supported_format(&registry, &store, "weeks").unwrap();
//!
//! let key = ConfigKey::new("block_massaction", "applicablecourseformats");
//! assert_eq!(store.value(&key).as_deref(), Some("topics,weeks,social"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod formats;
pub mod plan;
pub mod reconcile;
pub mod registry;
pub mod settings;
pub mod store;

// Re-exports for convenience
pub use error::{ConfigError, RegistryError, UpgradeError, UpgradeResult};
pub use formats::SupportedFormatList;
pub use plan::{UpgradeOutcome, UpgradePlan, UpgradeStep};
pub use reconcile::{add_supported_format, remove_supported_format, FormatChange, FormatReconciler};
pub use registry::{InMemoryPluginRegistry, InstalledPlugins, PluginRegistry};
pub use settings::UpgradeSettings;
pub use store::{ConfigKey, ConfigRecord, ConfigStore, InMemoryConfigStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running format upgrades
    pub use crate::{
        ConfigKey, ConfigStore, FormatChange, FormatReconciler, PluginRegistry,
        SupportedFormatList, UpgradeError, UpgradePlan, UpgradeSettings, UpgradeStep,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
