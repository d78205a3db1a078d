//! Upgrade settings
//!
//! Names the configuration keys and plugin category the helpers work on.
//! Every field has a default so an empty TOML document is valid.

use crate::error::UpgradeResult;
use crate::store::ConfigKey;
use serde::{Deserialize, Serialize};

/// Default plugin namespace
pub const DEFAULT_PLUGIN: &str = "block_massaction";
/// Default supported-format setting
pub const DEFAULT_SETTING: &str = "applicablecourseformats";
/// Default plugin category enumerated for formats
pub const DEFAULT_CATEGORY: &str = "format";
/// Default setting holding the version savepoint
pub const DEFAULT_VERSION_SETTING: &str = "version";

/// Settings for the format upgrade helpers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeSettings {
    /// Plugin namespace owning the setting
    pub plugin: String,
    /// Name of the supported-format setting
    pub setting: String,
    /// Plugin category to enumerate
    pub category: String,
    /// Name of the version savepoint setting
    pub version_setting: String,
}

impl UpgradeSettings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML
    ///
    /// # Errors
    /// Returns [`UpgradeError::InvalidSettings`](crate::UpgradeError::InvalidSettings)
    /// if the document is not valid
    pub fn from_toml_str(source: &str) -> UpgradeResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Key of the supported-format setting
    #[inline]
    #[must_use]
    pub fn formats_key(&self) -> ConfigKey {
        ConfigKey::new(&self.plugin, &self.setting)
    }

    /// Key of the version savepoint
    #[inline]
    #[must_use]
    pub fn version_key(&self) -> ConfigKey {
        ConfigKey::new(&self.plugin, &self.version_setting)
    }
}

impl Default for UpgradeSettings {
    fn default() -> Self {
        Self {
            plugin: DEFAULT_PLUGIN.to_string(),
            setting: DEFAULT_SETTING.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            version_setting: DEFAULT_VERSION_SETTING.to_string(),
        }
    }
}
