//! Error types for upgrade helpers
//!
//! Provides error handling for:
//! - Configuration store lookups and writes
//! - Plugin registry enumeration
//! - Upgrade plan construction and execution
//! - Settings loading

/// Configuration store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No record exists for the key
    #[error("configuration missing: {plugin}/{name}")]
    NotFound {
        /// Plugin namespace
        plugin: String,
        /// Setting name
        name: String,
    },

    /// Backend failure
    #[error("config store error: {0}")]
    Backend(String),
}

impl ConfigError {
    /// Create not found error for a key
    #[inline]
    pub fn not_found(plugin: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            plugin: plugin.into(),
            name: name.into(),
        }
    }
}

/// Plugin registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Registry could not be read
    #[error("plugin registry unavailable: {0}")]
    Unavailable(String),
}

/// Main upgrade error type
#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    /// Configuration store failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Plugin registry failure
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Two steps share a version
    #[error("duplicate upgrade step for version {0}")]
    DuplicateStep(u64),

    /// A plan step failed
    #[error("upgrade step {version} failed: {source}")]
    StepFailed {
        /// Version of the failing step
        version: u64,
        /// Underlying error
        #[source]
        source: Box<UpgradeError>,
    },

    /// Stored version savepoint is not a number
    #[error("invalid stored version: '{0}'")]
    InvalidVersion(String),

    /// Settings could not be parsed
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] toml::de::Error),
}

impl UpgradeError {
    /// Check if the error (or the step error it wraps) is a missing
    /// configuration record
    #[must_use]
    pub fn is_configuration_missing(&self) -> bool {
        match self {
            Self::Config(ConfigError::NotFound { .. }) => true,
            Self::StepFailed { source, .. } => source.is_configuration_missing(),
            _ => false,
        }
    }

    /// Wrap an error with the version of the step that produced it
    #[inline]
    pub fn step_failed(version: u64, source: impl Into<Box<UpgradeError>>) -> Self {
        Self::StepFailed {
            version,
            source: source.into(),
        }
    }
}

/// Result type alias for upgrade operations
pub type UpgradeResult<T> = Result<T, UpgradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = ConfigError::not_found("block_massaction", "applicablecourseformats");
        assert_eq!(
            err.to_string(),
            "configuration missing: block_massaction/applicablecourseformats"
        );
    }

    #[test]
    fn configuration_missing_through_step() {
        let err = UpgradeError::step_failed(
            2024010100,
            UpgradeError::from(ConfigError::not_found("block_massaction", "x")),
        );
        assert!(err.is_configuration_missing());
        assert!(err.to_string().contains("2024010100"));
    }

    #[test]
    fn registry_error_is_not_configuration_missing() {
        let err = UpgradeError::from(RegistryError::Unavailable("down".to_string()));
        assert!(!err.is_configuration_missing());
    }
}
