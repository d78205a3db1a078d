//! Testing utilities for the Mass Action workspace
//!
//! Shared fixtures, collaborator setups and tracing initialisation.

#![allow(missing_docs)]

use massaction_upgrade::{ConfigKey, InMemoryConfigStore, InMemoryPluginRegistry, UpgradeSettings};
use serde_json::{json, Value as JsonValue};

/// Course formats installed by [`standard_registry`], in enumeration order
pub const STANDARD_FORMATS: [(&str, &str); 3] = [
    ("topics", "Custom sections"),
    ("weeks", "Weekly sections"),
    ("social", "Social"),
];

/// Install a test subscriber honouring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn registry_with_formats(formats: &[&str]) -> InMemoryPluginRegistry {
    let registry = InMemoryPluginRegistry::new();
    for format in formats {
        registry.install("format", format, format);
    }
    registry
}

/// Registry with topics, weeks and social installed
pub fn standard_registry() -> InMemoryPluginRegistry {
    let registry = InMemoryPluginRegistry::new();
    for (id, name) in STANDARD_FORMATS {
        registry.install("format", id, name);
    }
    registry
}

/// Store holding the supported-format setting
pub fn store_with_formats(value: &str) -> InMemoryConfigStore {
    let settings = UpgradeSettings::default();
    InMemoryConfigStore::new().with_value(&settings.plugin, &settings.setting, value)
}

pub fn formats_key() -> ConfigKey {
    UpgradeSettings::default().formats_key()
}

pub fn version_key() -> ConfigKey {
    UpgradeSettings::default().version_key()
}

/// Current supported-format value
pub fn stored_formats(store: &InMemoryConfigStore) -> Option<String> {
    store.value(&formats_key())
}

/// `other` payload of a duplication
pub fn duplication_payload(cms: &[(&str, &str)], errors: &[&str]) -> JsonValue {
    let cms: serde_json::Map<String, JsonValue> = cms
        .iter()
        .map(|(src, dst)| ((*src).to_string(), JsonValue::from(*dst)))
        .collect();
    json!({ "cms": cms, "errors": errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_repeatable() {
        init_tracing();
        init_tracing();
    }
}
