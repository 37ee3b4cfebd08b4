//! Settings storage seam.
//!
//! The settings store is an external collaborator; the engine only needs
//! namespaced get/set. [`JsonSettings`] is the file-backed implementation
//! the CLI uses and tests construct in memory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{NormalizeError, Result};

/// Namespace holding the normalization option keys.
pub const NORMALIZE_PREFERENCES: &str = "Normalize Preferences";

/// Namespaced key/value settings access.
pub trait SettingsStore {
    fn get(&self, namespace: &str, key: &str) -> Option<Value>;
    fn set(&mut self, namespace: &str, key: &str, value: Value);
}

/// Settings held as a two-level JSON object: namespace -> key -> value.
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    namespaces: BTreeMap<String, BTreeMap<String, Value>>,
}

impl JsonSettings {
    /// An empty in-memory store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load from a JSON file; a missing file yields an empty store so first
    /// runs work without any setup.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let namespaces = serde_json::from_str(&text)
            .map_err(|e| NormalizeError::Settings(format!("{}: {e}", path.display())))?;
        Ok(Self { namespaces })
    }

    /// Persist the current state, creating the file if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.namespaces)
            .map_err(|e| NormalizeError::Settings(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// All keys of a namespace, for display.
    pub fn namespace(&self, namespace: &str) -> Option<&BTreeMap<String, Value>> {
        self.namespaces.get(namespace)
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.namespaces.get(namespace)?.get(key).cloned()
    }

    fn set(&mut self, namespace: &str, key: &str, value: Value) {
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut settings = JsonSettings::empty();
        settings.set(NORMALIZE_PREFERENCES, "contact_FullFirst", true.into());
        assert_eq!(
            settings.get(NORMALIZE_PREFERENCES, "contact_FullFirst"),
            Some(Value::Bool(true))
        );
        assert_eq!(settings.get(NORMALIZE_PREFERENCES, "missing"), None);
        assert_eq!(settings.get("Other", "contact_FullFirst"), None);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = JsonSettings::empty();
        settings.set(NORMALIZE_PREFERENCES, "address_CityCaps", 1.into());
        settings.save(&path).unwrap();

        let loaded = JsonSettings::load(&path).unwrap();
        assert_eq!(
            loaded.get(NORMALIZE_PREFERENCES, "address_CityCaps"),
            Some(Value::from(1))
        );
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = JsonSettings::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings.get(NORMALIZE_PREFERENCES, "anything"), None);
    }
}
