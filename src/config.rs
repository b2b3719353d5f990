use std::{path::PathBuf, sync::Arc};

use serde::Deserialize;

use crate::{
    error::Result,
    settings::{FileSettingsStore, MemorySettingsStore, SettingsStore},
};

/// Configuration for the settings backing store.
///
/// Allows runtime selection of the backend through configuration files.
///
/// # Examples
///
/// Memory-backed settings (tests, transient runs) in TOML config:
/// ```toml
/// [settings]
/// type = "Memory"
/// ```
///
/// File-backed settings:
/// ```toml
/// [settings]
/// type = "File"
/// path = "/var/lib/mailsink"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SettingsConfig {
    /// Memory-based settings (testing/development)
    Memory,
    /// File-based settings (persistent)
    File(FileConfig),
}

/// Configuration for file-backed settings
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    /// Directory holding one settings file per context
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self::Memory
    }
}

impl SettingsConfig {
    /// Convert the configuration into a concrete settings store.
    ///
    /// # Errors
    /// If a file-backed store's directory cannot be created.
    pub fn into_store(self) -> Result<Arc<dyn SettingsStore>> {
        Ok(match self {
            Self::Memory => Arc::new(MemorySettingsStore::new()),
            Self::File(config) => Arc::new(FileSettingsStore::new(config.path)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::ContextId;

    #[test]
    fn memory_config_deserializes_from_toml() {
        let config: SettingsConfig = toml::from_str("type = \"Memory\"").unwrap();
        assert!(matches!(config, SettingsConfig::Memory));
    }

    #[test]
    fn file_config_deserializes_from_toml() {
        let config: SettingsConfig =
            toml::from_str("type = \"File\"\npath = \"/tmp/mailsink\"").unwrap();

        match config {
            SettingsConfig::File(file) => {
                assert_eq!(file.path, PathBuf::from("/tmp/mailsink"));
            }
            SettingsConfig::Memory => panic!("expected a file-backed config"),
        }
    }

    #[test]
    fn file_config_builds_a_working_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = SettingsConfig::File(FileConfig {
            path: dir.path().to_path_buf(),
        });

        let store = config.into_store().unwrap();
        store.update(ContextId::NONE, "enabled", json!(true)).unwrap();
        assert_eq!(
            store.get(ContextId::NONE, "enabled").unwrap(),
            Some(json!(true))
        );
    }
}
