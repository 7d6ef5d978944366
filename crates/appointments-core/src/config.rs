//! Store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{AppointmentStore, SeedError};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to load seed: {0}")]
    Seed(#[from] SeedError),
}

/// Where the store's initial records come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SeedSource {
    /// The built-in fixture
    #[default]
    Builtin,
    /// A JSON array of appointment records on disk
    JsonFile { path: PathBuf },
}

/// Store configuration.
///
/// ```json
/// { "seed": { "source": "json_file", "path": "appointments.json" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default)]
    pub seed: SeedSource,
}

impl StoreConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the store this configuration describes.
    pub fn build(&self) -> Result<AppointmentStore, ConfigError> {
        let store = match &self.seed {
            SeedSource::Builtin => AppointmentStore::seeded(),
            SeedSource::JsonFile { path } => AppointmentStore::from_json_file(path)?,
        };
        tracing::debug!(seed = ?self.seed, records = store.len(), "Built appointment store");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_builtin() {
        let config = StoreConfig::from_json("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.build().unwrap().len(), 10);
    }

    #[test]
    fn test_explicit_builtin() {
        let config = StoreConfig::from_json(r#"{"seed": {"source": "builtin"}}"#).unwrap();
        assert_eq!(config.seed, SeedSource::Builtin);
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"id": 21, "name": "Kai Tanaka", "date": "2026-01-05", "time": "10:30",
                  "duration": 15, "doctorName": "Dr. Okafor", "status": "Scheduled",
                  "mode": "Online"}]"#,
        )
        .unwrap();

        let json = serde_json::json!({
            "seed": { "source": "json_file", "path": file.path() }
        })
        .to_string();
        let config = StoreConfig::from_json(&json).unwrap();

        let store = config.build().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(21).unwrap().doctor_name, "Dr. Okafor");
    }

    #[test]
    fn test_unknown_source_rejected() {
        let err = StoreConfig::from_json(r#"{"seed": {"source": "postgres"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_seed_file() {
        let config = StoreConfig {
            seed: SeedSource::JsonFile {
                path: PathBuf::from("/nonexistent/appointments.json"),
            },
        };
        let err = config.build().err().unwrap();
        assert!(matches!(err, ConfigError::Seed(SeedError::Io(_))));
    }
}
