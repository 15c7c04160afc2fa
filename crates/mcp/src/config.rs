use crate::error::ServerError;
use crate::protocol::ServerInfo;
use serde::{Deserialize, Serialize};
use std::path::Path;
use synthcore_core::ValidationThresholds;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub validation: ValidationThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,
}

fn default_name() -> String {
    "synthcore-2.0".to_string()
}

fn default_version() -> String {
    "2.0.0".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

/// Values supplied on the command line or through the environment; each one
/// set replaces the file value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server_name: Option<String>,
    pub server_version: Option<String>,
    pub min_resonance: Option<f64>,
    pub max_ethical_drift: Option<f64>,
    pub max_reflexive_instability: Option<f64>,
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self, ServerError> {
        // Load config file if it exists, otherwise use defaults
        if !config_path.exists() {
            tracing::info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ServerError::ConfigRead {
            path: config_path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ServerError::ConfigParse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(name) = overrides.server_name {
            self.server.name = name;
        }
        if let Some(version) = overrides.server_version {
            self.server.version = version;
        }
        if let Some(min) = overrides.min_resonance {
            self.validation.min_resonance = min;
        }
        if let Some(max) = overrides.max_ethical_drift {
            self.validation.max_ethical_drift = max;
        }
        if let Some(max) = overrides.max_reflexive_instability {
            self.validation.max_reflexive_instability = max;
        }
        self
    }

    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: self.server.name.clone(),
            version: self.server.version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.server.name, "synthcore-2.0");
        assert_eq!(config.server.version, "2.0.0");
        assert_eq!(config.validation.min_resonance, 0.6);
        assert_eq!(config.validation.max_ethical_drift, 0.05);
        assert_eq!(config.validation.max_reflexive_instability, 0.08);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ServerConfig::load(&temp_dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.server.name, "synthcore-2.0");
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("synthcore.toml");
        std::fs::write(
            &path,
            "[server]\nname = \"custom\"\n\n[validation]\nmax_ethical_drift = 0.2\n",
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.server.name, "custom");
        assert_eq!(config.server.version, "2.0.0");
        assert_eq!(config.validation.max_ethical_drift, 0.2);
        assert_eq!(config.validation.min_resonance, 0.6);
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("synthcore.toml");
        std::fs::write(&path, "[server\nname = ").unwrap();

        let err = ServerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ServerError::ConfigParse { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let config = ServerConfig::default().with_overrides(ConfigOverrides {
            server_version: Some("3.1.0".to_string()),
            min_resonance: Some(0.75),
            ..Default::default()
        });

        assert_eq!(config.server.name, "synthcore-2.0");
        assert_eq!(config.server_info().version, "3.1.0");
        assert_eq!(config.validation.min_resonance, 0.75);
        assert_eq!(config.validation.max_reflexive_instability, 0.08);
    }
}
