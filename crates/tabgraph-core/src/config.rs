//! `tabgraph.toml` configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tabgraph.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabgraphConfig {
    pub canvas: CanvasConfig,
    pub layout: LayoutConfig,
    pub server: ServerSettings,
    /// Seed for default vertex placement. Unset means a fresh seed per run.
    pub seed: Option<u64>,
}

/// Area that default vertex positions are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Spacing of the hierarchical layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between consecutive levels.
    pub horizontal_spacing: f64,
    /// Distance between consecutively visited vertices.
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            horizontal_spacing: 200.0,
            vertical_spacing: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 7890,
        }
    }
}

impl TabgraphConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else `tabgraph.toml` under `dir` if it exists, else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TabgraphConfig::from_toml_str("", Path::new("x.toml")).unwrap();
        assert_eq!(config, TabgraphConfig::default());
        assert_eq!(config.layout.horizontal_spacing, 200.0);
        assert_eq!(config.layout.vertical_spacing, 100.0);
        assert_eq!(config.canvas.width, 800.0);
        assert_eq!(config.server.port, 7890);
    }

    #[test]
    fn test_partial_sections() {
        let text = r#"
seed = 9

[layout]
vertical_spacing = 50.0

[server]
port = 8080
"#;
        let config = TabgraphConfig::from_toml_str(text, Path::new("x.toml")).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.layout.vertical_spacing, 50.0);
        assert_eq!(config.layout.horizontal_spacing, 200.0);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let text = "[layout]\nvertical_spacing = \"wide\"";
        let err = TabgraphConfig::from_toml_str(text, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        let config = TabgraphConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config, TabgraphConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "[canvas]\nwidth = 100.0\n").unwrap();
        let config = TabgraphConfig::discover(None, dir.path()).unwrap();
        assert_eq!(config.canvas.width, 100.0);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            TabgraphConfig::discover(Some(&missing), dir.path()),
            Err(ConfigError::Read { .. })
        ));
    }
}
