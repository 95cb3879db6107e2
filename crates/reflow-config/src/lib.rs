use reflow_engine::geometry::{Margins, PageSetup, PageSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub output_path: PathBuf,
    #[serde(default = "default_page_width")]
    pub page_width: f64,
    #[serde(default = "default_page_height")]
    pub page_height: f64,
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_page_width() -> f64 {
    PageSize::default().width
}

fn default_page_height() -> f64 {
    PageSize::default().height
}

fn default_margin() -> f64 {
    Margins::default().left
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded output path
        config.output_path = Self::expand_path(&config.output_path).unwrap_or(config.output_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/reflow");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Page geometry described by this config.
    pub fn page_setup(&self) -> PageSetup {
        PageSetup {
            size: PageSize {
                width: self.page_width,
                height: self.page_height,
            },
            margins: Margins::uniform(self.margin),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("out"),
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin: default_margin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        // Should contain the expected config file name
        assert!(path_str.ends_with(".config/reflow/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            output_path: PathBuf::from("/tmp/reflow-out"),
            page_width: 650.0,
            page_height: 750.0,
            margin: 36.0,
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original.output_path, deserialized.output_path);
        assert_eq!(original.page_width, deserialized.page_width);
        assert_eq!(original.margin, deserialized.margin);
    }

    #[test]
    fn missing_geometry_falls_back_to_us_letter() {
        let config: Config = toml::from_str(r#"output_path = "out""#).unwrap();

        let setup = config.page_setup();
        assert_eq!(setup.size.width, 612.0);
        assert_eq!(setup.size.height, 792.0);
        assert_eq!(setup.margins.left, 72.0);
    }

    #[test]
    fn load_from_missing_path_is_none() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn save_and_reload() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("nested/config.toml");

        let config = Config {
            output_path: PathBuf::from("/tmp/pages"),
            ..Config::default()
        };
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(loaded.output_path, PathBuf::from("/tmp/pages"));
        assert_eq!(loaded.page_width, 612.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "output_path = [not toml").unwrap();

        let result = Config::load_from_path(&config_path);
        assert!(matches!(
            result,
            Err(ConfigError::ConfigParseError { .. })
        ));
    }
}
