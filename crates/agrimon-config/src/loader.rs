//! Configuration loading: file discovery, TOML/YAML parsing and environment overrides.

use crate::schema::Config;
use agrimon_common::AgriError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "AGRIMON_CONFIG";

/// Files probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["agrimon.toml", "agrimon.yaml", "agrimon.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name.
        var: String,
        /// Parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// File extension is neither TOML nor YAML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
}

impl From<ConfigError> for AgriError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

/// Configuration file syntax, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
}

impl ConfigFormat {
    /// Detect the format of a configuration file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse configuration text without overrides or validation.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(config)
    }

    /// Load configuration from a file with environment variable overrides.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with(path, |var| env::var(var).ok())
    }

    /// Load configuration from a file, reading overrides through `lookup`.
    pub fn load_config_with<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content, format)?;

        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration using the default search order.
    ///
    /// `AGRIMON_CONFIG`, then `agrimon.toml`, `agrimon.yaml` or `agrimon.yml` in
    /// the working directory, then built-in defaults. Environment overrides and
    /// validation apply in every case.
    pub fn load() -> agrimon_common::Result<Config> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Ok(Self::load_config(path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::defaults_with(|var| env::var(var).ok())?)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> agrimon_common::Result<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Built-in defaults with overrides from `lookup`, validated.
    pub fn defaults_with<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Apply `AGRIMON_*` overrides to a parsed configuration.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AGRIMON_API_URL") {
            config.api.base_url = url;
        }

        if let Some(timeout) = lookup("AGRIMON_API_TIMEOUT") {
            config.api.timeout_secs = if timeout.trim().is_empty() || timeout == "0" {
                None
            } else {
                Some(parse_var("AGRIMON_API_TIMEOUT", &timeout)?)
            };
        }

        if let Some(level) = lookup("AGRIMON_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("AGRIMON_LOG_FILE") {
            config.logging.file_path = Some(file);
        }

        if let Some(rows) = lookup("AGRIMON_PREVIEW_ROWS") {
            config.preview.max_rows = parse_var("AGRIMON_PREVIEW_ROWS", &rows)?;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_config(
            ".toml",
            "[api]\nbase_url = \"https://analytics.example.id\"\ntimeout_secs = 15\n\n[preview]\nmax_rows = 5\n",
        );
        let config = ConfigLoader::load_config_with(file.path(), no_env).unwrap();

        assert_eq!(config.api.base_url, "https://analytics.example.id");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.preview.max_rows, 5);
        // untouched sections keep their defaults
        assert_eq!(config.chart.width, 600);
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_config(
            ".yaml",
            "chart:\n  groups:\n    tinggi: \"#123456\"\npreview:\n  merged:\n    group_row: 2\n    sub_row: 3\n    data_start_row: 4\n",
        );
        let config = ConfigLoader::load_config_with(file.path(), no_env).unwrap();

        assert_eq!(config.chart.groups.tinggi, "#123456");
        assert_eq!(config.chart.groups.sedang, "#1a6b3f");
        assert_eq!(config.preview.merged.data_start_row, 4);
    }

    #[test]
    fn test_invalid_yaml() {
        let file = write_config(".yml", "api:\n  base_url: [unclosed");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::Yaml(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config(".toml", "[api\nbase_url = 1");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::Toml(_)));
    }

    #[test]
    fn test_validation_error() {
        let file = write_config(".toml", "[api]\nbase_url = \"not a url\"\n");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".ini", "[api]");
        let result = ConfigLoader::load_config_with(file.path(), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config_with("/nonexistent/path/agrimon.toml", no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::Io { .. }));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let file = write_config(".toml", "[api]\nbase_url = \"https://original.example.id\"\n");
        let env = env_from(&[
            ("AGRIMON_API_URL", "https://env.example.id"),
            ("AGRIMON_API_TIMEOUT", "45"),
            ("AGRIMON_LOG_LEVEL", "debug"),
            ("AGRIMON_PREVIEW_ROWS", "25"),
        ]);
        let config = ConfigLoader::load_config_with(file.path(), env).unwrap();

        assert_eq!(config.api.base_url, "https://env.example.id");
        assert_eq!(config.api.timeout_secs, Some(45));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.preview.max_rows, 25);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config =
            ConfigLoader::defaults_with(env_from(&[("AGRIMON_API_TIMEOUT", "0")])).unwrap();
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn test_env_parse_error() {
        let result = ConfigLoader::defaults_with(env_from(&[("AGRIMON_PREVIEW_ROWS", "ten")]));
        match result.unwrap_err() {
            ConfigError::EnvParse { var, .. } => assert_eq!(var, "AGRIMON_PREVIEW_ROWS"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_override_is_validated() {
        let result = ConfigLoader::defaults_with(env_from(&[("AGRIMON_PREVIEW_ROWS", "0")]));
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_config_error_converts_to_agri_error() {
        let err: AgriError = ConfigError::UnsupportedFormat("x.ini".to_string()).into();
        assert!(matches!(err, AgriError::Config { .. }));
    }
}
