//! Configuration file support for license-lookup.
//!
//! Provides YAML-based configuration through `license-lookup.config.yml`
//! files, including data structures, file loading, and validation.
//! Command-line flags always override file values.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shared::Result;

const CONFIG_FILENAME: &str = "license-lookup.config.yml";

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default minimum matcher confidence.
pub const DEFAULT_MIN_SCORE: f64 = 0.8;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub http_timeout_secs: Option<u64>,
    pub min_score: Option<f64>,
    pub cache_mode: Option<String>,
    pub cache_dir: Option<PathBuf>,
    /// Branch names to try instead of the built-in list.
    pub branches: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yml::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// The cache file location, honoring a configured override.
pub fn cache_file(config: Option<&ConfigFile>) -> PathBuf {
    if let Some(dir) = config.and_then(|c| c.cache_dir.clone()) {
        return dir.join("cache.json");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".license-lookup")
        .join("cache.json")
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(score) = config.min_score {
        if !(0.0..=1.0).contains(&score) {
            bail!(
                "Invalid config: min_score must be between 0.0 and 1.0, got {}.\n\n\
                 💡 Hint: Scores are matcher confidences in the range 0.0..=1.0.",
                score
            );
        }
    }
    if let Some(mode) = &config.cache_mode {
        if mode.parse::<crate::application::cache::CacheMode>().is_err() {
            bail!(
                "Invalid config: cache_mode must be 'enabled', 'disabled' or 'update', got \"{}\".",
                mode
            );
        }
    }
    if let Some(branches) = &config.branches {
        if branches.iter().any(|b| b.trim().is_empty()) {
            bail!("Invalid config: branches must not contain empty names.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
http_timeout_secs: 5
min_score: 0.9
cache_mode: update
branches:
  - main
  - trunk
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.http_timeout_secs, Some(5));
        assert_eq!(config.min_score, Some(0.9));
        assert_eq!(config.cache_mode.as_deref(), Some("update"));
        assert_eq!(
            config.branches.as_deref(),
            Some(&["main".to_string(), "trunk".to_string()][..])
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "min_score: 0.7\n").unwrap();

        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_some());
        assert_eq!(config.unwrap().min_score, Some(0.7));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_min_score_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "min_score: 1.5\n").unwrap();

        let result = load_config_from_path(&config_path);
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("min_score"));
    }

    #[test]
    fn test_invalid_cache_mode_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "cache_mode: sometimes\n").unwrap();

        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_unknown_fields_captured() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "min_score: 0.8\nunknown_field: true\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 1);
        assert!(config.unknown_fields.contains_key("unknown_field"));
    }

    #[test]
    fn test_cache_file_honors_override() {
        let config = ConfigFile {
            cache_dir: Some(PathBuf::from("/var/cache/ll")),
            ..Default::default()
        };
        assert_eq!(
            cache_file(Some(&config)),
            PathBuf::from("/var/cache/ll/cache.json")
        );
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.http_timeout_secs.is_none());
        assert!(config.min_score.is_none());
        assert!(config.cache_mode.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
