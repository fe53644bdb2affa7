//! Project configuration file support for veriport.
//!
//! Loads configuration from `veriport.toml` in the working directory.
//! CLI flags take priority over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Project-level configuration loaded from `veriport.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Model name passed to the backend
    pub model: Option<String>,
    /// Default target language
    pub target_language: Option<String>,
    /// Default output extension override
    pub target_ext: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Iteration budget
    pub max_iters: Option<usize>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "veriport.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_loads_known_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
model = "gpt-5"
target_language = "rust"
temperature = 0.1
max_iters = 5
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(config.model.as_deref(), Some("gpt-5"));
        assert_eq!(config.target_language.as_deref(), Some("rust"));
        assert_eq!(config.max_iters, Some(5));
        assert_eq!(config.target_ext, None);
    }

    #[test]
    fn test_unknown_field_is_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "modle = \"typo\"\n").unwrap();
        assert!(ProjectConfig::load(dir.path()).is_err());
    }
}
