//! Config file discovery and loading.
//!
//! Looks for `.archtree.yaml` in the current directory, then for
//! `config.yaml` under the user config directory (`~/.config/archtree/`).

use super::types::AppConfig;
use super::validation::Validatable;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from config file loading.
#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: super::validation::ConfigError,
    },
}

/// File name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = ".archtree.yaml";

/// Discover a config file, nearest first.
#[must_use]
pub fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|p| p.join("archtree").join("config.yaml"))
        .filter(|p| p.is_file())
}

/// Load and validate a config file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig =
        serde_yaml::from_str(&content).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config
        .validate()
        .map_err(|source| ConfigFileError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config)
}

/// Load from an explicit path, a discovered file, or defaults.
///
/// Returns the config and the path it was loaded from (None = defaults).
pub fn load_or_default(
    explicit: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }
    if let Some(path) = discover_config_file() {
        match load_config_file(&path) {
            Ok(config) => return Ok((config, Some(path))),
            Err(e) => {
                tracing::warn!("Ignoring discovered config {}: {e}", path.display());
            }
        }
    }
    Ok((AppConfig::default(), None))
}

/// Generate a commented example config file.
#[must_use]
pub fn generate_example_config() -> String {
    r"# archtree configuration
# Place this file as .archtree.yaml in your project root,
# or as ~/.config/archtree/config.yaml

tui:
  # Theme: dark or light
  theme: dark
  mouse_enabled: true
  # Start with the whole tree expanded
  start_expanded: true

filters:
  # Filters applied at startup; same semantics as the interactive ones.
  name: ''
  technos: []
  hosts: []
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tui:\n  theme: light\nfilters:\n  technos: [PHP]").unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.tui.theme, "light");
        assert_eq!(config.filters.technos, vec!["PHP".to_string()]);
    }

    #[test]
    fn test_load_invalid_theme() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tui:\n  theme: sepia").unwrap();

        let err = load_config_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::Invalid { .. }));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tui: [not a map").unwrap();

        let err = load_config_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse { .. }));
    }

    #[test]
    fn test_example_config_parses() {
        let example = generate_example_config();
        let config: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_explicit_missing() {
        let err = load_or_default(Some(Path::new("/nonexistent/archtree.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigFileError::Read { .. }));
    }
}
