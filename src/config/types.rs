//! Typed configuration structures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// File-loadable application configuration
// ============================================================================

/// Application configuration, loadable from `.archtree.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// TUI settings.
    pub tui: TuiConfig,
    /// Filters applied when the explorer starts.
    pub filters: FilterDefaults,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
    /// Start with the whole tree expanded
    pub start_expanded: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: true,
            start_expanded: true,
        }
    }
}

/// Filter criteria pre-seeded at startup.
///
/// The name value is folded to lowercase before it reaches the engine,
/// matching what the interactive filter input does.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterDefaults {
    /// Name substring filter
    pub name: String,
    /// Technology labels (conjunctive)
    pub technos: Vec<String>,
    /// Host labels (conjunctive)
    pub hosts: Vec<String>,
}

// ============================================================================
// Per-command configuration (assembled from CLI args)
// ============================================================================

/// Output format for non-interactive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// TUI if stdout is a terminal, summary otherwise
    #[default]
    Auto,
    /// Interactive terminal UI
    Tui,
    /// JSON dump of the indexed tree
    Json,
    /// Human-readable summary
    Summary,
}

/// Output configuration shared by commands.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (stdout if not specified)
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Configuration for the `view` command.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Path to the tree payload
    pub tree_path: PathBuf,
    /// Output configuration
    pub output: OutputConfig,
    /// Filters applied at startup
    pub filters: FilterDefaults,
    /// TUI settings
    pub tui: TuiConfig,
}

/// Configuration for the `index` command.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Path to the tree payload
    pub tree_path: PathBuf,
    /// Output file path (stdout if not specified)
    pub file: Option<PathBuf>,
    /// Pretty-print the JSON
    pub pretty: bool,
}

/// Configuration for the `check` command.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Path to the tree payload
    pub tree_path: PathBuf,
    /// Emit the report as JSON instead of text
    pub json: bool,
}

// ============================================================================
// TUI preferences persisted across runs
// ============================================================================

/// User preferences persisted under the config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiPreferences {
    /// Theme name: "dark" or "light"
    pub theme: String,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl TuiPreferences {
    /// Get the path to the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("archtree").join("preferences.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tui.theme, "dark");
        assert!(config.tui.start_expanded);
        assert!(config.filters.name.is_empty());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: AppConfig = serde_yaml::from_str("tui:\n  theme: light\n").unwrap();
        assert_eq!(config.tui.theme, "light");
        assert!(config.tui.mouse_enabled);
    }
}
