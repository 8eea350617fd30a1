//! Configuration module for archtree.
//!
//! Provides typed configuration structures, validation, YAML config file
//! loading and discovery, and persisted TUI preferences.
//!
//! # Configuration File
//!
//! Place a `.archtree.yaml` file in your project root or
//! `~/.config/archtree/`:
//!
//! ```yaml
//! tui:
//!   theme: light
//! filters:
//!   technos: [PHP]
//! ```

pub mod file;
mod types;
mod validation;

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAME,
};
pub use types::{
    AppConfig, CheckConfig, FilterDefaults, IndexConfig, OutputConfig, OutputFormat, TuiConfig,
    TuiPreferences, ViewConfig,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Documents all options settable in `.archtree.yaml`; usable by editors
/// for validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
