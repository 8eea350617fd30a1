//! Configuration validation.

use super::types::{AppConfig, TuiConfig};
use thiserror::Error;

/// Validation error for configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown theme '{0}' (expected 'dark' or 'light')")]
    UnknownTheme(String),

    #[error("Invalid filter value: {0}")]
    InvalidFilter(String),
}

/// Trait for configuration types that can validate themselves.
pub trait Validatable {
    /// Validate all values, returning the first problem found.
    fn validate(&self) -> Result<(), ConfigError>;
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self.theme.as_str() {
            "dark" | "light" => Ok(()),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.tui.validate()?;
        for value in self.filters.technos.iter().chain(&self.filters.hosts) {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidFilter(
                    "empty label in filter list".to_string(),
                ));
            }
        }
        Ok(())
    }
}
