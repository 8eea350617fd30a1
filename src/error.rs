//! Unified error types for archtree.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for archtree operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArchTreeError {
    /// Errors during payload parsing
    #[error("Failed to parse tree payload: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors during index building
    #[error("Index build failed: {context}")]
    Index {
        context: String,
        #[source]
        source: IndexErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Payload too large: {size} MB (limit {limit} MB)")]
    PayloadTooLarge { size: u64, limit: u64 },
}

/// Specific index error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IndexErrorKind {
    /// A parent link walked back onto an already-visited node. Well-formed
    /// trees cannot produce this; it means the payload (or a caller mutation)
    /// corrupted the parent chain. Returned instead of looping forever in
    /// the cascade walk.
    #[error("Parent-link cycle detected at node '{node}'")]
    ParentCycle { node: String },

    #[error("Tree has no nodes")]
    EmptyTree,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for archtree operations
pub type Result<T> = std::result::Result<T, ArchTreeError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ArchTreeError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an index error with context
    pub fn index(context: impl Into<String>, source: IndexErrorKind) -> Self {
        Self::Index {
            context: context.into(),
            source,
        }
    }

    /// Create an index error for a parent-link cycle
    pub fn parent_cycle(node: impl Into<String>) -> Self {
        Self::index(
            "cascade walk aborted",
            IndexErrorKind::ParentCycle { node: node.into() },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ArchTreeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ArchTreeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ArchTreeError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ArchTreeError, new_ctx: &str) -> ArchTreeError {
    match err {
        ArchTreeError::Parse {
            context: existing,
            source,
        } => ArchTreeError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ArchTreeError::Index {
            context: existing,
            source,
        } => ArchTreeError::Index {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ArchTreeError::Io {
            path,
            message,
            source,
        } => ArchTreeError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ArchTreeError::Config(msg) => ArchTreeError::Config(chain_context(new_ctx, &msg)),
        ArchTreeError::Validation(msg) => ArchTreeError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| ArchTreeError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchTreeError::missing_field("name", "root node");
        let display = err.to_string();
        assert!(
            display.contains("parse") || display.contains("payload"),
            "Error message should mention parsing: {}",
            display
        );
    }

    #[test]
    fn test_parent_cycle_display() {
        let err = ArchTreeError::parent_cycle("Api");
        assert!(err.to_string().contains("Index build failed"));
        match err {
            ArchTreeError::Index {
                source: IndexErrorKind::ParentCycle { node },
                ..
            } => assert_eq!(node, "Api"),
            _ => panic!("Expected Index error"),
        }
    }

    #[test]
    fn test_io_error_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ArchTreeError::io("/path/to/tree.json", io_err);

        assert!(err.to_string().contains("/path/to/tree.json"));
    }

    #[test]
    fn test_context_chaining() {
        fn inner() -> Result<()> {
            Err(ArchTreeError::parse(
                "base",
                ParseErrorKind::InvalidJson("oops".into()),
            ))
        }

        fn outer() -> Result<()> {
            inner().context("outer layer")
        }

        match outer() {
            Err(ArchTreeError::Parse { context, .. }) => {
                assert!(context.contains("outer layer"), "Missing outer: {}", context);
                assert!(context.contains("base"), "Missing base: {}", context);
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        let result = none_value.context_none("missing value");
        match result {
            Err(ArchTreeError::Validation(msg)) => assert_eq!(msg, "missing value"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
