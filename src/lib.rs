//! **An interactive dependency-tree explorer for software architecture catalogs.**
//!
//! `archtree` loads a labeled component tree with cross-cutting "depends on"
//! declarations and turns it into an explorable view: select a node to
//! highlight everything related to it, or filter the catalog by name,
//! technology, or host.
//!
//! The interesting part is the derived index. For every node the engine
//! precomputes:
//!
//! - **dependents** — the inverse of the declared `dependsOn` relation,
//! - **related nodes** — the ancestor-cascaded dependency closure plus the
//!   node's direct dependents,
//! - **inherited technologies and hosts** — attributes cascade down the
//!   tree, so a child without its own declarations inherits its ancestors'.
//!
//! Filtering and selection highlighting are predicates over that index, so
//! they stay cheap no matter how often the user types.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`ArchTree`] arena and [`build_index`], which
//!   computes the per-node [`NodeIndex`] records.
//! - **[`engine`]**: the [`Explorer`] facade — one instance per chart,
//!   owning the tree, filter criteria, and selection state.
//! - **[`filter`]**: [`FilterCriteria`] and the match predicate.
//! - **[`selection`]**: the two-state highlight controller and its
//!   outbound [`SelectionEvent`] notifications.
//! - **[`parsers`]**: JSON payload loading.
//! - **[`tui`]**: the ratatui presentation layer.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use archtree::{parse_tree, Explorer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tree = parse_tree(Path::new("architecture.json"))?;
//!     let mut explorer = Explorer::new(tree)?;
//!
//!     explorer.select("Api");
//!     while let Some(event) = explorer.poll_event() {
//!         println!("{event:?}");
//!     }
//!
//!     let report = explorer.set_name_filter("store".to_string());
//!     for m in report.iter().filter(|m| m.matched) {
//!         println!("match: {}", m.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface
//!
//! This documentation is for the library crate. The `archtree` binary
//! provides `view` (interactive TUI), `index` (JSON dump of the derived
//! index), and `check` (payload diagnostics) subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize↔u16/f32 casts are pervasive in TUI layout math —
    // all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // TUI render functions are inherently long — splitting hurts readability
    clippy::too_many_lines,
    // Variable names like `min`/`mid` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod model;
pub mod parsers;
pub mod selection;
pub mod tui;

// Re-export main types for convenience
pub use config::{AppConfig, CheckConfig, FilterDefaults, IndexConfig, TuiConfig, ViewConfig};
pub use config::{ConfigError, Validatable};
pub use engine::Explorer;
pub use error::{ArchTreeError, ErrorContext, OptionContext, Result};
pub use filter::{FilterCriteria, FilterMatch};
pub use model::{build_index, ArchTree, Node, NodeId, NodeIndex};
pub use parsers::{parse_tree, parse_tree_str};
pub use selection::{SelectionController, SelectionEvent, DIM_OPACITY, FULL_OPACITY};
