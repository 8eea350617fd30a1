//! Tree payload parsing.
//!
//! The catalog ships as one JSON document: a root node recursively
//! containing `children`, each node carrying its declared fields
//! (`name`, `dependsOn`, `technos`, `host`, `satisfaction`).
//! Parsing builds the [`ArchTree`] arena, computing parent links and
//! depth as it descends. Missing optional fields become empty defaults.

mod json;

pub use json::{parse_tree_str, RawNode};

use crate::error::{ArchTreeError, ParseErrorKind, Result};
use crate::model::ArchTree;
use std::path::Path;

/// Maximum payload size (64 MB). Architecture catalogs are hand-curated;
/// anything larger is almost certainly the wrong file.
const MAX_PAYLOAD_SIZE: u64 = 64 * 1024 * 1024;

/// Parse a tree payload from a file.
pub fn parse_tree(path: &Path) -> Result<ArchTree> {
    let metadata = std::fs::metadata(path).map_err(|e| ArchTreeError::io(path, e))?;
    if metadata.len() > MAX_PAYLOAD_SIZE {
        return Err(ArchTreeError::parse(
            format!("at {}", path.display()),
            ParseErrorKind::PayloadTooLarge {
                size: metadata.len() / (1024 * 1024),
                limit: MAX_PAYLOAD_SIZE / (1024 * 1024),
            },
        ));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ArchTreeError::io(path, e))?;
    parse_tree_str(&content)
}
