//! Filter predicate evaluation over the derived node index.
//!
//! Criteria are an explicit value owned by each chart instance — there is
//! no process-wide filter state, so independent [`crate::Explorer`]s never
//! observe each other's filters.

use crate::model::Node;
use serde::{Deserialize, Serialize};

/// Current filter criteria. All fields empty means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Substring match against the node name. The node name is folded to
    /// lowercase internally; folding this value is the caller's
    /// responsibility.
    pub name: String,
    /// Conjunctive containment against `index.technos`: every entry must
    /// be present for a node to match.
    pub technos: Vec<String>,
    /// Conjunctive containment against `index.hosts`.
    pub hosts: Vec<String>,
}

impl FilterCriteria {
    /// Criteria that match every node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no category is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.technos.is_empty() && self.hosts.is_empty()
    }

    /// Decide whether a node is a visual match under these criteria.
    ///
    /// Every active category must hold simultaneously. Pure: no side
    /// effects, reads only the node's name and derived index.
    #[must_use]
    pub fn matches(&self, node: &Node) -> bool {
        if self.is_empty() {
            return true;
        }
        if !self.name.is_empty() && !node.name.to_lowercase().contains(&self.name) {
            return false;
        }
        if !self.technos.is_empty() {
            if node.index.technos.is_empty() {
                return false;
            }
            for techno in &self.technos {
                if !node.index.technos.contains(techno) {
                    return false;
                }
            }
        }
        if !self.hosts.is_empty() {
            if node.index.hosts.is_empty() {
                return false;
            }
            for host in &self.hosts {
                if !node.index.hosts.contains(host) {
                    return false;
                }
            }
        }
        true
    }
}

/// Per-node filter outcome reported after a criteria change.
///
/// Consumed by the presentation layer to toggle the "not found" visual
/// state on non-matching nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterMatch {
    /// Node name.
    pub name: String,
    /// Whether the node matches the current criteria.
    pub matched: bool,
}
