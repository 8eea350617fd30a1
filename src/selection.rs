//! Selection and highlight state machine.
//!
//! Exactly two states: Idle (no active node) and Selected (one active
//! node). Selecting dims every node unrelated to the active one; the
//! related set comes from the precomputed `index.related_nodes`, so the
//! controller itself does no graph walking.
//!
//! Outward notifications are queued as [`SelectionEvent`]s and drained by
//! the caller, one event per transition.

use crate::model::ArchTree;
use std::collections::{HashMap, VecDeque};

/// Opacity applied to nodes unrelated to the active selection.
pub const DIM_OPACITY: f32 = 0.1;
/// Opacity of nodes with no dimming applied.
pub const FULL_OPACITY: f32 = 1.0;

/// Notification emitted on a selection transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A node became the active selection.
    Selected(String),
    /// The active selection was cleared.
    Unselected,
}

/// Tracks at most one active node and the fade state it implies.
#[derive(Debug, Default)]
pub struct SelectionController {
    /// Name of the active node; `None` is the Idle state.
    active: Option<String>,
    /// Per-node opacity as written by the fade operation. Nodes absent
    /// from the map are at full opacity.
    opacity: HashMap<String, f32>,
    /// Pending outward notifications.
    events: VecDeque<SelectionEvent>,
}

impl SelectionController {
    /// Create a controller in the Idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the active node, if any.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether the named node is the active selection.
    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        self.active.as_deref() == Some(name)
    }

    /// Current opacity of a node (full when never dimmed).
    #[must_use]
    pub fn opacity_of(&self, name: &str) -> f32 {
        self.opacity.get(name).copied().unwrap_or(FULL_OPACITY)
    }

    /// Drain the next pending notification.
    pub fn poll_event(&mut self) -> Option<SelectionEvent> {
        self.events.pop_front()
    }

    /// Select a node by name.
    ///
    /// Re-selecting the active name toggles back to Idle. Selecting while
    /// another node is active clears that highlight first. An unknown name
    /// is a no-op: no state change, no notification.
    pub fn select(&mut self, tree: &ArchTree, name: &str) {
        if self.is_active(name) {
            self.unselect(tree);
            return;
        }
        self.unselect(tree);

        let Some(id) = tree.find_by_name(name) else {
            return;
        };
        let node = tree.node(id);
        self.active = Some(node.name.clone());
        self.fade(tree, name, DIM_OPACITY);
        self.events
            .push_back(SelectionEvent::Selected(node.name.clone()));
    }

    /// Clear the active selection.
    ///
    /// No-op when Idle. Restores full opacity to the dimmed set, recomputed
    /// with the same related-nodes predicate against the outgoing node.
    pub fn unselect(&mut self, tree: &ArchTree) {
        let Some(outgoing) = self.active.take() else {
            return;
        };
        self.fade(tree, &outgoing, FULL_OPACITY);
        self.events.push_back(SelectionEvent::Unselected);
    }

    /// Apply a target opacity to every node unrelated to `name`.
    ///
    /// A node is spared when it is the named node itself or appears in the
    /// named node's `index.related_nodes`.
    fn fade(&mut self, tree: &ArchTree, name: &str, opacity: f32) {
        let Some(center) = tree.node_by_name(name) else {
            return;
        };
        for node in tree.nodes() {
            if node.name == name {
                continue;
            }
            if center.index.related_nodes.contains(&node.name) {
                continue;
            }
            if (opacity - FULL_OPACITY).abs() < f32::EPSILON {
                self.opacity.remove(&node.name);
            } else {
                self.opacity.insert(node.name.clone(), opacity);
            }
        }
    }
}
