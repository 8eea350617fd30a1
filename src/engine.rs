//! One chart instance: tree, derived index, filter criteria, selection.
//!
//! The [`Explorer`] is the seam between the core engine and a presentation
//! layer. It owns all mutable per-instance state, so the index rebuild is
//! one indivisible step with respect to filter and selection reads — the
//! borrow checker enforces the barrier the engine requires.

use crate::error::Result;
use crate::filter::{FilterCriteria, FilterMatch};
use crate::model::{build_index, ArchTree};
use crate::selection::{SelectionController, SelectionEvent};

/// Interactive state for one architecture tree.
///
/// Multiple explorers never share node objects; each owns its tree.
pub struct Explorer {
    tree: ArchTree,
    criteria: FilterCriteria,
    selection: SelectionController,
}

impl Explorer {
    /// Build an explorer over a tree, computing the derived index.
    pub fn new(mut tree: ArchTree) -> Result<Self> {
        build_index(&mut tree)?;
        tree.calculate_content_hash();
        tree.log_duplicate_summary();
        Ok(Self {
            tree,
            criteria: FilterCriteria::new(),
            selection: SelectionController::new(),
        })
    }

    /// The indexed tree.
    #[must_use]
    pub fn tree(&self) -> &ArchTree {
        &self.tree
    }

    /// Current filter criteria.
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the tree with a new payload and rebuild the index.
    ///
    /// Skips the rebuild when the declared content is unchanged (hash
    /// equality), keeping selection and filters intact. A changed payload
    /// clears the selection — the active node may no longer exist.
    pub fn reload(&mut self, mut tree: ArchTree) -> Result<bool> {
        tree.calculate_content_hash();
        if tree.content_hash == self.tree.content_hash {
            return Ok(false);
        }
        self.selection.unselect(&self.tree);
        build_index(&mut tree)?;
        tree.log_duplicate_summary();
        self.tree = tree;
        Ok(true)
    }

    /// Set the name filter and report every node's match state.
    ///
    /// The value is matched as a substring of the lowercased node name;
    /// fold it to lowercase before passing it in.
    pub fn set_name_filter(&mut self, name: impl Into<String>) -> Vec<FilterMatch> {
        self.criteria.name = name.into();
        self.refresh_filters()
    }

    /// Set the technology filter (conjunctive) and report match states.
    pub fn set_technos_filter(&mut self, technos: Vec<String>) -> Vec<FilterMatch> {
        self.criteria.technos = technos;
        self.refresh_filters()
    }

    /// Set the host filter (conjunctive) and report match states.
    pub fn set_hosts_filter(&mut self, hosts: Vec<String>) -> Vec<FilterMatch> {
        self.criteria.hosts = hosts;
        self.refresh_filters()
    }

    /// Evaluate the current criteria against every node.
    #[must_use]
    pub fn refresh_filters(&self) -> Vec<FilterMatch> {
        self.tree
            .nodes()
            .map(|node| FilterMatch {
                name: node.name.clone(),
                matched: self.criteria.matches(node),
            })
            .collect()
    }

    /// Whether a node matches the current criteria.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.tree
            .node_by_name(name)
            .is_some_and(|node| self.criteria.matches(node))
    }

    /// Select a node by name (toggle semantics).
    pub fn select(&mut self, name: &str) {
        self.selection.select(&self.tree, name);
    }

    /// Clear the active selection.
    pub fn unselect(&mut self) {
        self.selection.unselect(&self.tree);
    }

    /// Name of the active node, if any.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.selection.active()
    }

    /// Whether the named node is the active selection.
    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        self.selection.is_active(name)
    }

    /// Current highlight opacity of a node.
    #[must_use]
    pub fn opacity_of(&self, name: &str) -> f32 {
        self.selection.opacity_of(name)
    }

    /// Drain the next pending selection notification.
    pub fn poll_event(&mut self) -> Option<SelectionEvent> {
        self.selection.poll_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use crate::selection::{DIM_OPACITY, FULL_OPACITY};

    fn fixture() -> ArchTree {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("root"), None);
        let mut api = Node::new("Api");
        api.depends_on = vec!["Store".to_string()];
        api.technos = vec!["PHP".to_string()];
        tree.add_node(api, Some(root));
        tree.add_node(Node::new("Store"), Some(root));
        tree
    }

    #[test]
    fn test_new_builds_index() {
        let explorer = Explorer::new(fixture()).unwrap();
        let store = explorer.tree().node_by_name("Store").unwrap();
        assert_eq!(store.dependents, vec!["Api".to_string()]);
    }

    #[test]
    fn test_filter_report_covers_all_nodes() {
        let mut explorer = Explorer::new(fixture()).unwrap();
        let report = explorer.set_name_filter("api");

        assert_eq!(report.len(), 3);
        let api = report.iter().find(|m| m.name == "Api").unwrap();
        assert!(api.matched);
        let store = report.iter().find(|m| m.name == "Store").unwrap();
        assert!(!store.matched);
    }

    #[test]
    fn test_select_and_opacity() {
        let mut explorer = Explorer::new(fixture()).unwrap();
        explorer.select("Api");

        assert!(explorer.is_active("Api"));
        assert_eq!(explorer.opacity_of("Store"), FULL_OPACITY);
        assert_eq!(explorer.opacity_of("root"), DIM_OPACITY);
        assert_eq!(
            explorer.poll_event(),
            Some(SelectionEvent::Selected("Api".to_string()))
        );
    }

    #[test]
    fn test_reload_unchanged_payload_skips_rebuild() {
        let mut explorer = Explorer::new(fixture()).unwrap();
        explorer.select("Api");

        let rebuilt = explorer.reload(fixture()).unwrap();
        assert!(!rebuilt);
        // Selection survives a no-op reload.
        assert!(explorer.is_active("Api"));
    }

    #[test]
    fn test_reload_changed_payload_rebuilds() {
        let mut explorer = Explorer::new(fixture()).unwrap();
        explorer.select("Api");
        explorer.poll_event();

        let mut changed = fixture();
        let root = changed.root().unwrap();
        changed.add_node(Node::new("Cache"), Some(root));

        let rebuilt = explorer.reload(changed).unwrap();
        assert!(rebuilt);
        assert!(explorer.active().is_none());
        assert_eq!(explorer.poll_event(), Some(SelectionEvent::Unselected));
        assert!(explorer.tree().node_by_name("Cache").is_some());
    }
}
