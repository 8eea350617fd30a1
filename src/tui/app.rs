//! `ViewApp` - application state for the interactive explorer.

use crate::config::TuiConfig;
use crate::engine::Explorer;
use crate::parsers::parse_tree;
use crate::selection::SelectionEvent;
use crate::tui::widgets::{flatten_tree, NodeLine, TreeState};
use std::collections::HashSet;
use std::path::PathBuf;

/// Which filter field an input overlay is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    Technos,
    Hosts,
}

impl FilterField {
    /// Input prompt label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Technos => "technos (comma-separated)",
            Self::Hosts => "hosts (comma-separated)",
        }
    }
}

/// Main application state for exploring one architecture tree.
pub struct ViewApp {
    /// The engine instance this app presents
    pub(crate) explorer: Explorer,

    /// Payload path, for reloads
    pub(crate) tree_path: PathBuf,

    /// Tree navigation state
    pub(crate) tree_state: TreeState,

    /// Nodes missed by the current filters ("not found" visual state)
    pub(crate) not_found: HashSet<String>,

    /// Filter field currently being edited, if any
    pub(crate) filter_input: Option<FilterField>,

    /// Buffer for the filter input overlay
    pub(crate) input_buffer: String,

    /// Node shown in the detail panel; driven by selection notifications
    pub(crate) detail: Option<String>,

    /// Show help overlay
    pub(crate) show_help: bool,

    /// Status message to display temporarily
    pub(crate) status_message: Option<String>,

    /// Should quit
    pub(crate) should_quit: bool,

    /// Animation tick counter
    pub(crate) tick: u64,

    /// Whether mouse capture is enabled
    pub(crate) mouse_enabled: bool,
}

impl ViewApp {
    /// Create a new `ViewApp` over a built explorer.
    #[must_use]
    pub fn new(explorer: Explorer, tree_path: PathBuf, tui: &TuiConfig) -> Self {
        let mut tree_state = TreeState::new();
        if tui.start_expanded {
            tree_state.expand_all(explorer.tree());
        } else if let Some(root) = explorer.tree().root() {
            tree_state.expand(&explorer.tree().node(root).name.clone());
        }

        let mut app = Self {
            explorer,
            tree_path,
            tree_state,
            not_found: HashSet::new(),
            filter_input: None,
            input_buffer: String::new(),
            detail: None,
            show_help: false,
            status_message: None,
            should_quit: false,
            tick: 0,
            mouse_enabled: tui.mouse_enabled,
        };
        app.refresh_filters();
        app
    }

    /// Re-evaluate filters and update the "not found" set.
    pub fn refresh_filters(&mut self) {
        self.not_found = self
            .explorer
            .refresh_filters()
            .into_iter()
            .filter(|m| !m.matched)
            .map(|m| m.name)
            .collect();
    }

    /// Build the decorated rows for the tree widget.
    #[must_use]
    pub fn visible_lines(&self) -> Vec<NodeLine> {
        let mut lines = flatten_tree(self.explorer.tree(), &self.tree_state);
        for line in &mut lines {
            line.active = self.explorer.is_active(&line.name);
            line.dimmed = self.explorer.opacity_of(&line.name) < 1.0;
            line.not_found = self.not_found.contains(&line.name);
        }
        lines
    }

    /// Name of the node under the cursor, if any.
    #[must_use]
    pub fn cursor_node(&self) -> Option<String> {
        let lines = flatten_tree(self.explorer.tree(), &self.tree_state);
        lines
            .get(self.tree_state.selected)
            .map(|line| line.name.clone())
    }

    /// Toggle selection of the node under the cursor.
    pub fn select_under_cursor(&mut self) {
        if let Some(name) = self.cursor_node() {
            self.explorer.select(&name);
            self.drain_selection_events();
        }
    }

    /// Clear the active selection.
    pub fn unselect(&mut self) {
        self.explorer.unselect();
        self.drain_selection_events();
    }

    /// Apply queued selection notifications to the detail panel.
    pub fn drain_selection_events(&mut self) {
        while let Some(event) = self.explorer.poll_event() {
            match event {
                SelectionEvent::Selected(name) => self.detail = Some(name),
                SelectionEvent::Unselected => self.detail = None,
            }
        }
    }

    /// Start editing a filter field, pre-filling the current value.
    pub fn start_filter_input(&mut self, field: FilterField) {
        let criteria = self.explorer.criteria();
        self.input_buffer = match field {
            FilterField::Name => criteria.name.clone(),
            FilterField::Technos => criteria.technos.join(", "),
            FilterField::Hosts => criteria.hosts.join(", "),
        };
        self.filter_input = Some(field);
    }

    /// Commit the filter input buffer to the engine.
    pub fn commit_filter_input(&mut self) {
        let Some(field) = self.filter_input.take() else {
            return;
        };
        let value = std::mem::take(&mut self.input_buffer);
        match field {
            // Case folding of the criteria value happens here, at the
            // caller boundary.
            FilterField::Name => {
                self.explorer.set_name_filter(value.to_lowercase());
            }
            FilterField::Technos => {
                self.explorer.set_technos_filter(parse_labels(&value));
            }
            FilterField::Hosts => {
                self.explorer.set_hosts_filter(parse_labels(&value));
            }
        }
        self.refresh_filters();
    }

    /// Abandon the filter input overlay.
    pub fn cancel_filter_input(&mut self) {
        self.filter_input = None;
        self.input_buffer.clear();
    }

    /// Clear all filters.
    pub fn clear_filters(&mut self) {
        self.explorer.set_name_filter(String::new());
        self.explorer.set_technos_filter(Vec::new());
        self.explorer.set_hosts_filter(Vec::new());
        self.refresh_filters();
        self.set_status_message("Filters cleared");
    }

    /// Reload the payload from disk.
    pub fn reload(&mut self) {
        match parse_tree(&self.tree_path) {
            Ok(tree) => match self.explorer.reload(tree) {
                Ok(true) => {
                    self.drain_selection_events();
                    self.refresh_filters();
                    self.tree_state.expand_all(self.explorer.tree());
                    self.set_status_message("Reloaded");
                }
                Ok(false) => self.set_status_message("No changes"),
                Err(e) => self.set_status_message(format!("Reload failed: {e}")),
            },
            Err(e) => self.set_status_message(format!("Reload failed: {e}")),
        }
    }

    /// Set a transient status message.
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message.
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }
}

/// Split a comma-separated input into trimmed, non-empty labels.
fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArchTree, Node};

    fn app() -> ViewApp {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("Website"), None);
        let mut api = Node::new("Api");
        api.depends_on = vec!["Store".to_string()];
        api.technos = vec!["PHP".to_string()];
        tree.add_node(api, Some(root));
        tree.add_node(Node::new("Store"), Some(root));
        let explorer = Explorer::new(tree).unwrap();
        ViewApp::new(explorer, PathBuf::from("tree.json"), &TuiConfig::default())
    }

    #[test]
    fn test_start_expanded_shows_all_nodes() {
        let app = app();
        assert_eq!(app.visible_lines().len(), 3);
    }

    #[test]
    fn test_select_under_cursor_drives_detail() {
        let mut app = app();
        app.tree_state.selected = 1; // Api
        app.select_under_cursor();

        assert_eq!(app.detail.as_deref(), Some("Api"));
        let lines = app.visible_lines();
        let api = lines.iter().find(|l| l.name == "Api").unwrap();
        assert!(api.active);
        // Website is unrelated to Api, so it fades.
        let website = lines.iter().find(|l| l.name == "Website").unwrap();
        assert!(website.dimmed);
        // Store is related (declared dependency), stays visible.
        let store = lines.iter().find(|l| l.name == "Store").unwrap();
        assert!(!store.dimmed);
    }

    #[test]
    fn test_select_toggle_clears_detail() {
        let mut app = app();
        app.tree_state.selected = 1;
        app.select_under_cursor();
        app.select_under_cursor();

        assert!(app.detail.is_none());
        assert!(app.visible_lines().iter().all(|l| !l.dimmed && !l.active));
    }

    #[test]
    fn test_filter_input_commit() {
        let mut app = app();
        app.start_filter_input(FilterField::Name);
        app.input_buffer = "API".to_string();
        app.commit_filter_input();

        // Value folded at the boundary, so the mixed-case input matches.
        assert!(!app.not_found.contains("Api"));
        assert!(app.not_found.contains("Store"));
        assert!(app.filter_input.is_none());
    }

    #[test]
    fn test_technos_filter_input_parsing() {
        let mut app = app();
        app.start_filter_input(FilterField::Technos);
        app.input_buffer = " PHP , , ".to_string();
        app.commit_filter_input();

        assert_eq!(app.explorer.criteria().technos, vec!["PHP".to_string()]);
        // Website has no technos anywhere in its cascade: not found.
        assert!(app.not_found.contains("Website"));
        assert!(!app.not_found.contains("Api"));
    }

    #[test]
    fn test_clear_filters() {
        let mut app = app();
        app.start_filter_input(FilterField::Name);
        app.input_buffer = "api".to_string();
        app.commit_filter_input();
        assert!(!app.not_found.is_empty());

        app.clear_filters();
        assert!(app.not_found.is_empty());
    }

    #[test]
    fn test_cursor_node_tracks_flattened_order() {
        let app = app();
        assert_eq!(app.cursor_node().as_deref(), Some("Website"));
    }
}
