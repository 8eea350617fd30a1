//! Hierarchical tree widget for catalog navigation.

use crate::model::ArchTree;
use crate::tui::theme::{colors, satisfaction_color};
use ratatui::{
    prelude::*,
    widgets::{Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};
use std::collections::HashSet;
use unicode_width::UnicodeWidthStr;

/// Navigation state for the tree widget.
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    /// Currently selected row in the flattened view
    pub selected: usize,
    /// Set of expanded node names
    pub expanded: HashSet<String>,
    /// Scroll offset
    pub offset: usize,
    /// Total visible rows after the last render
    pub visible_count: usize,
}

impl TreeState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_expand(&mut self, name: &str) {
        if self.expanded.contains(name) {
            self.expanded.remove(name);
        } else {
            self.expanded.insert(name.to_string());
        }
    }

    pub fn expand(&mut self, name: &str) {
        self.expanded.insert(name.to_string());
    }

    #[must_use]
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.contains(name)
    }

    /// Expand every node that has children.
    pub fn expand_all(&mut self, tree: &ArchTree) {
        for node in tree.nodes() {
            if !node.children.is_empty() {
                self.expanded.insert(node.name.clone());
            }
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.selected = 0;
        self.offset = 0;
    }

    pub const fn select_next(&mut self) {
        if self.visible_count > 0 && self.selected < self.visible_count - 1 {
            self.selected += 1;
        }
    }

    pub const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub const fn select_first(&mut self) {
        self.selected = 0;
    }

    pub const fn select_last(&mut self) {
        if self.visible_count > 0 {
            self.selected = self.visible_count - 1;
        }
    }
}

/// One row of the flattened tree, decorated with its visual state.
#[derive(Debug, Clone)]
pub struct NodeLine {
    /// Node name (identity and label).
    pub name: String,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_last_sibling: bool,
    /// For each ancestor level, whether that ancestor was a last sibling
    /// (controls the │ rails of the prefix).
    pub ancestors_last: Vec<bool>,
    /// Technology labels declared directly on the node.
    pub technos: Vec<String>,
    pub satisfaction: Option<f64>,
    /// Faded because a selection is active and this node is unrelated.
    pub dimmed: bool,
    /// Missed by the current filters.
    pub not_found: bool,
    /// This node is the active selection.
    pub active: bool,
}

/// Flatten the tree into visible rows, respecting the expansion state.
#[must_use]
pub fn flatten_tree(tree: &ArchTree, state: &TreeState) -> Vec<NodeLine> {
    let mut lines = Vec::new();
    if let Some(root) = tree.root() {
        flatten_node(tree, state, root, true, &[], &mut lines);
    }
    lines
}

fn flatten_node(
    tree: &ArchTree,
    state: &TreeState,
    id: crate::model::NodeId,
    is_last: bool,
    ancestors_last: &[bool],
    lines: &mut Vec<NodeLine>,
) {
    let node = tree.node(id);
    let is_expanded = state.is_expanded(&node.name);

    let mut current_ancestors = ancestors_last.to_vec();
    current_ancestors.push(is_last);

    lines.push(NodeLine {
        name: node.name.clone(),
        depth: node.depth,
        has_children: !node.children.is_empty(),
        is_expanded,
        is_last_sibling: is_last,
        ancestors_last: current_ancestors.clone(),
        technos: node.technos.clone(),
        satisfaction: node.satisfaction,
        dimmed: false,
        not_found: false,
        active: false,
    });

    if is_expanded {
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            flatten_node(tree, state, *child, i == count - 1, &current_ancestors, lines);
        }
    }
}

/// The tree widget.
pub struct Tree<'a> {
    lines: &'a [NodeLine],
    block: Option<Block<'a>>,
    highlight_symbol: &'a str,
}

impl<'a> Tree<'a> {
    #[must_use]
    pub fn new(lines: &'a [NodeLine]) -> Self {
        Self {
            lines,
            block: None,
            highlight_symbol: "▶ ",
        }
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl StatefulWidget for Tree<'_> {
    type State = TreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = self.block.as_ref().map_or(area, |b| {
            let inner = b.inner(area);
            b.clone().render(area, buf);
            inner
        });

        if inner_area.width < 4 || inner_area.height < 1 {
            return;
        }

        let area = inner_area;
        state.visible_count = self.lines.len();

        // Keep the selected row visible.
        let visible_height = area.height as usize;
        if state.selected >= state.offset + visible_height {
            state.offset = state.selected - visible_height + 1;
        } else if state.selected < state.offset {
            state.offset = state.selected;
        }

        let scheme = colors();
        for (i, line) in self
            .lines
            .iter()
            .skip(state.offset)
            .take(visible_height)
            .enumerate()
        {
            let y = area.y + i as u16;
            let is_cursor = state.offset + i == state.selected;

            // Box-drawing prefix from ancestor rails.
            let mut prefix = String::new();
            for is_last in line.ancestors_last.iter().take(line.depth) {
                if *is_last {
                    prefix.push_str("   ");
                } else {
                    prefix.push_str("│  ");
                }
            }
            if line.depth > 0 {
                if line.is_last_sibling {
                    prefix.push_str("└─ ");
                } else {
                    prefix.push_str("├─ ");
                }
            }

            let expand_indicator = if line.has_children {
                if line.is_expanded { "▼ " } else { "▶ " }
            } else {
                "  "
            };

            let mut x = area.x;

            // Cursor marker.
            if is_cursor {
                for ch in self.highlight_symbol.chars() {
                    if x < area.x + area.width {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_char(ch)
                                .set_style(Style::default().fg(scheme.accent));
                        }
                        x += 1;
                    }
                }
            } else {
                x += self.highlight_symbol.chars().count() as u16;
            }

            for ch in prefix.chars() {
                if x < area.x + area.width {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(ch)
                            .set_style(Style::default().fg(scheme.muted));
                    }
                    x += 1;
                }
            }

            for ch in expand_indicator.chars() {
                if x < area.x + area.width {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(ch)
                            .set_style(Style::default().fg(scheme.accent));
                    }
                    x += 1;
                }
            }

            // Label style: active marker wins, then dimming, then filter
            // misses, then the cursor highlight.
            let mut label_style = if line.active {
                Style::default().fg(scheme.active).add_modifier(Modifier::BOLD)
            } else if line.dimmed {
                Style::default().fg(scheme.dimmed).add_modifier(Modifier::DIM)
            } else if line.not_found {
                Style::default()
                    .fg(scheme.not_found)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(scheme.text)
            };
            if is_cursor {
                label_style = label_style.bg(scheme.selection);
            }

            let remaining = (area.x + area.width).saturating_sub(x) as usize;
            let label = truncate_label(&line.name, remaining);
            for ch in label.chars() {
                if x < area.x + area.width {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_char(ch).set_style(label_style);
                    }
                    x += 1;
                }
            }

            // Satisfaction dot on the red-to-blue scale.
            if let Some(s) = line.satisfaction {
                let dot_style = Style::default().fg(satisfaction_color(s));
                for ch in [' ', '●'] {
                    if x < area.x + area.width {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_char(ch);
                            if ch == '●' {
                                cell.set_style(dot_style);
                            }
                        }
                        x += 1;
                    }
                }
            }

            // Techno tags, muted.
            if !line.technos.is_empty() {
                let tags = format!(" [{}]", line.technos.join(", "));
                let tag_style = if line.dimmed {
                    Style::default().fg(scheme.dimmed).add_modifier(Modifier::DIM)
                } else {
                    Style::default().fg(scheme.text_muted)
                };
                for ch in tags.chars() {
                    if x < area.x + area.width {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_char(ch).set_style(tag_style);
                        }
                        x += 1;
                    }
                }
            }

            // Fill the rest of a cursor row.
            if is_cursor {
                while x < area.x + area.width {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_style(Style::default().bg(scheme.selection));
                    }
                    x += 1;
                }
            }
        }

        if self.lines.len() > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Style::default().fg(scheme.accent))
                .track_style(Style::default().fg(scheme.muted));
            let mut scrollbar_state =
                ScrollbarState::new(self.lines.len()).position(state.selected);
            scrollbar.render(area, buf, &mut scrollbar_state);
        }
    }
}

/// Truncate a label to a display width, with ellipsis.
fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    let mut out = String::new();
    for ch in label.chars() {
        if out.width() + 4 > max_width {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArchTree, Node};

    fn sample_tree() -> ArchTree {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("Website"), None);
        let api = tree.add_node(Node::new("Api"), Some(root));
        tree.add_node(Node::new("Store"), Some(api));
        tree.add_node(Node::new("Cdn"), Some(root));
        tree
    }

    #[test]
    fn test_tree_state_expand_toggle() {
        let mut state = TreeState::new();
        assert!(!state.is_expanded("Website"));
        state.toggle_expand("Website");
        assert!(state.is_expanded("Website"));
        state.toggle_expand("Website");
        assert!(!state.is_expanded("Website"));
    }

    #[test]
    fn test_flatten_collapsed_root_only() {
        let tree = sample_tree();
        let state = TreeState::new();
        let lines = flatten_tree(&tree, &state);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Website");
        assert!(lines[0].has_children);
        assert!(!lines[0].is_expanded);
    }

    #[test]
    fn test_flatten_expand_all() {
        let tree = sample_tree();
        let mut state = TreeState::new();
        state.expand_all(&tree);

        let lines = flatten_tree(&tree, &state);
        let names: Vec<_> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Website", "Api", "Store", "Cdn"]);

        // Cdn is the last sibling under the root; Api is not.
        assert!(lines[3].is_last_sibling);
        assert!(!lines[1].is_last_sibling);
        assert_eq!(lines[2].depth, 2);
    }

    #[test]
    fn test_flatten_partial_expansion() {
        let tree = sample_tree();
        let mut state = TreeState::new();
        state.expand("Website");

        let lines = flatten_tree(&tree, &state);
        let names: Vec<_> = lines.iter().map(|l| l.name.as_str()).collect();
        // Api is visible but collapsed, so Store stays hidden.
        assert_eq!(names, vec!["Website", "Api", "Cdn"]);
    }

    #[test]
    fn test_select_navigation_bounds() {
        let mut state = TreeState::new();
        state.visible_count = 3;

        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);

        state.select_prev();
        assert_eq!(state.selected, 1);
        state.select_first();
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_last();
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 20), "short");
        let long = truncate_label("a-very-long-component-name", 10);
        assert!(long.ends_with("..."));
        assert!(long.width() <= 10);
    }
}
