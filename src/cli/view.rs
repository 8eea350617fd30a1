//! View command handler.
//!
//! Implements the `view` subcommand: load a tree payload, build the index,
//! and either run the interactive TUI or print a non-interactive dump.

use crate::config::{OutputFormat, ViewConfig};
use crate::engine::Explorer;
use crate::parsers::parse_tree;
use crate::tui::{run_view_tui, ViewApp};
use anyhow::{Context, Result};
use std::io::IsTerminal;

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(config: ViewConfig) -> Result<i32> {
    let tree = parse_tree(&config.tree_path)
        .with_context(|| format!("loading {}", config.tree_path.display()))?;
    let mut explorer = Explorer::new(tree).context("building node index")?;

    // Seed filters before anything renders; same calls the interactive
    // inputs make.
    if !config.filters.name.is_empty() {
        explorer.set_name_filter(config.filters.name.to_lowercase());
    }
    if !config.filters.technos.is_empty() {
        explorer.set_technos_filter(config.filters.technos.clone());
    }
    if !config.filters.hosts.is_empty() {
        explorer.set_hosts_filter(config.filters.hosts.clone());
    }

    let effective = effective_format(config.output.format);
    if effective == OutputFormat::Tui {
        let mut app = ViewApp::new(explorer, config.tree_path.clone(), &config.tui);
        run_view_tui(&mut app)?;
        return Ok(super::exit_codes::SUCCESS);
    }

    let report = match effective {
        OutputFormat::Json => serde_json::to_string_pretty(explorer.tree())?,
        _ => summary_report(&explorer),
    };
    match &config.output.file {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{report}"),
    }
    Ok(super::exit_codes::SUCCESS)
}

/// Resolve `Auto` against the terminal.
fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if std::io::stdout().is_terminal() {
                OutputFormat::Tui
            } else {
                OutputFormat::Summary
            }
        }
        other => other,
    }
}

/// Plain-text summary of the indexed tree, filter state applied.
fn summary_report(explorer: &Explorer) -> String {
    use std::fmt::Write as _;

    let tree = explorer.tree();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} nodes, max depth {}",
        tree.len(),
        tree.max_depth()
    );
    for node in tree.nodes() {
        let indent = "  ".repeat(node.depth);
        let marker = if explorer.matches(&node.name) { "" } else { " (filtered out)" };
        let _ = write!(out, "{indent}{}{marker}", node.name);
        if !node.index.related_nodes.is_empty() {
            let _ = write!(out, "  -> {}", node.index.related_nodes.join(", "));
        }
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArchTree, Node};

    fn explorer() -> Explorer {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("Website"), None);
        let mut api = Node::new("Api");
        api.depends_on = vec!["Store".to_string()];
        tree.add_node(api, Some(root));
        tree.add_node(Node::new("Store"), Some(root));
        Explorer::new(tree).unwrap()
    }

    #[test]
    fn test_summary_report_shape() {
        let report = summary_report(&explorer());
        assert!(report.starts_with("3 nodes, max depth 1"));
        assert!(report.contains("  Api  -> Store"));
        assert!(report.contains("  Store"));
    }

    #[test]
    fn test_summary_marks_filtered_nodes() {
        let mut explorer = explorer();
        explorer.set_name_filter("api");
        let report = summary_report(&explorer);
        assert!(report.contains("Store (filtered out)"));
        assert!(!report.contains("Api (filtered out)"));
    }

    #[test]
    fn test_effective_format_passthrough() {
        assert_eq!(effective_format(OutputFormat::Json), OutputFormat::Json);
        assert_eq!(effective_format(OutputFormat::Tui), OutputFormat::Tui);
    }
}
