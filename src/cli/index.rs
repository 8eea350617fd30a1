//! Index command handler.
//!
//! Implements the `index` subcommand: compute the derived per-node index
//! and dump it as JSON for downstream tooling.

use crate::config::IndexConfig;
use crate::model::{build_index, ArchTree};
use crate::parsers::parse_tree;
use anyhow::{Context, Result};
use serde::Serialize;

/// Machine-readable index dump.
#[derive(Debug, Serialize)]
pub struct IndexReport {
    /// When the dump was generated.
    pub generated: chrono::DateTime<chrono::Utc>,
    /// Source payload path.
    pub source: String,
    /// Node count.
    pub nodes: usize,
    /// Per-node derived records, in traversal order.
    pub entries: Vec<IndexEntry>,
}

/// Derived state for one node.
#[derive(Debug, Serialize)]
pub struct IndexEntry {
    pub name: String,
    pub depth: usize,
    pub dependents: Vec<String>,
    pub related_nodes: Vec<String>,
    pub technos: Vec<String>,
    pub hosts: Vec<String>,
}

/// Run the index command
#[allow(clippy::needless_pass_by_value)]
pub fn run_index(config: IndexConfig) -> Result<i32> {
    let mut tree = parse_tree(&config.tree_path)
        .with_context(|| format!("loading {}", config.tree_path.display()))?;
    build_index(&mut tree).context("building node index")?;

    let report = build_report(&tree, &config.tree_path.display().to_string());
    let json = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &config.file {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(super::exit_codes::SUCCESS)
}

fn build_report(tree: &ArchTree, source: &str) -> IndexReport {
    IndexReport {
        generated: chrono::Utc::now(),
        source: source.to_string(),
        nodes: tree.len(),
        entries: tree
            .nodes()
            .map(|node| IndexEntry {
                name: node.name.clone(),
                depth: node.depth,
                dependents: node.dependents.clone(),
                related_nodes: node.index.related_nodes.clone(),
                technos: node.index.technos.clone(),
                hosts: node.index.hosts.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    #[test]
    fn test_report_carries_derived_state() {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("Website"), None);
        let mut api = Node::new("Api");
        api.depends_on = vec!["Store".to_string()];
        tree.add_node(api, Some(root));
        tree.add_node(Node::new("Store"), Some(root));
        build_index(&mut tree).unwrap();

        let report = build_report(&tree, "tree.json");
        assert_eq!(report.nodes, 3);
        let store = report.entries.iter().find(|e| e.name == "Store").unwrap();
        assert_eq!(store.dependents, vec!["Api".to_string()]);
        assert_eq!(store.related_nodes, vec!["Api".to_string()]);
    }
}
