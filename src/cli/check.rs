//! Check command handler.
//!
//! Implements the `check` subcommand: surface the data-quality issues the
//! engine deliberately tolerates at runtime — duplicate node names and
//! dangling `dependsOn` references degrade to silent no-ops there, but a
//! catalog owner still wants to see them.

use crate::config::CheckConfig;
use crate::model::{build_index, ArchTree};
use crate::parsers::parse_tree;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Diagnostics for one payload.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub nodes: usize,
    pub max_depth: usize,
    pub declared_dependencies: usize,
    /// Names carried by more than one node.
    pub duplicate_names: Vec<String>,
    /// (declaring node, missing target) pairs.
    pub dangling_dependencies: Vec<(String, String)>,
}

impl CheckReport {
    /// Whether any issue was found.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.duplicate_names.is_empty() || !self.dangling_dependencies.is_empty()
    }
}

/// Run the check command
#[allow(clippy::needless_pass_by_value)]
pub fn run_check(config: CheckConfig) -> Result<i32> {
    let mut tree = parse_tree(&config.tree_path)
        .with_context(|| format!("loading {}", config.tree_path.display()))?;
    // An index build doubles as the cycle check; a corrupted payload is a
    // hard error here, not a finding.
    build_index(&mut tree).context("building node index")?;

    let report = analyze(&tree);
    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text_report(&config, &report);
    }

    if report.has_issues() {
        Ok(super::exit_codes::ISSUES_FOUND)
    } else {
        Ok(super::exit_codes::SUCCESS)
    }
}

/// Collect diagnostics from a built tree.
#[must_use]
pub fn analyze(tree: &ArchTree) -> CheckReport {
    let mut name_counts: HashMap<&str, usize> = HashMap::new();
    for node in tree.nodes() {
        *name_counts.entry(node.name.as_str()).or_default() += 1;
    }
    let mut duplicate_names: Vec<String> = name_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    duplicate_names.sort();

    CheckReport {
        nodes: tree.len(),
        max_depth: tree.max_depth(),
        declared_dependencies: tree.nodes().map(|n| n.depends_on.len()).sum(),
        duplicate_names,
        dangling_dependencies: tree.dangling_dependencies(),
    }
}

fn print_text_report(config: &CheckConfig, report: &CheckReport) {
    println!("{}", config.tree_path.display());
    println!(
        "  {} nodes, max depth {}, {} declared dependencies",
        report.nodes, report.max_depth, report.declared_dependencies
    );
    if report.duplicate_names.is_empty() && report.dangling_dependencies.is_empty() {
        println!("  no issues found");
        return;
    }
    for name in &report.duplicate_names {
        println!("  duplicate name: {name} (lookups for this name are unspecified)");
    }
    for (from, to) in &report.dangling_dependencies {
        println!("  dangling dependency: {from} -> {to} (no such node)");
    }
}
