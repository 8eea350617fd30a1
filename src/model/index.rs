//! Derived per-node index: relation inversion and attribute cascade.
//!
//! [`build_index`] is the single entry point. It runs two passes over the
//! arena:
//!
//! 1. invert the declared `depends_on` relation into per-node `dependents`
//!    (direct inversion only, no cascade);
//! 2. resolve each node's [`NodeIndex`] record from the ancestor cascade
//!    plus the freshly inverted `dependents`.
//!
//! Pass 2 reads `dependents` of arbitrary nodes, so pass 1 must complete
//! for the full node set first — interleaving the passes would corrupt
//! lookups for nodes not yet processed. Callers get atomicity for free:
//! `build_index` takes `&mut ArchTree` and runs to completion.
//!
//! Rebuilding is idempotent: derived state is reset before recomputation,
//! so an unchanged tree yields byte-identical `dependents` and `index`.

use super::{ArchTree, Node, NodeId};
use crate::error::{ArchTreeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived index record for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIndex {
    /// Union of the ancestor-cascaded `depends_on` closure and this node's
    /// direct `dependents`, in that order. Deliberately asymmetric: the
    /// dependency side cascades through ancestors, the dependent side does
    /// not. Duplicates are preserved.
    pub related_nodes: Vec<String>,
    /// Own-first ancestor concatenation of technology labels, assigned
    /// wholesale only when non-empty (replace, not merge).
    pub technos: Vec<String>,
    /// Same rule applied to host labels.
    pub hosts: Vec<String>,
}

/// Build the derived index for every node in the tree.
///
/// Runs the relation inverter, then the per-node index resolution. The only
/// error is a corrupted parent chain ([`ArchTreeError::Index`] with
/// `ParentCycle`); well-formed trees cannot produce it.
pub fn build_index(tree: &mut ArchTree) -> Result<()> {
    invert_dependencies(tree);

    // Resolve every index before assigning any, so the resolver only ever
    // observes declared fields plus the completed pass-1 output.
    let mut resolved = Vec::with_capacity(tree.len());
    for id in tree.node_ids() {
        resolved.push(resolve_index(tree, id)?);
    }
    for (i, index) in resolved.into_iter().enumerate() {
        tree.node_mut(NodeId(i)).index = index;
    }
    Ok(())
}

/// Invert the declared `depends_on` relation into per-node `dependents`.
///
/// For every node `n` declaring `target`, `n.name` is appended to
/// `target`'s dependents. Targets that resolve to no node contribute
/// nothing (dangling edges are data, not errors). Ordering of a node's
/// dependents follows arena traversal order of the declaring nodes.
fn invert_dependencies(tree: &mut ArchTree) {
    let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
    for node in tree.nodes() {
        for target in &node.depends_on {
            dependents
                .entry(target.clone())
                .or_default()
                .push(node.name.clone());
        }
    }

    // Reset before assigning: no accumulation across rebuilds.
    for i in 0..tree.len() {
        let id = NodeId(i);
        let name = tree.node(id).name.clone();
        tree.node_mut(id).dependents = dependents.remove(&name).unwrap_or_default();
    }
}

/// Resolve one node's index record from the cascade and its dependents.
fn resolve_index(tree: &ArchTree, id: NodeId) -> Result<NodeIndex> {
    let mut index = NodeIndex::default();

    let depends_on = cascade(tree, id, |n| n.depends_on.as_slice())?;
    if !depends_on.is_empty() {
        index.related_nodes.extend(depends_on);
    }
    index
        .related_nodes
        .extend_from_slice(&tree.node(id).dependents);

    let technos = cascade(tree, id, |n| n.technos.as_slice())?;
    if !technos.is_empty() {
        index.technos = technos;
    }
    let hosts = cascade(tree, id, |n| n.hosts.as_slice())?;
    if !hosts.is_empty() {
        index.hosts = hosts;
    }

    Ok(index)
}

/// Ordered concatenation of a declared attribute up the ancestor chain:
/// own values first, then each ancestor's, terminating at the root.
///
/// Pure over the ancestor chain — never reads `dependents`, `index`, or
/// sibling/descendant data. The walk is bounded by the arena size; a
/// parent chain longer than that can only mean a corrupted link cycle,
/// which is reported instead of looping.
fn cascade<'a, F>(tree: &'a ArchTree, id: NodeId, field: F) -> Result<Vec<String>>
where
    F: Fn(&'a Node) -> &'a [String],
{
    let mut values = Vec::new();
    let mut current = Some(id);
    let mut hops = 0usize;
    while let Some(node_id) = current {
        if hops >= tree.len() {
            return Err(ArchTreeError::parent_cycle(tree.node(id).name.clone()));
        }
        let node = tree.node(node_id);
        values.extend_from_slice(field(node));
        current = node.parent;
        hops += 1;
    }
    Ok(values)
}
