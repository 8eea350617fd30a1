//! Arena-backed architecture tree.

use super::NodeIndex;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Identifier of a node inside one [`ArchTree`] arena.
///
/// Ids are plain indices and are only meaningful for the tree that issued
/// them; two trees never share node objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One entry in the architecture catalog (a component or service).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identity across the whole tree; the join key for edges,
    /// selection, filtering and presentation binding. Uniqueness is a
    /// data-quality precondition: behavior is unspecified when two nodes
    /// share a name.
    pub name: String,
    /// Back-reference to the container node; `None` for the root.
    pub parent: Option<NodeId>,
    /// Ordered owned children.
    pub children: Vec<NodeId>,
    /// Declared dependency edges, by name. Cross-cutting over the tree:
    /// a target may be any node, or nothing at all (dangling edges are
    /// silently dropped by the inverter).
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Technology labels declared directly on this node.
    #[serde(default)]
    pub technos: Vec<String>,
    /// Host labels declared directly on this node (payload map keys, in
    /// payload order; the map values are ignored).
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Presentation passthrough in [0,1]; not read by the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<f64>,
    /// Distance from the root; used for layout only.
    pub depth: usize,

    /// Derived: names directly declaring a dependency on this node.
    /// Recomputed by every index build; direct inversion only, no cascade.
    #[serde(default)]
    pub dependents: Vec<String>,
    /// Derived: the per-node index record used for highlighting/filtering.
    #[serde(default)]
    pub index: NodeIndex,
}

impl Node {
    /// Create a bare node; the arena fills in links and derived state.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            depends_on: Vec::new(),
            technos: Vec::new(),
            hosts: Vec::new(),
            satisfaction: None,
            depth: 0,
            dependents: Vec::new(),
            index: NodeIndex::default(),
        }
    }
}

/// The architecture tree: node arena plus name lookup.
///
/// Node order in the arena is the payload's depth-first preorder, which is
/// also the traversal order the index build uses as its tie-break for
/// `dependents` ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchTree {
    nodes: Vec<Node>,
    /// Node ids by name. Insertion keeps the first position; a duplicate
    /// name overwrites the id, so which node "wins" lookups is unspecified
    /// (documented data-quality precondition, not validated here).
    by_name: IndexMap<String, NodeId>,
    /// Content hash of the declared fields, for cheap "did the payload
    /// change" checks between rebuilds.
    pub content_hash: u64,
    /// Number of duplicate-name collisions seen while the tree was built.
    #[serde(skip)]
    pub duplicate_name_count: usize,
}

impl ArchTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the arena, wiring the parent/child links and the name
    /// lookup. Returns the new node's id.
    pub fn add_node(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.depth = parent.map_or(0, |p| self.nodes[p.0].depth + 1);
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        if self.by_name.insert(node.name.clone(), id).is_some() {
            self.duplicate_name_count += 1;
        }
        self.nodes.push(node);
        id
    }

    /// Log a single summary line if duplicate names were seen.
    pub fn log_duplicate_summary(&self) {
        if self.duplicate_name_count > 0 {
            tracing::warn!(
                duplicate_name_count = self.duplicate_name_count,
                "Duplicate node names: name lookups for these nodes are unspecified. \
                 Run `archtree check` to list them."
            );
        }
    }

    /// The root node id, if the tree is non-empty.
    ///
    /// The arena is built root-first, so the root is always slot 0.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a node mutably by id.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Look up a node id by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Look up a node by name.
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.find_by_name(name).map(|id| self.node(id))
    }

    /// All node ids in traversal order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// All nodes in traversal order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Total node count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maximum node depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Names declared in `depends_on` lists that resolve to no node.
    #[must_use]
    pub fn dangling_dependencies(&self) -> Vec<(String, String)> {
        let mut dangling = Vec::new();
        for node in &self.nodes {
            for target in &node.depends_on {
                if !self.by_name.contains_key(target) {
                    dangling.push((node.name.clone(), target.clone()));
                }
            }
        }
        dangling
    }

    /// Calculate and update the content hash over declared fields.
    ///
    /// Derived fields (`dependents`, `index`) are excluded so a rebuild
    /// never changes the hash of an unchanged payload.
    pub fn calculate_content_hash(&mut self) {
        let mut hasher_input = Vec::new();
        for node in &self.nodes {
            hasher_input.extend(node.name.as_bytes());
            hasher_input.push(0);
            for value in node
                .depends_on
                .iter()
                .chain(&node.technos)
                .chain(&node.hosts)
            {
                hasher_input.extend(value.as_bytes());
                hasher_input.push(0);
            }
            if let Some(s) = node.satisfaction {
                hasher_input.extend(s.to_le_bytes());
            }
            hasher_input.extend(node.depth.to_le_bytes());
        }
        self.content_hash = xxh3_64(&hasher_input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ArchTree {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("Website"), None);
        let api = tree.add_node(Node::new("Api"), Some(root));
        tree.add_node(Node::new("Store"), Some(api));
        tree
    }

    #[test]
    fn test_add_node_links() {
        let tree = sample_tree();
        let root = tree.root().unwrap();

        assert_eq!(tree.node(root).name, "Website");
        assert_eq!(tree.node(root).depth, 0);
        assert!(tree.node(root).parent.is_none());

        let api = tree.find_by_name("Api").unwrap();
        assert_eq!(tree.node(api).parent, Some(root));
        assert_eq!(tree.node(api).depth, 1);
        assert_eq!(tree.node(root).children, vec![api]);

        let store = tree.find_by_name("Store").unwrap();
        assert_eq!(tree.node(store).depth, 2);
    }

    #[test]
    fn test_duplicate_names_counted() {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("Website"), None);
        tree.add_node(Node::new("Api"), Some(root));
        tree.add_node(Node::new("Api"), Some(root));

        assert_eq!(tree.duplicate_name_count, 1);
        // Lookup resolves to one of the two; exactly which is unspecified.
        assert!(tree.find_by_name("Api").is_some());
    }

    #[test]
    fn test_dangling_dependencies() {
        let mut tree = ArchTree::new();
        let root = tree.add_node(Node::new("Website"), None);
        let mut api = Node::new("Api");
        api.depends_on = vec!["Store".to_string(), "Ghost".to_string()];
        tree.add_node(api, Some(root));
        tree.add_node(Node::new("Store"), Some(root));

        let dangling = tree.dangling_dependencies();
        assert_eq!(dangling, vec![("Api".to_string(), "Ghost".to_string())]);
    }

    #[test]
    fn test_content_hash_ignores_derived_fields() {
        let mut tree = sample_tree();
        tree.calculate_content_hash();
        let before = tree.content_hash;

        let api = tree.find_by_name("Api").unwrap();
        tree.node_mut(api).dependents.push("Website".to_string());
        tree.calculate_content_hash();

        assert_eq!(before, tree.content_hash);
    }

    #[test]
    fn test_content_hash_tracks_declared_fields() {
        let mut tree = sample_tree();
        tree.calculate_content_hash();
        let before = tree.content_hash;

        let api = tree.find_by_name("Api").unwrap();
        tree.node_mut(api).technos.push("PHP".to_string());
        tree.calculate_content_hash();

        assert_ne!(before, tree.content_hash);
    }

    #[test]
    fn test_empty_tree() {
        let tree = ArchTree::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.max_depth(), 0);
    }
}
