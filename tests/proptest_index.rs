//! Property tests for the index build over randomly generated trees.

use archtree::{build_index, ArchTree, Node};
use proptest::prelude::*;

/// Blueprint for one generated node: parent slot and declared edges.
#[derive(Debug, Clone)]
struct NodeSpec {
    /// Index of the parent among already-placed nodes; the root ignores it.
    parent: usize,
    /// Indices of dependency targets; values past the node count become
    /// dangling references.
    depends_on: Vec<usize>,
    technos: Vec<String>,
}

fn node_spec() -> impl Strategy<Value = NodeSpec> {
    (
        any::<usize>(),
        prop::collection::vec(0usize..24, 0..4),
        prop::collection::vec("[a-z]{2,6}", 0..3),
    )
        .prop_map(|(parent, depends_on, technos)| NodeSpec {
            parent,
            depends_on,
            technos,
        })
}

/// Build an arena tree from specs. Node `i` is named `n{i}`, and its parent
/// is chosen among nodes 0..i, so the result is always a well-formed tree.
fn build_tree(specs: &[NodeSpec]) -> ArchTree {
    let mut tree = ArchTree::new();
    let mut ids = Vec::new();
    for (i, spec) in specs.iter().enumerate() {
        let mut node = Node::new(format!("n{i}"));
        node.depends_on = spec
            .depends_on
            .iter()
            .map(|target| format!("n{target}"))
            .collect();
        node.technos = spec.technos.clone();
        let parent = if i == 0 {
            None
        } else {
            Some(ids[spec.parent % i])
        };
        ids.push(tree.add_node(node, parent));
    }
    tree
}

/// Reference cascade: walk the parent chain by hand.
fn reference_cascade<F>(tree: &ArchTree, name: &str, field: F) -> Vec<String>
where
    F: Fn(&Node) -> Vec<String>,
{
    let mut values = Vec::new();
    let mut current = tree.find_by_name(name);
    while let Some(id) = current {
        let node = tree.node(id);
        values.extend(field(node));
        current = node.parent;
    }
    values
}

proptest! {
    #[test]
    fn inversion_matches_declarations(specs in prop::collection::vec(node_spec(), 1..24)) {
        let mut tree = build_tree(&specs);
        build_index(&mut tree).unwrap();

        // Every declared, resolvable edge appears exactly as often in the
        // target's dependents as it was declared; nothing else does.
        for declarer in tree.nodes() {
            for target in tree.nodes() {
                let declared = declarer
                    .depends_on
                    .iter()
                    .filter(|t| *t == &target.name)
                    .count();
                let inverted = target
                    .dependents
                    .iter()
                    .filter(|d| *d == &declarer.name)
                    .count();
                prop_assert_eq!(declared, inverted);
            }
        }

        // Dangling targets invert to nothing anywhere.
        for node in tree.nodes() {
            for dependent in &node.dependents {
                prop_assert!(tree.find_by_name(dependent).is_some());
            }
        }
    }

    #[test]
    fn rebuild_is_idempotent(specs in prop::collection::vec(node_spec(), 1..24)) {
        let mut tree = build_tree(&specs);
        build_index(&mut tree).unwrap();
        let first: Vec<_> = tree
            .nodes()
            .map(|n| (n.dependents.clone(), n.index.clone()))
            .collect();

        build_index(&mut tree).unwrap();
        let second: Vec<_> = tree
            .nodes()
            .map(|n| (n.dependents.clone(), n.index.clone()))
            .collect();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn related_nodes_compose_cascade_and_dependents(
        specs in prop::collection::vec(node_spec(), 1..24)
    ) {
        let mut tree = build_tree(&specs);
        build_index(&mut tree).unwrap();

        for node in tree.nodes() {
            let mut expected =
                reference_cascade(&tree, &node.name, |n| n.depends_on.clone());
            expected.extend(node.dependents.clone());
            prop_assert_eq!(&node.index.related_nodes, &expected);
        }
    }

    #[test]
    fn technos_cascade_replaces_only_when_nonempty(
        specs in prop::collection::vec(node_spec(), 1..24)
    ) {
        let mut tree = build_tree(&specs);
        build_index(&mut tree).unwrap();

        for node in tree.nodes() {
            let cascade = reference_cascade(&tree, &node.name, |n| n.technos.clone());
            if cascade.is_empty() {
                prop_assert!(node.index.technos.is_empty());
            } else {
                prop_assert_eq!(&node.index.technos, &cascade);
            }
        }
    }
}
