//! JSON payload structures and conversion into the arena.

use crate::error::{ArchTreeError, ParseErrorKind, Result};
use crate::model::{ArchTree, Node, NodeId};
use indexmap::IndexMap;
use serde::Deserialize;

/// One node of the raw payload, before arena conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    /// Node name; the only required field.
    pub name: String,
    /// Declared dependency edges, by name.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Technology labels.
    #[serde(default)]
    pub technos: Vec<String>,
    /// Host map; only the keys matter to the engine, in payload order.
    /// Values are free-form annotations for other consumers.
    #[serde(default)]
    pub host: IndexMap<String, serde_json::Value>,
    /// Presentation passthrough in [0,1].
    #[serde(default)]
    pub satisfaction: Option<f64>,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<RawNode>,
}

/// Parse a tree payload from string content.
pub fn parse_tree_str(content: &str) -> Result<ArchTree> {
    let raw: RawNode = serde_json::from_str(content)?;
    if raw.name.is_empty() {
        return Err(ArchTreeError::missing_field("name", "root node"));
    }
    if let Some(s) = raw.satisfaction {
        validate_satisfaction(&raw.name, s)?;
    }

    let mut tree = ArchTree::new();
    add_subtree(&mut tree, raw, None)?;
    tree.calculate_content_hash();
    Ok(tree)
}

/// Recursively add a raw subtree to the arena.
fn add_subtree(tree: &mut ArchTree, raw: RawNode, parent: Option<NodeId>) -> Result<()> {
    if raw.name.is_empty() {
        return Err(ArchTreeError::missing_field("name", "child node"));
    }
    if let Some(s) = raw.satisfaction {
        validate_satisfaction(&raw.name, s)?;
    }

    let mut node = Node::new(raw.name);
    node.depends_on = raw.depends_on;
    node.technos = raw.technos;
    node.hosts = raw.host.keys().cloned().collect();
    node.satisfaction = raw.satisfaction;

    let id = tree.add_node(node, parent);
    for child in raw.children {
        add_subtree(tree, child, Some(id))?;
    }
    Ok(())
}

fn validate_satisfaction(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ArchTreeError::parse(
            format!("node '{name}'"),
            ParseErrorKind::InvalidValue {
                field: "satisfaction".to_string(),
                message: format!("{value} is outside [0, 1]"),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "name": "Website",
        "children": [
            {
                "name": "Api",
                "dependsOn": ["Store"],
                "technos": ["PHP", "Silex"],
                "satisfaction": 0.7,
                "children": []
            },
            {
                "name": "Store",
                "host": {"OVH": "vps1234", "AWS": "eu-west-1"},
                "children": [
                    {"name": "Sessions"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_payload() {
        let tree = parse_tree_str(PAYLOAD).unwrap();
        assert_eq!(tree.len(), 4);

        let api = tree.node_by_name("Api").unwrap();
        assert_eq!(api.depends_on, vec!["Store".to_string()]);
        assert_eq!(api.technos, vec!["PHP".to_string(), "Silex".to_string()]);
        assert_eq!(api.satisfaction, Some(0.7));
        assert_eq!(api.depth, 1);

        // Host map keys survive in payload order; values are dropped.
        let store = tree.node_by_name("Store").unwrap();
        assert_eq!(store.hosts, vec!["OVH".to_string(), "AWS".to_string()]);

        let sessions = tree.node_by_name("Sessions").unwrap();
        assert_eq!(sessions.depth, 2);
        assert_eq!(sessions.parent, tree.find_by_name("Store"));
    }

    #[test]
    fn test_missing_optional_fields_default_empty() {
        let tree = parse_tree_str(r#"{"name": "solo"}"#).unwrap();
        let node = tree.node_by_name("solo").unwrap();
        assert!(node.depends_on.is_empty());
        assert!(node.technos.is_empty());
        assert!(node.hosts.is_empty());
        assert!(node.satisfaction.is_none());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_tree_str("{not json").unwrap_err();
        assert!(matches!(err, ArchTreeError::Parse { .. }));
    }

    #[test]
    fn test_empty_root_name_rejected() {
        let err = parse_tree_str(r#"{"name": ""}"#).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_satisfaction_out_of_range() {
        let err = parse_tree_str(r#"{"name": "a", "satisfaction": 1.5}"#).unwrap_err();
        assert!(matches!(err, ArchTreeError::Parse { .. }));
    }

    #[test]
    fn test_content_hash_set() {
        let tree = parse_tree_str(PAYLOAD).unwrap();
        assert_ne!(tree.content_hash, 0);
    }
}
