//! Graph data structures shared by the state manager and the renderer.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{EdgeType, NodeSubtype, NodeType};
use super::error::GraphError;

/// Identity key of a node. Either free text (`"a1"`) or a number, as produced
/// by the key generator for freshly created nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
	/// Numeric key, e.g. a creation timestamp.
	Number(u64),
	/// Textual key.
	Text(String),
}

impl fmt::Display for NodeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeKey::Number(n) => write!(f, "{n}"),
			NodeKey::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for NodeKey {
	fn from(value: &str) -> Self {
		NodeKey::Text(value.to_string())
	}
}

impl From<String> for NodeKey {
	fn from(value: String) -> Self {
		NodeKey::Text(value)
	}
}

impl From<u64> for NodeKey {
	fn from(value: u64) -> Self {
		NodeKey::Number(value)
	}
}

/// A node in the editable graph.
///
/// The identity key is fixed at construction; everything else may be
/// rewritten by the renderer (dragging moves `x`/`y`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	id: NodeKey,
	/// Display title. Empty for nodes created on the canvas.
	#[serde(default)]
	pub title: String,
	/// Primary category, selects the shape drawn for the node.
	#[serde(rename = "type")]
	pub node_type: NodeType,
	/// Secondary category drawn underneath the primary shape.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subtype: Option<NodeSubtype>,
	/// Canvas x coordinate.
	#[serde(default)]
	pub x: f64,
	/// Canvas y coordinate.
	#[serde(default)]
	pub y: f64,
}

impl Node {
	/// Creates a node at the origin.
	pub fn new(id: impl Into<NodeKey>, title: impl Into<String>, node_type: NodeType) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			node_type,
			subtype: None,
			x: 0.0,
			y: 0.0,
		}
	}

	/// Moves the node, builder style.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.x = x;
		self.y = y;
		self
	}

	/// Sets the subtype, builder style.
	pub fn with_subtype(mut self, subtype: NodeSubtype) -> Self {
		self.subtype = Some(subtype);
		self
	}

	/// The node's identity key.
	pub fn key(&self) -> &NodeKey {
		&self.id
	}
}

/// A directed edge between two nodes, identified by its `(source, target)` pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Key of the node the edge leaves.
	pub source: NodeKey,
	/// Key of the node the edge enters.
	pub target: NodeKey,
	/// Edge category.
	#[serde(rename = "type")]
	pub edge_type: EdgeType,
	/// Label drawn on the edge handle.
	#[serde(
		rename = "handleText",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub handle_text: Option<String>,
	/// Tooltip shown while hovering the edge handle.
	#[serde(
		rename = "handleTooltipText",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub handle_tooltip_text: Option<String>,
}

impl Edge {
	/// Creates an unlabeled edge.
	pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>, edge_type: EdgeType) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			edge_type,
			handle_text: None,
			handle_tooltip_text: None,
		}
	}

	/// Sets the handle label, builder style.
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.handle_text = Some(text.into());
		self
	}

	/// Sets the handle tooltip, builder style.
	pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
		self.handle_tooltip_text = Some(tooltip.into());
		self
	}

	/// True when `key` is either endpoint.
	pub fn touches(&self, key: &NodeKey) -> bool {
		&self.source == key || &self.target == key
	}

	/// True when the edge runs exactly from `source` to `target`.
	pub fn connects(&self, source: &NodeKey, target: &NodeKey) -> bool {
		&self.source == source && &self.target == target
	}
}

/// Complete graph: ordered nodes and ordered edges, held as one unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	/// Nodes in insertion order.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// Edges in insertion order.
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl Graph {
	/// Position of the node with `key`. Linear scan.
	pub fn node_index(&self, key: &NodeKey) -> Option<usize> {
		self.nodes.iter().position(|node| node.key() == key)
	}

	/// Position of the first edge running from `source` to `target`. Linear scan.
	pub fn edge_index(&self, source: &NodeKey, target: &NodeKey) -> Option<usize> {
		self.edges.iter().position(|edge| edge.connects(source, target))
	}

	/// The node with `key`, if present.
	pub fn node(&self, key: &NodeKey) -> Option<&Node> {
		self.node_index(key).map(|i| &self.nodes[i])
	}

	/// Checks unique keys, existing endpoints and the absence of self-loops.
	pub fn validate(&self) -> Result<(), GraphError> {
		let mut keys = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !keys.insert(node.key()) {
				return Err(GraphError::DuplicateNode(node.key().clone()));
			}
		}

		for edge in &self.edges {
			if edge.source == edge.target {
				return Err(GraphError::SelfLoop(edge.source.clone()));
			}
			for endpoint in [&edge.source, &edge.target] {
				if !keys.contains(endpoint) {
					return Err(GraphError::DanglingEdge {
						from: edge.source.clone(),
						to: edge.target.clone(),
						missing: endpoint.clone(),
					});
				}
			}
		}
		Ok(())
	}

	/// Parses and validates a JSON document of the form `{ nodes: [...], edges: [...] }`.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		let graph: Graph = serde_json::from_str(text)?;
		graph.validate()?;
		Ok(graph)
	}
}

/// What the editor currently has selected.
///
/// `Unset` means nothing was ever selected; `Cleared` records an explicit
/// deselect (clicking the background, deleting the selected item).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
	/// Nothing selected yet.
	#[default]
	Unset,
	/// Deselected on purpose.
	Cleared,
	/// A node is selected.
	Node(Node),
	/// An edge is selected.
	Edge(Edge),
}

impl Selection {
	/// True when the node with `key` is selected.
	pub fn is_node(&self, key: &NodeKey) -> bool {
		matches!(self, Selection::Node(node) if node.key() == key)
	}

	/// True when an edge from `source` to `target` is selected.
	pub fn is_edge(&self, source: &NodeKey, target: &NodeKey) -> bool {
		matches!(self, Selection::Edge(edge) if edge.connects(source, target))
	}

	/// True when the selection refers to `key`, either as the node itself or
	/// as an endpoint of the selected edge.
	pub fn references(&self, key: &NodeKey) -> bool {
		match self {
			Selection::Node(node) => node.key() == key,
			Selection::Edge(edge) => edge.touches(key),
			Selection::Unset | Selection::Cleared => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn keys_deserialize_from_text_or_number() {
		let keys: Vec<NodeKey> = serde_json::from_str(r#"["a1", 1700000000000]"#).unwrap();
		assert_eq!(
			keys,
			vec![NodeKey::from("a1"), NodeKey::Number(1_700_000_000_000)]
		);
		assert_eq!(keys[1].to_string(), "1700000000000");
	}

	#[test]
	fn node_without_position_defaults_to_origin() {
		let node: Node =
			serde_json::from_str(r#"{"id":"start1","title":"Agent_1P","type":"special"}"#).unwrap();
		assert_eq!(node, Node::new("start1", "Agent_1P", NodeType::Special));
	}

	#[test]
	fn edge_uses_handle_field_names() {
		let edge = Edge::new("a1", "a2", EdgeType::Special)
			.with_text("5")
			.with_tooltip("hover");
		let json = serde_json::to_value(&edge).unwrap();
		assert_eq!(json["handleText"], "5");
		assert_eq!(json["handleTooltipText"], "hover");
		assert_eq!(json["type"], "special");
	}

	#[test]
	fn validate_rejects_dangling_edges() {
		let graph = Graph {
			nodes: vec![Node::new("a", "A", NodeType::Empty)],
			edges: vec![Edge::new("a", "b", EdgeType::Empty)],
		};
		match graph.validate() {
			Err(GraphError::DanglingEdge { missing, .. }) => assert_eq!(missing, NodeKey::from("b")),
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn validate_rejects_duplicates_and_self_loops() {
		let duplicate = Graph {
			nodes: vec![
				Node::new("a", "A", NodeType::Empty),
				Node::new("a", "again", NodeType::Poly),
			],
			edges: vec![],
		};
		assert!(matches!(duplicate.validate(), Err(GraphError::DuplicateNode(_))));

		let looped = Graph {
			nodes: vec![Node::new("a", "A", NodeType::Empty)],
			edges: vec![Edge::new("a", "a", EdgeType::Empty)],
		};
		assert!(matches!(looped.validate(), Err(GraphError::SelfLoop(_))));
	}

	#[test]
	fn from_json_reports_parse_errors() {
		assert!(matches!(Graph::from_json("{ nodes: "), Err(GraphError::Parse(_))));
	}

	#[test]
	fn selection_references_edge_endpoints() {
		let selection = Selection::Edge(Edge::new("a", "b", EdgeType::Empty));
		assert!(selection.references(&"b".into()));
		assert!(!selection.references(&"c".into()));
		assert!(selection.is_edge(&"a".into(), &"b".into()));
		assert!(!Selection::Cleared.references(&"a".into()));
	}
}
