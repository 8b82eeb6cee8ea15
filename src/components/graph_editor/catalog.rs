//! Type classification table.
//!
//! Maps node categories, node subtypes and edge categories to the shape and
//! colors the renderer draws for them. The table is plain data: the state
//! manager only reads its sampling pools, the renderer only reads styles.

use serde::{Deserialize, Serialize};

use super::theme::Color;

/// Primary node category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
	/// Plain node, drawn as a square.
	Empty,
	/// Highlighted node, drawn as a circle. Edges leaving it are special too.
	Special,
	/// Hexagon.
	Poly,
	/// Wide, short bar.
	Skinny,
	/// Circle inside a ring.
	ComplexCircle,
}

/// Secondary node category, drawn as an underlay beneath the primary shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeSubtype {
	/// Child of a special node, drawn over a larger ring.
	SpecialChild,
}

/// Edge category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeType {
	/// Plain solid edge.
	Empty,
	/// Highlighted edge.
	Special,
}

/// Outline drawn for a node or subtype.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Shape {
	Square,
	Circle,
	Hexagon,
	/// Wide, flat rectangle.
	Bar,
	/// Circle with a concentric inner circle.
	Ring,
}

/// Rendering metadata for one node category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
	/// Outline traced for fill, stroke and the selection ring.
	pub shape: Shape,
	/// Bounding box width in world units. Also the hit box.
	pub width: f64,
	/// Bounding box height in world units.
	pub height: f64,
	/// Interior color.
	pub fill: Color,
	/// Outline color, also used for the title.
	pub stroke: Color,
	/// Outline width in world units.
	pub stroke_width: f64,
}

/// Rendering metadata for one edge category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Line and arrowhead color.
	pub color: Color,
	/// Line width multiplier.
	pub width: f64,
	/// Dashed instead of solid.
	pub dashed: bool,
	/// Radius of the label handle at the edge midpoint.
	pub handle_radius: f64,
}

const EMPTY_NODE: NodeStyle = NodeStyle {
	shape: Shape::Square,
	width: 100.0,
	height: 100.0,
	fill: Color::rgb(255, 255, 255),
	stroke: Color::rgb(110, 110, 110),
	stroke_width: 2.0,
};

const EMPTY_EDGE: EdgeStyle = EdgeStyle {
	color: Color::rgb(140, 160, 180),
	width: 2.0,
	dashed: false,
	handle_radius: 14.0,
};

/// The classification table handed to both the state manager and the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeTable {
	nodes: Vec<(NodeType, NodeStyle)>,
	subtypes: Vec<(NodeSubtype, NodeStyle)>,
	edges: Vec<(EdgeType, EdgeStyle)>,
	node_pool: Vec<NodeType>,
	edge_pool: Vec<EdgeType>,
}

impl TypeTable {
	/// The stock table: five node categories, one subtype, two edge categories.
	pub fn standard() -> Self {
		Self {
			nodes: vec![
				(NodeType::Empty, EMPTY_NODE),
				(
					NodeType::Special,
					NodeStyle {
						shape: Shape::Circle,
						fill: Color::rgb(216, 236, 255),
						stroke: Color::rgb(0, 120, 212),
						..EMPTY_NODE
					},
				),
				(
					NodeType::Poly,
					NodeStyle {
						shape: Shape::Hexagon,
						width: 88.0,
						height: 72.0,
						fill: Color::rgb(232, 245, 233),
						stroke: Color::rgb(67, 160, 71),
						..EMPTY_NODE
					},
				),
				(
					NodeType::Skinny,
					NodeStyle {
						shape: Shape::Bar,
						width: 154.0,
						height: 54.0,
						fill: Color::rgb(255, 243, 224),
						stroke: Color::rgb(239, 108, 0),
						..EMPTY_NODE
					},
				),
				(
					NodeType::ComplexCircle,
					NodeStyle {
						shape: Shape::Ring,
						fill: Color::rgb(243, 229, 245),
						stroke: Color::rgb(123, 31, 162),
						..EMPTY_NODE
					},
				),
			],
			subtypes: vec![(
				NodeSubtype::SpecialChild,
				NodeStyle {
					shape: Shape::Square,
					width: 120.0,
					height: 120.0,
					fill: Color::rgba(0, 120, 212, 0.15),
					stroke: Color::rgba(0, 120, 212, 0.6),
					stroke_width: 1.0,
				},
			)],
			edges: vec![
				(EdgeType::Empty, EMPTY_EDGE),
				(
					EdgeType::Special,
					EdgeStyle {
						color: Color::rgb(0, 120, 212),
						dashed: true,
						..EMPTY_EDGE
					},
				),
			],
			node_pool: vec![
				NodeType::Empty,
				NodeType::Special,
				NodeType::Poly,
				NodeType::Skinny,
			],
			edge_pool: vec![EdgeType::Empty, EdgeType::Special],
		}
	}

	/// Style for a node category, falling back to the plain square.
	pub fn node_style(&self, node_type: NodeType) -> NodeStyle {
		self.nodes
			.iter()
			.find(|(t, _)| *t == node_type)
			.map(|(_, style)| *style)
			.unwrap_or(EMPTY_NODE)
	}

	/// Underlay style, `None` for a subtype with no entry.
	pub fn subtype_style(&self, subtype: NodeSubtype) -> Option<NodeStyle> {
		self.subtypes
			.iter()
			.find(|(t, _)| *t == subtype)
			.map(|(_, style)| *style)
	}

	/// Style for an edge category, falling back to the plain edge.
	pub fn edge_style(&self, edge_type: EdgeType) -> EdgeStyle {
		self.edges
			.iter()
			.find(|(t, _)| *t == edge_type)
			.map(|(_, style)| *style)
			.unwrap_or(EMPTY_EDGE)
	}

	/// Node categories the bulk generator draws from.
	pub fn node_pool(&self) -> &[NodeType] {
		&self.node_pool
	}

	/// Edge categories the bulk generator draws from.
	pub fn edge_pool(&self) -> &[EdgeType] {
		&self.edge_pool
	}

	/// Half extents of the node's hit box, including its subtype underlay.
	pub fn node_extent(&self, node_type: NodeType, subtype: Option<NodeSubtype>) -> (f64, f64) {
		let style = self.node_style(node_type);
		let (mut w, mut h) = (style.width, style.height);
		if let Some(under) = subtype.and_then(|s| self.subtype_style(s)) {
			w = w.max(under.width);
			h = h.max(under.height);
		}
		(w / 2.0, h / 2.0)
	}
}

impl Default for TypeTable {
	fn default() -> Self {
		Self::standard()
	}
}

/// Category for an edge created from `source`: special nodes emit special edges.
pub fn edge_type_for(source: NodeType) -> EdgeType {
	if source == NodeType::Special {
		EdgeType::Special
	} else {
		EdgeType::Empty
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_category_has_a_style() {
		let table = TypeTable::standard();
		assert_eq!(table.node_style(NodeType::Special).shape, Shape::Circle);
		assert_eq!(table.node_style(NodeType::Poly).shape, Shape::Hexagon);
		assert_eq!(table.node_style(NodeType::Skinny).shape, Shape::Bar);
		assert_eq!(table.node_style(NodeType::ComplexCircle).shape, Shape::Ring);
		assert!(table.subtype_style(NodeSubtype::SpecialChild).is_some());
		assert!(table.edge_style(EdgeType::Special).dashed);
		assert!(!table.edge_style(EdgeType::Empty).dashed);
	}

	#[test]
	fn sampling_pools_skip_complex_circle() {
		let table = TypeTable::standard();
		assert_eq!(table.node_pool().len(), 4);
		assert!(!table.node_pool().contains(&NodeType::ComplexCircle));
		assert_eq!(table.edge_pool(), &[EdgeType::Empty, EdgeType::Special]);
	}

	#[test]
	fn subtype_widens_hit_box() {
		let table = TypeTable::standard();
		assert_eq!(table.node_extent(NodeType::Empty, None), (50.0, 50.0));
		assert_eq!(
			table.node_extent(NodeType::Empty, Some(NodeSubtype::SpecialChild)),
			(60.0, 60.0)
		);
	}

	#[test]
	fn special_sources_emit_special_edges() {
		assert_eq!(edge_type_for(NodeType::Special), EdgeType::Special);
		assert_eq!(edge_type_for(NodeType::Poly), EdgeType::Empty);
	}

	#[test]
	fn categories_use_camel_case_names() {
		assert_eq!(
			serde_json::to_string(&NodeType::ComplexCircle).unwrap(),
			"\"complexCircle\""
		);
		assert_eq!(
			serde_json::from_str::<NodeSubtype>("\"specialChild\"").unwrap(),
			NodeSubtype::SpecialChild
		);
	}
}
