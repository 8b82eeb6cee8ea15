//! Sample graphs: the hand-authored starter graph and the bulk generator used
//! for stress-testing the canvas.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::catalog::{EdgeType, NodeSubtype, NodeType, TypeTable};
use super::types::{Edge, Graph, Node};

/// Decides categories for generated and newly created nodes and edges.
///
/// Injected into the state manager so tests can replace randomness with a
/// fixed sequence.
pub trait TypePolicy {
	/// Category for a node created by clicking the canvas.
	fn created_node_type(&mut self) -> NodeType;
	/// Uniform pick from `pool`; `pool` may be empty.
	fn pick_node_type(&mut self, pool: &[NodeType]) -> NodeType;
	/// Uniform pick from `pool`; `pool` may be empty.
	fn pick_edge_type(&mut self, pool: &[EdgeType]) -> EdgeType;
}

/// Random policy: `special_ratio` of created nodes are special, the rest
/// plain; generated nodes and edges are drawn uniformly from the table pools.
#[derive(Clone, Debug)]
pub struct RandomTypes<R = StdRng> {
	rng: R,
	special_ratio: f64,
}

impl RandomTypes<StdRng> {
	/// Policy seeded from the platform's entropy source.
	pub fn from_entropy(special_ratio: f64) -> Self {
		Self::new(StdRng::from_entropy(), special_ratio)
	}

	/// Reproducible policy for tests and benchmarks.
	pub fn seeded(seed: u64, special_ratio: f64) -> Self {
		Self::new(StdRng::seed_from_u64(seed), special_ratio)
	}
}

impl<R: Rng> RandomTypes<R> {
	/// Non-finite ratios count as `0.0`; others are clamped to `0.0..=1.0`.
	pub fn new(rng: R, special_ratio: f64) -> Self {
		let special_ratio = if special_ratio.is_finite() {
			special_ratio.clamp(0.0, 1.0)
		} else {
			0.0
		};
		Self { rng, special_ratio }
	}
}

impl<R: Rng> TypePolicy for RandomTypes<R> {
	fn created_node_type(&mut self) -> NodeType {
		if self.rng.gen_bool(self.special_ratio) {
			NodeType::Special
		} else {
			NodeType::Empty
		}
	}

	fn pick_node_type(&mut self, pool: &[NodeType]) -> NodeType {
		pool.choose(&mut self.rng).copied().unwrap_or(NodeType::Empty)
	}

	fn pick_edge_type(&mut self, pool: &[EdgeType]) -> EdgeType {
		pool.choose(&mut self.rng).copied().unwrap_or(EdgeType::Empty)
	}
}

/// Grid used to place generated nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
	/// Columns per row; `0` is treated as `1`.
	pub per_row: usize,
	/// Distance between neighbours on both axes.
	pub spacing: f64,
}

impl Default for GridLayout {
	fn default() -> Self {
		Self {
			per_row: 20,
			spacing: 200.0,
		}
	}
}

/// The starter graph shown when the page has no embedded graph.
pub fn hand_authored() -> Graph {
	Graph {
		nodes: vec![
			Node::new("start1", "Agent_1P", NodeType::Special),
			Node::new("a1", "GIG", NodeType::Poly).at(200.0, 0.0),
			Node::new("a2", "Moniker", NodeType::Empty)
				.with_subtype(NodeSubtype::SpecialChild)
				.at(400.0, 0.0),
			Node::new("a4", "Normalizer", NodeType::Empty).at(650.0, 0.0),
			Node::new("a5", "Scrubber", NodeType::Empty).at(900.0, -100.0),
			Node::new("a6", "Kusto", NodeType::Empty).at(900.0, 100.0),
		],
		edges: vec![
			Edge::new("start1", "a1", EdgeType::Special)
				.with_text("5")
				.with_tooltip("5"),
			Edge::new("a1", "a2", EdgeType::Special)
				.with_text("5")
				.with_tooltip("This edge connects Node A and Node B"),
			Edge::new("a2", "a4", EdgeType::Empty).with_text("54"),
			Edge::new("a4", "a5", EdgeType::Empty).with_text("50ms"),
			Edge::new("a4", "a6", EdgeType::Empty).with_text("54ms"),
		],
	}
}

/// Generates `count` nodes `a1..=a{count}` on a grid and chains them into a
/// path `a1 -> a2 -> ...`.
///
/// Node `i` sits at column `i % per_row`, row `i / per_row`, so the first
/// row starts one cell in and holds `per_row - 1` nodes.
pub fn generate_bulk_sample(
	count: usize,
	layout: &GridLayout,
	table: &TypeTable,
	policy: &mut dyn TypePolicy,
) -> Graph {
	let per_row = layout.per_row.max(1);

	let nodes: Vec<Node> = (1..=count)
		.map(|i| {
			let (col, row) = (i % per_row, i / per_row);
			Node::new(format!("a{i}"), format!("Node {i}"), policy.pick_node_type(table.node_pool()))
				.at(col as f64 * layout.spacing, row as f64 * layout.spacing)
		})
		.collect();

	let edges: Vec<Edge> = (1..count)
		.map(|i| {
			Edge::new(
				format!("a{i}"),
				format!("a{}", i + 1),
				policy.pick_edge_type(table.edge_pool()),
			)
		})
		.collect();

	Graph { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_editor::types::NodeKey;
	use proptest::prelude::*;

	#[test]
	fn hand_authored_sample_is_valid() {
		let graph = hand_authored();
		assert_eq!(graph.nodes.len(), 6);
		assert_eq!(graph.edges.len(), 5);
		assert!(graph.validate().is_ok());
		assert_eq!(graph.nodes[2].subtype, Some(NodeSubtype::SpecialChild));
	}

	#[test]
	fn grid_wraps_every_twenty_nodes() {
		let mut policy = RandomTypes::seeded(7, 0.25);
		let graph = generate_bulk_sample(
			41,
			&GridLayout::default(),
			&TypeTable::standard(),
			&mut policy,
		);
		let pos = |i: usize| (graph.nodes[i - 1].x, graph.nodes[i - 1].y);
		assert_eq!(pos(1), (200.0, 0.0));
		assert_eq!(pos(19), (3800.0, 0.0));
		assert_eq!(pos(20), (0.0, 200.0));
		assert_eq!(pos(21), (200.0, 200.0));
		assert_eq!(pos(40), (0.0, 400.0));
		assert_eq!(graph.nodes[40].title, "Node 41");
	}

	#[test]
	fn same_seed_same_graph() {
		let table = TypeTable::standard();
		let layout = GridLayout::default();
		let a = generate_bulk_sample(50, &layout, &table, &mut RandomTypes::seeded(3, 0.25));
		let b = generate_bulk_sample(50, &layout, &table, &mut RandomTypes::seeded(3, 0.25));
		assert_eq!(a, b);
	}

	#[test]
	fn zero_nodes_yields_empty_graph() {
		let graph = generate_bulk_sample(
			0,
			&GridLayout::default(),
			&TypeTable::standard(),
			&mut RandomTypes::seeded(1, 0.25),
		);
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn ratio_extremes_are_deterministic() {
		let mut always = RandomTypes::seeded(9, 1.0);
		let mut never = RandomTypes::seeded(9, 0.0);
		for _ in 0..32 {
			assert_eq!(always.created_node_type(), NodeType::Special);
			assert_eq!(never.created_node_type(), NodeType::Empty);
		}
		// Out-of-range ratios are clamped instead of panicking.
		assert_eq!(RandomTypes::seeded(9, 4.0).created_node_type(), NodeType::Special);
		assert_eq!(RandomTypes::seeded(9, f64::NAN).created_node_type(), NodeType::Empty);
	}

	#[test]
	fn default_ratio_makes_about_one_in_four_special() {
		for seed in [1, 42, 2024] {
			let mut policy = RandomTypes::seeded(seed, 0.25);
			let draws = 4_000;
			let special = (0..draws)
				.filter(|_| policy.created_node_type() == NodeType::Special)
				.count();
			let share = special as f64 / draws as f64;
			assert!((0.22..=0.28).contains(&share), "seed {seed}: share {share}");
		}
	}

	#[test]
	fn empty_pools_fall_back_to_plain() {
		let mut policy = RandomTypes::seeded(1, 0.5);
		assert_eq!(policy.pick_node_type(&[]), NodeType::Empty);
		assert_eq!(policy.pick_edge_type(&[]), EdgeType::Empty);
	}

	proptest! {
		#[test]
		fn generated_graph_shape(count in 0usize..300, seed in any::<u64>()) {
			let table = TypeTable::standard();
			let graph = generate_bulk_sample(
				count,
				&GridLayout::default(),
				&table,
				&mut RandomTypes::seeded(seed, 0.25),
			);
			prop_assert_eq!(graph.nodes.len(), count);
			prop_assert_eq!(graph.edges.len(), count.saturating_sub(1));
			prop_assert!(graph.validate().is_ok());
			for node in &graph.nodes {
				prop_assert!(table.node_pool().contains(&node.node_type));
			}
			for (i, edge) in graph.edges.iter().enumerate() {
				prop_assert_eq!(&edge.source, &NodeKey::Text(format!("a{}", i + 1)));
				prop_assert_eq!(&edge.target, &NodeKey::Text(format!("a{}", i + 2)));
			}
		}
	}
}
