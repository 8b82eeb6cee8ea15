//! Display layout engines.
//!
//! A layout engine decides where the renderer draws each node. It never
//! writes back into the graph: stored positions only change when the user
//! drags a node and the renderer reports it.

use std::collections::HashMap;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::config::LayoutEngine;
use super::types::Graph;

/// Above this many nodes the force layout falls back to stored positions.
pub const FORCE_LAYOUT_NODE_LIMIT: usize = 500;

const FORCE_LAYOUT_STEPS: usize = 120;
const FORCE_LAYOUT_DT: f32 = 0.016;

/// Rounds `value` to the nearest multiple of `grid`. Non-positive grids leave
/// the value alone.
pub fn snap(value: f64, grid: f64) -> f64 {
	if grid > 0.0 {
		(value / grid).round() * grid
	} else {
		value
	}
}

/// Display position of every node, index-aligned with `graph.nodes`.
pub fn display_positions(graph: &Graph, engine: LayoutEngine, grid_spacing: f64) -> Vec<(f64, f64)> {
	match engine {
		LayoutEngine::None => graph.nodes.iter().map(|n| (n.x, n.y)).collect(),
		LayoutEngine::SnapToGrid => graph
			.nodes
			.iter()
			.map(|n| (snap(n.x, grid_spacing), snap(n.y, grid_spacing)))
			.collect(),
		LayoutEngine::ForceDirected => force_positions(graph),
	}
}

/// Runs a fixed number of simulation steps seeded from the stored positions.
fn force_positions(graph: &Graph) -> Vec<(f64, f64)> {
	if graph.nodes.len() > FORCE_LAYOUT_NODE_LIMIT {
		warn!(
			"force layout skipped: {} nodes exceeds limit of {}",
			graph.nodes.len(),
			FORCE_LAYOUT_NODE_LIMIT
		);
		return display_positions(graph, LayoutEngine::None, 0.0);
	}

	let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: 12000.0,
		force_spring: 0.3,
		force_max: 280.0,
		node_speed: 7000.0,
		damping_factor: 0.95,
	});

	let mut index_of = HashMap::with_capacity(graph.nodes.len());
	for (i, node) in graph.nodes.iter().enumerate() {
		// Nudge coincident nodes apart so the charge force has a direction.
		let jitter = (i as f32 * 0.618).fract();
		let idx = sim.add_node(NodeData {
			x: node.x as f32 + jitter,
			y: node.y as f32 - jitter,
			mass: 10.0,
			is_anchor: false,
			user_data: i,
		});
		index_of.insert(node.key(), idx);
	}
	for edge in &graph.edges {
		if let (Some(&src), Some(&tgt)) = (index_of.get(&edge.source), index_of.get(&edge.target)) {
			sim.add_edge(src, tgt, EdgeData::default());
		}
	}

	for _ in 0..FORCE_LAYOUT_STEPS {
		sim.update(FORCE_LAYOUT_DT);
	}

	let mut positions = display_positions(graph, LayoutEngine::None, 0.0);
	sim.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		if x.is_finite() && y.is_finite() {
			positions[node.data.user_data] = (x, y);
		}
	});
	positions
}
