//! Graph state manager.
//!
//! Owns the canonical graph, the selection and the desired bulk-sample size.
//! Every mutation runs synchronously, swaps in freshly built node/edge vectors
//! for whatever it changes and bumps `revision`, which is what the renderer
//! watches to decide when to redraw.
//!
//! Lookup misses are never fatal: gestures come from the renderer and may be
//! stale, so the default handlers log and ignore them. The `try_*` variants
//! report the miss as a [`GraphError`] instead.

use log::debug;

use super::catalog::{NodeType, TypeTable, edge_type_for};
use super::config::EditorConfig;
use super::error::GraphError;
use super::keys::KeyGenerator;
use super::sample::{GridLayout, RandomTypes, TypePolicy, generate_bulk_sample};
use super::types::{Edge, Graph, Node, NodeKey, Selection};

/// Parses the desired node count the way the page input is read: optional
/// leading whitespace and `+`, then as many decimal digits as follow.
/// Anything without digits, negative, or too large for `usize` becomes 0.
pub fn parse_node_count(input: &str) -> usize {
	let trimmed = input.trim_start();
	if trimmed.starts_with('-') {
		return 0;
	}
	let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
	let digits_end = unsigned
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(unsigned.len());
	unsigned[..digits_end].parse().unwrap_or(0)
}

/// The editor's live graph plus everything needed to mutate it.
pub struct GraphState {
	graph: Graph,
	selected: Selection,
	total_nodes: usize,
	revision: u64,
	graph_revision: u64,
	types: TypeTable,
	layout: GridLayout,
	keys: KeyGenerator,
	policy: Box<dyn TypePolicy + Send + Sync>,
}

impl GraphState {
	/// State over `graph` with nothing selected; the desired sample size
	/// starts at the graph's node count.
	pub fn new(
		graph: Graph,
		types: TypeTable,
		layout: GridLayout,
		policy: impl TypePolicy + Send + Sync + 'static,
	) -> Self {
		Self {
			total_nodes: graph.nodes.len(),
			graph,
			selected: Selection::Unset,
			revision: 0,
			graph_revision: 0,
			types,
			layout,
			keys: KeyGenerator::new(),
			policy: Box::new(policy),
		}
	}

	/// State seeded with entropy-backed randomness and the configured grid.
	pub fn from_config(graph: Graph, config: &EditorConfig) -> Self {
		Self::new(
			graph,
			TypeTable::standard(),
			config.sample_layout(),
			RandomTypes::from_entropy(config.special_node_ratio),
		)
	}

	/// Replaces the key generator, builder style.
	pub fn with_keys(mut self, keys: KeyGenerator) -> Self {
		self.keys = keys;
		self
	}

	/// The canonical graph.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	#[allow(missing_docs)]
	pub fn selected(&self) -> &Selection {
		&self.selected
	}

	/// Node count the next generated sample will have.
	pub fn total_nodes(&self) -> usize {
		self.total_nodes
	}

	/// Incremented by every mutation, selection changes included.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Incremented only when nodes or edges change.
	pub fn graph_revision(&self) -> u64 {
		self.graph_revision
	}

	#[allow(missing_docs)]
	pub fn types(&self) -> &TypeTable {
		&self.types
	}

	/// Position of the node keyed `key` in the node sequence.
	pub fn node_index(&self, key: &NodeKey) -> Option<usize> {
		self.graph.node_index(key)
	}

	/// Position of the first edge from `source` to `target`.
	pub fn edge_index(&self, source: &NodeKey, target: &NodeKey) -> Option<usize> {
		self.graph.edge_index(source, target)
	}

	/// The stored node keyed `key`, not a stale copy held by a caller.
	pub fn resolve_node(&self, key: &NodeKey) -> Option<&Node> {
		self.graph.node(key)
	}

	fn set_nodes(&mut self, nodes: Vec<Node>) {
		self.graph = Graph {
			nodes,
			edges: std::mem::take(&mut self.graph.edges),
		};
		self.revision += 1;
		self.graph_revision += 1;
	}

	fn set_edges(&mut self, edges: Vec<Edge>) {
		self.graph = Graph {
			nodes: std::mem::take(&mut self.graph.nodes),
			edges,
		};
		self.revision += 1;
		self.graph_revision += 1;
	}

	fn select(&mut self, selection: Selection) {
		self.selected = selection;
		self.revision += 1;
	}

	/// Swaps in a whole new graph. The selection is left alone.
	pub fn replace_graph(&mut self, graph: Graph) {
		debug!(
			"replacing graph: {} nodes, {} edges",
			graph.nodes.len(),
			graph.edges.len()
		);
		self.graph = graph;
		self.revision += 1;
		self.graph_revision += 1;
	}

	/// Stores the desired node count without touching the graph.
	pub fn store_total_nodes(&mut self, total: usize) {
		self.total_nodes = total;
		self.revision += 1;
	}

	/// Replaces the graph with a generated sample of `total_nodes` nodes.
	pub fn regenerate(&mut self) {
		let graph = generate_bulk_sample(
			self.total_nodes,
			&self.layout,
			&self.types,
			self.policy.as_mut(),
		);
		self.replace_graph(graph);
	}

	/// Reads the count typed into the page input, stores it and regenerates
	/// the graph. Returns the coerced count.
	pub fn set_total_nodes(&mut self, input: &str) -> usize {
		let total = parse_node_count(input);
		self.store_total_nodes(total);
		self.regenerate();
		total
	}

	/// Puts `node` first in the sequence, keeping the rest in order.
	pub fn insert_node_at_head(&mut self, node: Node) {
		let mut nodes = Vec::with_capacity(self.graph.nodes.len() + 1);
		nodes.push(node);
		nodes.extend(self.graph.nodes.iter().cloned());
		self.set_nodes(nodes);
	}

	/// The "Add Node" button: a special node titled `Node A` at the origin,
	/// placed first in the sequence.
	pub fn add_start_node(&mut self) -> NodeKey {
		let key = self.keys.next_key(&self.graph.nodes);
		debug!("adding start node {key}");
		self.insert_node_at_head(Node::new(key.clone(), "Node A", NodeType::Special));
		key
	}

	/// Removes the first node along with every edge touching it, so edges
	/// never outlive their endpoints.
	pub fn remove_head_node(&mut self) -> Option<Node> {
		let removed = self.graph.nodes.first()?.clone();
		let key = removed.key();

		let nodes = self.graph.nodes[1..].to_vec();
		let edges: Vec<Edge> = self
			.graph
			.edges
			.iter()
			.filter(|edge| !edge.touches(key))
			.cloned()
			.collect();
		debug!(
			"removed head node {key} and {} incident edges",
			self.graph.edges.len() - edges.len()
		);

		if self.selected.references(key) {
			self.selected = Selection::Cleared;
		}
		self.graph = Graph { nodes, edges };
		self.revision += 1;
		self.graph_revision += 1;
		Some(removed)
	}

	/// Replaces the node with the same key, e.g. after a drag. Unknown keys
	/// are ignored.
	pub fn apply_node_update(&mut self, node: Node) {
		if let Err(err) = self.try_apply_node_update(node) {
			debug!("ignoring node update: {err}");
		}
	}

	/// Like [`Self::apply_node_update`], reporting unknown keys.
	pub fn try_apply_node_update(&mut self, node: Node) -> Result<(), GraphError> {
		let index = self
			.node_index(node.key())
			.ok_or_else(|| GraphError::NodeNotFound(node.key().clone()))?;
		let mut nodes = self.graph.nodes.clone();
		nodes[index] = node;
		self.set_nodes(nodes);
		Ok(())
	}

	/// Selects a node; `None` records an explicit deselect.
	pub fn select_node(&mut self, node: Option<Node>) {
		self.select(node.map_or(Selection::Cleared, Selection::Node));
	}

	/// Selects `edge`, replacing any node selection.
	pub fn select_edge(&mut self, edge: Edge) {
		self.select(Selection::Edge(edge));
	}

	/// Appends an untitled node at `(x, y)` with a category chosen by the
	/// type policy, and clears the selection.
	pub fn create_node_at(&mut self, x: f64, y: f64) -> NodeKey {
		let key = self.keys.next_key(&self.graph.nodes);
		let node_type = self.policy.created_node_type();
		debug!("creating {node_type:?} node {key} at ({x}, {y})");

		let mut nodes = self.graph.nodes.clone();
		nodes.push(Node::new(key.clone(), "", node_type).at(x, y));
		self.set_nodes(nodes);
		self.select(Selection::Cleared);
		key
	}

	/// Drops every edge touching `node`, then adopts the renderer's
	/// post-deletion node list.
	pub fn delete_node(&mut self, node: &Node, remaining: Vec<Node>) {
		let key = node.key();
		if remaining.iter().any(|n| n.key() == key) {
			debug!("remaining nodes still contain deleted node {key}");
		}
		let edges: Vec<Edge> = self
			.graph
			.edges
			.iter()
			.filter(|edge| !edge.touches(key))
			.cloned()
			.collect();

		self.graph = Graph {
			nodes: remaining,
			edges,
		};
		self.selected = Selection::Cleared;
		self.revision += 1;
		self.graph_revision += 1;
	}

	/// Connects `source` to `target` and selects the new edge. Self-loops and
	/// edges to nodes outside the graph are dropped without touching the
	/// selection. Returns whether an edge was added.
	pub fn create_edge(&mut self, source: &Node, target: &Node) -> bool {
		if source.key() == target.key() {
			debug!("dropping self-loop on {}", source.key());
			return false;
		}
		if self.node_index(source.key()).is_none() || self.node_index(target.key()).is_none() {
			debug!(
				"dropping edge {} -> {}: endpoint not in graph",
				source.key(),
				target.key()
			);
			return false;
		}

		let edge = Edge::new(
			source.key().clone(),
			target.key().clone(),
			edge_type_for(source.node_type),
		);
		let mut edges = self.graph.edges.clone();
		edges.push(edge.clone());
		self.set_edges(edges);
		self.select(Selection::Edge(edge));
		true
	}

	/// Reattaches `edge` so it runs from `source` to `target`, keeping its
	/// position, type and labels, and selects the result. Misses are ignored.
	pub fn swap_edge_endpoint(&mut self, source: &Node, target: &Node, edge: &Edge) {
		if let Err(err) = self.try_swap_edge_endpoint(source, target, edge) {
			debug!("ignoring edge swap: {err}");
		}
	}

	/// Like [`Self::swap_edge_endpoint`], reporting why a swap was refused.
	pub fn try_swap_edge_endpoint(
		&mut self,
		source: &Node,
		target: &Node,
		edge: &Edge,
	) -> Result<(), GraphError> {
		let index = self
			.edge_index(&edge.source, &edge.target)
			.ok_or_else(|| GraphError::EdgeNotFound {
				from: edge.source.clone(),
				to: edge.target.clone(),
			})?;
		for endpoint in [source.key(), target.key()] {
			if self.node_index(endpoint).is_none() {
				return Err(GraphError::NodeNotFound(endpoint.clone()));
			}
		}
		if source.key() == target.key() {
			return Err(GraphError::SelfLoop(source.key().clone()));
		}

		let mut swapped = self.graph.edges[index].clone();
		swapped.source = source.key().clone();
		swapped.target = target.key().clone();

		let mut edges = self.graph.edges.clone();
		edges[index] = swapped.clone();
		self.set_edges(edges);
		self.select(Selection::Edge(swapped));
		Ok(())
	}

	/// Adopts the renderer's post-deletion edge list and clears the selection.
	pub fn delete_edge(&mut self, edge: &Edge, remaining: Vec<Edge>) {
		debug!("deleting edge {} -> {}", edge.source, edge.target);
		self.graph = Graph {
			nodes: std::mem::take(&mut self.graph.nodes),
			edges: remaining,
		};
		self.selected = Selection::Cleared;
		self.revision += 1;
		self.graph_revision += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_editor::catalog::EdgeType;
	use crate::components::graph_editor::sample::hand_authored;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	/// Deterministic policy: created nodes alternate special/plain, picks take
	/// the first pool entry.
	struct Alternating(bool);

	impl TypePolicy for Alternating {
		fn created_node_type(&mut self) -> NodeType {
			self.0 = !self.0;
			if self.0 { NodeType::Special } else { NodeType::Empty }
		}

		fn pick_node_type(&mut self, pool: &[NodeType]) -> NodeType {
			pool.first().copied().unwrap_or(NodeType::Empty)
		}

		fn pick_edge_type(&mut self, pool: &[EdgeType]) -> EdgeType {
			pool.first().copied().unwrap_or(EdgeType::Empty)
		}
	}

	fn sample_state() -> GraphState {
		GraphState::new(
			hand_authored(),
			TypeTable::standard(),
			GridLayout::default(),
			Alternating(false),
		)
		.with_keys(KeyGenerator::with_clock(|| 1_000))
	}

	fn node(state: &GraphState, key: &str) -> Node {
		state.resolve_node(&key.into()).cloned().unwrap()
	}

	#[test]
	fn parses_counts_like_the_page_input() {
		assert_eq!(parse_node_count("42"), 42);
		assert_eq!(parse_node_count("  7"), 7);
		assert_eq!(parse_node_count("+3"), 3);
		assert_eq!(parse_node_count("12abc"), 12);
		assert_eq!(parse_node_count("abc"), 0);
		assert_eq!(parse_node_count(""), 0);
		assert_eq!(parse_node_count("-5"), 0);
		assert_eq!(parse_node_count("99999999999999999999999999"), 0);
	}

	#[test]
	fn lookups() {
		let state = sample_state();
		assert_eq!(state.node_index(&"a2".into()), Some(2));
		assert_eq!(state.node_index(&"zz".into()), None);
		assert_eq!(state.edge_index(&"a4".into(), &"a6".into()), Some(4));
		assert_eq!(state.edge_index(&"a6".into(), &"a4".into()), None);
		assert!(state.resolve_node(&"missing".into()).is_none());
		assert_eq!(state.total_nodes(), 6);
	}

	#[test]
	fn create_node_then_duplicate_edge() {
		let mut state = sample_state();
		let key = state.create_node_at(10.0, 10.0);

		assert_eq!(state.graph().nodes.len(), 7);
		let created = state.graph().nodes.last().unwrap();
		assert_eq!(created.key(), &key);
		assert_eq!(created.title, "");
		assert_eq!((created.x, created.y), (10.0, 10.0));
		assert_eq!(created.node_type, NodeType::Special);
		assert_eq!(state.selected(), &Selection::Cleared);

		let (a1, a2) = (node(&state, "a1"), node(&state, "a2"));
		assert!(state.create_edge(&a1, &a2));
		assert_eq!(state.graph().edges.len(), 6);
		let added = state.graph().edges.last().unwrap().clone();
		assert_eq!(added.edge_type, EdgeType::Empty);
		assert_eq!(state.selected(), &Selection::Edge(added));
	}

	#[test]
	fn created_node_type_follows_policy() {
		let mut state = sample_state();
		state.create_node_at(0.0, 0.0);
		state.create_node_at(0.0, 0.0);
		let types: Vec<NodeType> = state.graph().nodes[6..].iter().map(|n| n.node_type).collect();
		assert_eq!(types, vec![NodeType::Special, NodeType::Empty]);
	}

	#[test]
	fn self_loops_are_dropped_quietly() {
		let mut state = sample_state();
		let a1 = node(&state, "a1");
		state.select_node(Some(a1.clone()));
		let before = state.selected().clone();

		assert!(!state.create_edge(&a1, &a1));
		assert_eq!(state.graph().edges.len(), 5);
		assert_eq!(state.selected(), &before);
	}

	#[test]
	fn edges_to_unknown_nodes_are_dropped() {
		let mut state = sample_state();
		let ghost = Node::new("ghost", "", NodeType::Empty);
		assert!(!state.create_edge(&node(&state, "a1"), &ghost));
		assert_eq!(state.graph().edges.len(), 5);
	}

	#[test]
	fn special_source_creates_special_edge() {
		let mut state = sample_state();
		let (start, a5) = (node(&state, "start1"), node(&state, "a5"));
		state.create_edge(&start, &a5);
		assert_eq!(state.graph().edges.last().unwrap().edge_type, EdgeType::Special);
	}

	#[test]
	fn delete_node_cascades_edges() {
		let mut state = sample_state();
		let a4 = node(&state, "a4");
		let remaining: Vec<Node> = state
			.graph()
			.nodes
			.iter()
			.filter(|n| n.key() != a4.key())
			.cloned()
			.collect();
		state.select_node(Some(a4.clone()));
		state.delete_node(&a4, remaining);

		assert_eq!(state.graph().nodes.len(), 5);
		assert_eq!(state.graph().edges.len(), 2);
		assert!(state.graph().edges.iter().all(|e| !e.touches(a4.key())));
		assert_eq!(state.selected(), &Selection::Cleared);
		assert!(state.graph().validate().is_ok());
	}

	#[test]
	fn remove_head_node_cascades_too() {
		let mut state = sample_state();
		let start = node(&state, "start1");
		state.select_edge(state.graph().edges[0].clone());

		let removed = state.remove_head_node().unwrap();
		assert_eq!(removed, start);
		assert_eq!(state.graph().nodes.len(), 5);
		assert_eq!(state.graph().edges.len(), 4);
		assert!(state.graph().validate().is_ok());
		assert_eq!(state.selected(), &Selection::Cleared);
	}

	#[test]
	fn remove_head_node_on_empty_graph() {
		let mut state = sample_state();
		state.set_total_nodes("0");
		let revision = state.revision();
		assert!(state.remove_head_node().is_none());
		assert_eq!(state.revision(), revision);
	}

	#[test]
	fn add_start_node_prepends() {
		let mut state = sample_state();
		let key = state.add_start_node();
		let head = &state.graph().nodes[0];
		assert_eq!(head.key(), &key);
		assert_eq!(head.title, "Node A");
		assert_eq!(head.node_type, NodeType::Special);
		assert_eq!((head.x, head.y), (0.0, 0.0));
		assert_eq!(state.graph().nodes.len(), 7);

		let second = state.add_start_node();
		assert_ne!(key, second);
	}

	#[test]
	fn node_update_replaces_in_place() {
		let mut state = sample_state();
		let moved = node(&state, "a2").at(420.0, 36.0);
		state.apply_node_update(moved.clone());
		assert_eq!(state.graph().nodes[2], moved);

		let revision = state.revision();
		state.apply_node_update(Node::new("nope", "", NodeType::Empty));
		assert_eq!(state.revision(), revision);
		assert!(matches!(
			state.try_apply_node_update(Node::new("nope", "", NodeType::Empty)),
			Err(GraphError::NodeNotFound(_))
		));
	}

	#[test]
	fn selection_distinguishes_deselect() {
		let mut state = sample_state();
		assert_eq!(state.selected(), &Selection::Unset);
		state.select_node(None);
		assert_eq!(state.selected(), &Selection::Cleared);
		let a1 = node(&state, "a1");
		state.select_node(Some(a1.clone()));
		assert_eq!(state.selected(), &Selection::Node(a1));
	}

	#[test]
	fn swap_keeps_labels_and_position() {
		let mut state = sample_state();
		let original = state.graph().edges[1].clone();
		let (start, a5) = (node(&state, "start1"), node(&state, "a5"));

		state.swap_edge_endpoint(&start, &a5, &original);

		let swapped = &state.graph().edges[1];
		assert_eq!(state.graph().edges.len(), 5);
		assert_eq!(swapped.source, NodeKey::from("start1"));
		assert_eq!(swapped.target, NodeKey::from("a5"));
		assert_eq!(swapped.handle_text, original.handle_text);
		assert_eq!(swapped.handle_tooltip_text, original.handle_tooltip_text);
		assert_eq!(swapped.edge_type, original.edge_type);
		assert_eq!(state.selected(), &Selection::Edge(swapped.clone()));
	}

	#[test]
	fn swap_misses_are_ignored() {
		let mut state = sample_state();
		let before = state.graph().clone();
		let (a1, a5) = (node(&state, "a1"), node(&state, "a5"));

		let ghost_edge = Edge::new("a5", "a1", EdgeType::Empty);
		state.swap_edge_endpoint(&a1, &a5, &ghost_edge);
		assert_eq!(state.graph(), &before);

		let edge = before.edges[0].clone();
		assert!(matches!(
			state.try_swap_edge_endpoint(&a1, &a1, &edge),
			Err(GraphError::SelfLoop(_))
		));
		assert!(matches!(
			state.try_swap_edge_endpoint(&a1, &Node::new("x", "", NodeType::Empty), &edge),
			Err(GraphError::NodeNotFound(_))
		));
		assert_eq!(state.graph(), &before);
	}

	#[test]
	fn delete_edge_adopts_remaining() {
		let mut state = sample_state();
		let edge = state.graph().edges[2].clone();
		let mut remaining = state.graph().edges.clone();
		remaining.remove(2);
		state.select_edge(edge.clone());
		state.delete_edge(&edge, remaining.clone());
		assert_eq!(state.graph().edges, remaining);
		assert_eq!(state.selected(), &Selection::Cleared);
	}

	#[test]
	fn invalid_count_regenerates_empty_graph() {
		let mut state = sample_state();
		assert_eq!(state.set_total_nodes("abc"), 0);
		assert_eq!(state.total_nodes(), 0);
		assert!(state.graph().nodes.is_empty());
		assert!(state.graph().edges.is_empty());
	}

	#[test]
	fn storing_count_does_not_regenerate() {
		let mut state = sample_state();
		state.store_total_nodes(40);
		assert_eq!(state.graph().nodes.len(), 6);
		state.regenerate();
		assert_eq!(state.graph().nodes.len(), 40);
		assert_eq!(state.graph().edges.len(), 39);
		assert!(state.graph().nodes.iter().all(|n| n.node_type == NodeType::Empty));
	}

	#[test]
	fn every_mutation_bumps_revision() {
		let mut state = sample_state();
		let mut last = state.revision();
		let mut check = |state: &GraphState| {
			assert!(state.revision() > last);
			last = state.revision();
		};

		state.select_node(None);
		check(&state);
		state.create_node_at(1.0, 2.0);
		check(&state);
		state.add_start_node();
		check(&state);
		state.set_total_nodes("3");
		check(&state);
	}

	#[test]
	fn selection_changes_leave_graph_revision_alone() {
		let mut state = sample_state();
		let start = state.graph_revision();
		state.select_node(Some(node(&state, "a1")));
		state.select_edge(state.graph().edges[0].clone());
		state.store_total_nodes(12);
		assert_eq!(state.graph_revision(), start);

		state.create_node_at(0.0, 0.0);
		assert_eq!(state.graph_revision(), start + 1);
		state.remove_head_node();
		assert_eq!(state.graph_revision(), start + 2);
	}

	#[test]
	fn config_ratio_reaches_created_nodes() {
		let always = EditorConfig {
			special_node_ratio: 1.0,
			..EditorConfig::default()
		};
		let never = EditorConfig {
			special_node_ratio: 0.0,
			..EditorConfig::default()
		};
		let mut special = GraphState::from_config(hand_authored(), &always);
		let mut plain = GraphState::from_config(hand_authored(), &never);
		for i in 0..16 {
			let key = special.create_node_at(i as f64, 0.0);
			assert_eq!(special.resolve_node(&key).map(|n| n.node_type), Some(NodeType::Special));
			let key = plain.create_node_at(i as f64, 0.0);
			assert_eq!(plain.resolve_node(&key).map(|n| n.node_type), Some(NodeType::Empty));
		}
	}

	proptest! {
		#[test]
		fn absent_keys_never_resolve(key in "[b-z][0-9]{1,3}") {
			let state = sample_state();
			prop_assert!(state.resolve_node(&NodeKey::Text(key)).is_none());
		}

		#[test]
		fn self_loops_never_grow_edges(index in 0usize..6) {
			let mut state = sample_state();
			let n = state.graph().nodes[index].clone();
			state.create_edge(&n, &n);
			prop_assert_eq!(state.graph().edges.len(), 5);
		}

		#[test]
		fn deleting_any_node_leaves_no_incident_edges(count in 1usize..60, pick in any::<prop::sample::Index>()) {
			let mut state = sample_state();
			state.set_total_nodes(&count.to_string());
			let victim = state.graph().nodes[pick.index(count)].clone();
			let remaining: Vec<Node> = state
				.graph()
				.nodes
				.iter()
				.filter(|n| n.key() != victim.key())
				.cloned()
				.collect();
			state.delete_node(&victim, remaining);
			prop_assert!(state.graph().edges.iter().all(|e| !e.touches(victim.key())));
			prop_assert!(state.graph().validate().is_ok());
		}

		#[test]
		fn swaps_preserve_count_and_labels(edge in 0usize..5, from in 0usize..6, to in 0usize..6) {
			prop_assume!(from != to);
			let mut state = sample_state();
			let original = state.graph().edges[edge].clone();
			let (s, t) = (state.graph().nodes[from].clone(), state.graph().nodes[to].clone());
			state.swap_edge_endpoint(&s, &t, &original);
			let swapped = &state.graph().edges[edge];
			prop_assert!(swapped.connects(s.key(), t.key()));
			prop_assert_eq!(state.graph().edges.len(), 5);
			prop_assert_eq!(&swapped.handle_text, &original.handle_text);
			prop_assert_eq!(&swapped.handle_tooltip_text, &original.handle_tooltip_text);
		}
	}
}
