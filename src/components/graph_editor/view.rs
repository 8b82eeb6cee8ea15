//! Canvas interaction: pan/zoom transform, hit testing and gesture recognition.
//!
//! Pointer and key events go in, [`Gesture`]s come out. The canvas component
//! turns each gesture into one callback invocation; nothing here touches the
//! graph itself.

use std::collections::HashMap;

use super::catalog::TypeTable;
use super::layout::snap;
use super::types::{Edge, Graph, Node, NodeKey, Selection};

/// Pointer travel (screen pixels) below which a press counts as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Margin kept around the graph when fitting it into the viewport.
const FIT_MARGIN: f64 = 80.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zooms by `factor` keeping the graph point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min_k: f64, max_k: f64) {
		let new_k = (self.k * factor).clamp(min_k, max_k);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Pointer position in canvas pixels plus the modifier that switches
/// gestures into their "create" flavor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
	pub shift: bool,
}

impl Pointer {
	pub fn at(x: f64, y: f64) -> Self {
		Self { x, y, shift: false }
	}

	pub fn shifted(x: f64, y: f64) -> Self {
		Self { x, y, shift: true }
	}
}

/// What lies under a graph-space point, in priority order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
	Node(usize),
	/// The arrowhead end of an edge, grabbed to reattach it.
	EdgeHandle(usize),
	Edge(usize),
	Background,
}

/// User intent recognized on the canvas, one per renderer callback.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Gesture {
	/// A node was clicked, or `None` for a click that clears the selection.
	SelectNode(Option<Node>),
	/// An edge or its label handle was clicked.
	SelectEdge(Edge),
	/// Shift-click on the background, in graph coordinates.
	CreateNode { x: f64, y: f64 },
	/// A node was dropped at a new position.
	UpdateNode(Node),
	/// Delete key with a node selected; `remaining` is the node list without it.
	DeleteNode {
		node: Node,
		key: NodeKey,
		remaining: Vec<Node>,
	},
	/// Shift-drag from `source` released over `target`.
	CreateEdge { source: Node, target: Node },
	/// An arrowhead was dragged onto `target`; `edge` is the edge before the swap.
	SwapEdge { source: Node, target: Node, edge: Edge },
	/// Delete key with an edge selected; `remaining` is the edge list without it.
	DeleteEdge { edge: Edge, remaining: Vec<Edge> },
}

/// Resolved geometry of one edge in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// Where the line leaves the source outline.
	pub start: (f64, f64),
	/// Arrow tip, on the target outline.
	pub tip: (f64, f64),
	/// Unit direction from source to target.
	pub dir: (f64, f64),
	pub mid: (f64, f64),
}

impl EdgeGeometry {
	/// Center of the arrowhead, where a reattach drag is grabbed.
	pub fn handle(&self, arrow_size: f64) -> (f64, f64) {
		(
			self.tip.0 - self.dir.0 * arrow_size / 2.0,
			self.tip.1 - self.dir.1 * arrow_size / 2.0,
		)
	}
}

/// Distance from `center` to the edge of a box with half extents `half`
/// along unit direction `dir`.
fn box_exit(half: (f64, f64), dir: (f64, f64)) -> f64 {
	let tx = if dir.0.abs() > f64::EPSILON {
		half.0 / dir.0.abs()
	} else {
		f64::INFINITY
	};
	let ty = if dir.1.abs() > f64::EPSILON {
		half.1 / dir.1.abs()
	} else {
		f64::INFINITY
	};
	tx.min(ty)
}

/// Clips the center-to-center segment to both node outlines. `None` when the
/// nodes overlap so much there is nothing left to draw.
pub fn edge_geometry(
	from: (f64, f64),
	from_half: (f64, f64),
	to: (f64, f64),
	to_half: (f64, f64),
) -> Option<EdgeGeometry> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	let dir = (dx / dist, dy / dist);
	let (out, inn) = (box_exit(from_half, dir), box_exit(to_half, dir));
	if out + inn >= dist {
		return None;
	}

	let start = (from.0 + dir.0 * out, from.1 + dir.1 * out);
	let tip = (to.0 - dir.0 * inn, to.1 - dir.1 * inn);
	Some(EdgeGeometry {
		start,
		tip,
		dir,
		mid: ((start.0 + tip.0) / 2.0, (start.1 + tip.1) / 2.0),
	})
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
	((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len_sq = abx * abx + aby * aby;
	if len_sq < f64::EPSILON {
		return distance(p, a);
	}
	let t = (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0);
	distance(p, (a.0 + abx * t, a.1 + aby * t))
}

/// Everything hit testing needs about the current frame.
pub struct Scene<'a> {
	pub graph: &'a Graph,
	/// Display positions, index-aligned with `graph.nodes`.
	pub positions: &'a [(f64, f64)],
	pub types: &'a TypeTable,
	/// Edge hit tolerance in graph units.
	pub tolerance: f64,
	pub arrow_size: f64,
	index: HashMap<&'a NodeKey, usize>,
}

impl<'a> Scene<'a> {
	pub fn new(
		graph: &'a Graph,
		positions: &'a [(f64, f64)],
		types: &'a TypeTable,
		tolerance: f64,
		arrow_size: f64,
	) -> Self {
		let index = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.key(), i))
			.collect();
		Self {
			graph,
			positions,
			types,
			tolerance,
			arrow_size,
			index,
		}
	}

	/// Index of the node with `key` in `graph.nodes`.
	pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
		self.index.get(key).copied()
	}

	fn half_extent(&self, i: usize) -> (f64, f64) {
		let node = &self.graph.nodes[i];
		self.types.node_extent(node.node_type, node.subtype)
	}

	/// Geometry of `edge` using `position` to place each node.
	pub fn edge_geometry_with(
		&self,
		edge: &Edge,
		position: impl Fn(usize) -> (f64, f64),
	) -> Option<EdgeGeometry> {
		let (s, t) = (self.index_of(&edge.source)?, self.index_of(&edge.target)?);
		edge_geometry(position(s), self.half_extent(s), position(t), self.half_extent(t))
	}

	pub fn edge_geometry(&self, edge: &Edge) -> Option<EdgeGeometry> {
		self.edge_geometry_with(edge, |i| self.positions[i])
	}

	/// Topmost element at graph point `(gx, gy)`. Later nodes and edges are
	/// drawn on top, so they are tested first.
	pub fn hit_test(&self, gx: f64, gy: f64) -> Hit {
		for (i, &(x, y)) in self.positions.iter().enumerate().rev() {
			let (hx, hy) = self.half_extent(i);
			if (gx - x).abs() <= hx && (gy - y).abs() <= hy {
				return Hit::Node(i);
			}
		}

		let mut body_hit = None;
		for (i, edge) in self.graph.edges.iter().enumerate().rev() {
			let Some(geom) = self.edge_geometry(edge) else {
				continue;
			};
			if distance((gx, gy), geom.handle(self.arrow_size)) <= self.arrow_size / 2.0 + self.tolerance {
				return Hit::EdgeHandle(i);
			}
			if body_hit.is_none() {
				let handle_radius = self.types.edge_style(edge.edge_type).handle_radius;
				if distance_to_segment((gx, gy), geom.start, geom.tip) <= self.tolerance
					|| (edge.handle_text.is_some() && distance((gx, gy), geom.mid) <= handle_radius)
				{
					body_hit = Some(i);
				}
			}
		}

		body_hit.map_or(Hit::Background, Hit::Edge)
	}
}

/// In-progress pointer interaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	Panning {
		start: (f64, f64),
		origin: (f64, f64),
		moved: bool,
	},
	/// Items are held by identity, not position: the graph may change
	/// (e.g. a keyboard delete) while the button is still down.
	MovingNode {
		key: NodeKey,
		start: (f64, f64),
		node_start: (f64, f64),
		current: (f64, f64),
		moved: bool,
	},
	/// Shift-drag from a node, drawing out a new edge.
	Connecting { source: NodeKey, cursor: (f64, f64) },
	/// Dragging an edge's arrowhead towards a new target.
	Reattaching {
		edge: Edge,
		cursor: (f64, f64),
		moved: bool,
	},
	PressedEdge { edge: Edge },
}

/// View-side state of the canvas: transform, current interaction and hover.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	pub transform: ViewTransform,
	pub interaction: Interaction,
	pub hovered: Hit,
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Snap size applied to positions reported after a drag.
	pub grid_size: f64,
}

impl ViewState {
	pub fn new(min_zoom: f64, max_zoom: f64, grid_size: f64) -> Self {
		let min_zoom = min_zoom.max(0.01);
		Self {
			transform: ViewTransform::default(),
			interaction: Interaction::Idle,
			hovered: Hit::Background,
			min_zoom,
			max_zoom: max_zoom.max(min_zoom),
			grid_size,
		}
	}

	/// Centers the graph in a `width` x `height` viewport at the largest zoom
	/// that shows every node.
	pub fn fit(&mut self, positions: &[(f64, f64)], width: f64, height: f64) {
		if positions.is_empty() {
			self.transform = ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0_f64.clamp(self.min_zoom, self.max_zoom),
			};
			return;
		}

		let (min_x, max_x, min_y, max_y) = positions.iter().fold(
			(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
			|(a, b, c, d), &(x, y)| (a.min(x), b.max(x), c.min(y), d.max(y)),
		);
		let (bw, bh) = (max_x - min_x + 2.0 * FIT_MARGIN, max_y - min_y + 2.0 * FIT_MARGIN);
		let k = (width / bw).min(height / bh).clamp(self.min_zoom, self.max_zoom);
		self.transform = ViewTransform {
			x: width / 2.0 - (min_x + max_x) / 2.0 * k,
			y: height / 2.0 - (min_y + max_y) / 2.0 * k,
			k,
		};
	}

	/// Where node `index` of `scene` should be drawn, honoring an active drag.
	pub fn node_position(&self, scene: &Scene, index: usize) -> (f64, f64) {
		if let Interaction::MovingNode {
			key,
			current,
			moved: true,
			..
		} = &self.interaction
		{
			if scene.graph.nodes.get(index).is_some_and(|n| n.key() == key) {
				return *current;
			}
		}
		scene.positions.get(index).copied().unwrap_or_default()
	}

	pub fn pointer_down(&mut self, pointer: Pointer, scene: &Scene) -> Vec<Gesture> {
		let (gx, gy) = self.transform.screen_to_graph(pointer.x, pointer.y);
		let screen = (pointer.x, pointer.y);

		match scene.hit_test(gx, gy) {
			Hit::Node(index) if pointer.shift => {
				self.interaction = Interaction::Connecting {
					source: scene.graph.nodes[index].key().clone(),
					cursor: (gx, gy),
				};
			}
			Hit::Node(index) => {
				self.interaction = Interaction::MovingNode {
					key: scene.graph.nodes[index].key().clone(),
					start: screen,
					node_start: scene.positions[index],
					current: scene.positions[index],
					moved: false,
				};
			}
			Hit::EdgeHandle(index) => {
				self.interaction = Interaction::Reattaching {
					edge: scene.graph.edges[index].clone(),
					cursor: (gx, gy),
					moved: false,
				};
			}
			Hit::Edge(index) => {
				self.interaction = Interaction::PressedEdge {
					edge: scene.graph.edges[index].clone(),
				};
			}
			Hit::Background if pointer.shift => {
				self.interaction = Interaction::Idle;
				return vec![Gesture::CreateNode { x: gx, y: gy }];
			}
			Hit::Background => {
				self.interaction = Interaction::Panning {
					start: screen,
					origin: (self.transform.x, self.transform.y),
					moved: false,
				};
			}
		}
		Vec::new()
	}

	/// Tracks the pointer. Returns whether the canvas needs a redraw.
	pub fn pointer_move(&mut self, pointer: Pointer, scene: &Scene) -> bool {
		let (gx, gy) = self.transform.screen_to_graph(pointer.x, pointer.y);
		let k = self.transform.k;

		match &mut self.interaction {
			Interaction::Idle => {
				let hovered = scene.hit_test(gx, gy);
				let changed = hovered != self.hovered;
				self.hovered = hovered;
				changed
			}
			Interaction::Panning {
				start,
				origin,
				moved,
			} => {
				*moved |= distance(*start, (pointer.x, pointer.y)) > DRAG_THRESHOLD;
				if *moved {
					self.transform.x = origin.0 + (pointer.x - start.0);
					self.transform.y = origin.1 + (pointer.y - start.1);
				}
				*moved
			}
			Interaction::MovingNode {
				start,
				node_start,
				current,
				moved,
				..
			} => {
				*moved |= distance(*start, (pointer.x, pointer.y)) > DRAG_THRESHOLD;
				*current = (
					node_start.0 + (pointer.x - start.0) / k,
					node_start.1 + (pointer.y - start.1) / k,
				);
				*moved
			}
			Interaction::Connecting { cursor, .. } => {
				*cursor = (gx, gy);
				true
			}
			Interaction::Reattaching { cursor, moved, .. } => {
				*moved |= distance(*cursor, (gx, gy)) * k > DRAG_THRESHOLD;
				if *moved {
					*cursor = (gx, gy);
				}
				*moved
			}
			Interaction::PressedEdge { .. } => false,
		}
	}

	pub fn pointer_up(&mut self, pointer: Pointer, scene: &Scene) -> Vec<Gesture> {
		let (gx, gy) = self.transform.screen_to_graph(pointer.x, pointer.y);
		let graph = scene.graph;
		// Current version of an edge held since the press, if it survived.
		let current_edge = |edge: &Edge| {
			graph
				.edge_index(&edge.source, &edge.target)
				.map(|i| graph.edges[i].clone())
		};

		match std::mem::take(&mut self.interaction) {
			Interaction::Idle | Interaction::Panning { moved: true, .. } => Vec::new(),
			Interaction::Panning { moved: false, .. } => vec![Gesture::SelectNode(None)],
			Interaction::MovingNode {
				key,
				moved,
				current,
				..
			} => {
				let Some(node) = graph.node(&key) else {
					return Vec::new();
				};
				if !moved {
					return vec![Gesture::SelectNode(Some(node.clone()))];
				}
				let mut node = node.clone();
				node.x = snap(current.0, self.grid_size);
				node.y = snap(current.1, self.grid_size);
				vec![
					Gesture::UpdateNode(node.clone()),
					Gesture::SelectNode(Some(node)),
				]
			}
			Interaction::Connecting { source, .. } => {
				match (graph.node(&source), scene.hit_test(gx, gy)) {
					(Some(source), Hit::Node(target)) => vec![Gesture::CreateEdge {
						source: source.clone(),
						target: graph.nodes[target].clone(),
					}],
					_ => Vec::new(),
				}
			}
			Interaction::Reattaching { edge, moved, .. } => {
				let Some(edge) = current_edge(&edge) else {
					return Vec::new();
				};
				if !moved {
					return vec![Gesture::SelectEdge(edge)];
				}
				match (graph.node(&edge.source), scene.hit_test(gx, gy)) {
					(Some(source), Hit::Node(target)) => vec![Gesture::SwapEdge {
						source: source.clone(),
						target: graph.nodes[target].clone(),
						edge,
					}],
					_ => Vec::new(),
				}
			}
			Interaction::PressedEdge { edge } => current_edge(&edge)
				.map(|edge| vec![Gesture::SelectEdge(edge)])
				.unwrap_or_default(),
		}
	}

	/// Abandons any interaction when the pointer leaves the canvas.
	pub fn pointer_leave(&mut self) {
		self.interaction = Interaction::Idle;
		self.hovered = Hit::Background;
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.transform
			.zoom_at(sx, sy, factor, self.min_zoom, self.max_zoom);
	}

	/// Delete/Backspace removes the selected node or edge, Escape deselects.
	/// The post-deletion collections are computed here, the way the graph
	/// widget hands them to its owner.
	pub fn key_down(&self, key: &str, graph: &Graph, selected: &Selection) -> Vec<Gesture> {
		match (key, selected) {
			("Escape", _) => vec![Gesture::SelectNode(None)],
			("Delete" | "Backspace", Selection::Node(node)) => {
				if graph.node_index(node.key()).is_none() {
					return Vec::new();
				}
				let remaining = graph
					.nodes
					.iter()
					.filter(|n| n.key() != node.key())
					.cloned()
					.collect();
				vec![Gesture::DeleteNode {
					node: node.clone(),
					key: node.key().clone(),
					remaining,
				}]
			}
			("Delete" | "Backspace", Selection::Edge(edge)) => {
				let Some(index) = graph.edge_index(&edge.source, &edge.target) else {
					return Vec::new();
				};
				let mut remaining = graph.edges.clone();
				remaining.remove(index);
				vec![Gesture::DeleteEdge {
					edge: edge.clone(),
					remaining,
				}]
			}
			_ => Vec::new(),
		}
	}
}
