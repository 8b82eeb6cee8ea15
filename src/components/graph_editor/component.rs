//! Leptos component wrapping the graph editor canvas.
//!
//! The component creates an HTML canvas element and wires up mouse, wheel and
//! keyboard handlers. Handlers turn events into [`Gesture`]s and hand them to
//! the owner through [`GraphCallbacks`]; the graph itself is read-only here.
//! An animation loop runs via `requestAnimationFrame` and redraws whenever the
//! owner's revision moves or the view changed.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::catalog::TypeTable;
use super::config::LayoutEngine;
use super::layout::display_positions;
use super::render::{self, Frame};
use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::types::{Edge, Graph, Node, NodeKey, Selection};
use super::view::{Gesture, Hit, Pointer, Scene, ViewState};

/// The eight notifications the canvas raises towards its owner.
#[derive(Clone, Copy)]
pub struct GraphCallbacks {
	/// `None` clears the selection.
	pub on_select_node: Callback<Option<Node>>,
	#[allow(missing_docs)]
	pub on_select_edge: Callback<Edge>,
	/// Graph-space coordinates of the click.
	pub on_create_node: Callback<(f64, f64)>,
	/// Node at its dropped position.
	pub on_update_node: Callback<Node>,
	/// Deleted node, its key, and the node list without it.
	pub on_delete_node: Callback<(Node, NodeKey, Vec<Node>)>,
	/// Source and target nodes.
	pub on_create_edge: Callback<(Node, Node)>,
	/// Source node, new target node, and the edge being reattached.
	pub on_swap_edge: Callback<(Node, Node, Edge)>,
	/// Deleted edge and the edge list without it.
	pub on_delete_edge: Callback<(Edge, Vec<Edge>)>,
}

impl GraphCallbacks {
	/// Runs the callback matching `gesture`.
	pub fn dispatch(&self, gesture: Gesture) {
		debug!("gesture: {gesture:?}");
		match gesture {
			Gesture::SelectNode(node) => self.on_select_node.run(node),
			Gesture::SelectEdge(edge) => self.on_select_edge.run(edge),
			Gesture::CreateNode { x, y } => self.on_create_node.run((x, y)),
			Gesture::UpdateNode(node) => self.on_update_node.run(node),
			Gesture::DeleteNode {
				node,
				key,
				remaining,
			} => self.on_delete_node.run((node, key, remaining)),
			Gesture::CreateEdge { source, target } => self.on_create_edge.run((source, target)),
			Gesture::SwapEdge {
				source,
				target,
				edge,
			} => self.on_swap_edge.run((source, target, edge)),
			Gesture::DeleteEdge { edge, remaining } => self.on_delete_edge.run((edge, remaining)),
		}
	}
}

/// Bundles the view state with visual configuration and the cached layout.
struct ViewContext {
	view: ViewState,
	scale: ScaleConfig,
	theme: Theme,
	types: TypeTable,
	layout_engine: LayoutEngine,
	grid_spacing: f64,
	width: f64,
	height: f64,
	positions: Vec<(f64, f64)>,
	/// Graph the cached positions were computed for.
	laid_out: Option<Graph>,
	/// Revision `laid_out` was last checked against.
	synced_revision: Option<u64>,
	drawn_revision: Option<u64>,
	dirty: bool,
}

impl ViewContext {
	/// Recomputes display positions when the graph changed since last time.
	/// The graph is only compared when `revision` moved.
	fn sync(&mut self, graph: &Graph, revision: u64) {
		if self.synced_revision == Some(revision) {
			return;
		}
		self.synced_revision = Some(revision);
		if self.laid_out.as_ref() == Some(graph) {
			return;
		}
		self.view.hovered = Hit::Background;
		let previous = self.laid_out.as_ref().map(|g| g.nodes.len());
		self.positions = display_positions(graph, self.layout_engine, self.grid_spacing);
		// Refit after a bulk replacement, not after single-node edits.
		if previous.is_none_or(|n| n.abs_diff(graph.nodes.len()) > 1) {
			self.view.fit(&self.positions, self.width, self.height);
		}
		self.laid_out = Some(graph.clone());
		self.dirty = true;
	}

	fn with_scene<R>(
		&mut self,
		graph: &Graph,
		revision: u64,
		f: impl FnOnce(&mut ViewState, &Scene) -> R,
	) -> R {
		self.sync(graph, revision);
		let scale = ScaledValues::new(&self.scale, self.view.transform.k);
		let scene = Scene::new(
			graph,
			&self.positions,
			&self.types,
			scale.edge_tolerance,
			scale.arrow_size,
		);
		f(&mut self.view, &scene)
	}

	fn draw(
		&mut self,
		graph: &Graph,
		revision: u64,
		selected: &Selection,
		ctx: &CanvasRenderingContext2d,
	) {
		self.sync(graph, revision);
		let scale = ScaledValues::new(&self.scale, self.view.transform.k);
		let scene = Scene::new(
			graph,
			&self.positions,
			&self.types,
			scale.edge_tolerance,
			scale.arrow_size,
		);
		render::render(
			&Frame {
				scene: &scene,
				view: &self.view,
				selected,
				theme: &self.theme,
				scale: &scale,
				width: self.width,
				height: self.height,
				grid_spacing: self.grid_spacing,
			},
			ctx,
		);
		self.dirty = false;
	}
}

type SharedContext = Rc<RefCell<Option<ViewContext>>>;

/// Runs `f` against the view context, the current graph and its revision,
/// without tracking.
fn interact<R: Default>(
	context: &SharedContext,
	graph: Signal<Graph>,
	revision: Signal<u64>,
	f: impl FnOnce(&mut ViewContext, &Graph, u64) -> R,
) -> R {
	let Some(rev) = revision.try_get_untracked() else {
		return R::default();
	};
	graph
		.try_with_untracked(|g| context.borrow_mut().as_mut().map(|c| f(c, g, rev)))
		.flatten()
		.unwrap_or_default()
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Pointer> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Pointer {
		x: ev.client_x() as f64 - rect.left(),
		y: ev.client_y() as f64 - rect.top(),
		shift: ev.shift_key(),
	})
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Renders an editable directed graph on a canvas element.
///
/// The owner passes the graph, the selection and a revision counter as
/// signals and receives every edit through `callbacks`. The canvas sizes
/// itself to its parent container by default; set `fullscreen = true` to fill
/// the viewport and resize automatically with the window. Explicit
/// `width`/`height` override automatic sizing.
///
/// Click selects, drag moves a node, shift-drag from a node draws an edge,
/// dragging an arrowhead reattaches it, shift-click on the background creates
/// a node, Delete/Backspace removes the selection.
#[component]
pub fn GraphView(
	#[prop(into)] graph: Signal<Graph>,
	#[prop(into)] selected: Signal<Selection>,
	#[prop(into)] revision: Signal<u64>,
	callbacks: GraphCallbacks,
	#[prop(default = TypeTable::standard())] types: TypeTable,
	#[prop(default = Theme::default())] theme: Theme,
	#[prop(default = LayoutEngine::None)] layout_engine: LayoutEngine,
	/// Snap size for positions reported after a drag.
	#[prop(default = 1.0)]
	grid_size: f64,
	/// Spacing of the background dot grid.
	#[prop(default = 36.0)]
	grid_spacing: f64,
	#[prop(default = 0.15)] min_zoom: f64,
	#[prop(default = 1.5)] max_zoom: f64,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("graph-editor: canvas 2d context unavailable");
			return;
		};

		*context_init.borrow_mut() = Some(ViewContext {
			view: ViewState::new(min_zoom, max_zoom, grid_size),
			scale: ScaleConfig::default(),
			theme: theme.clone(),
			types: types.clone(),
			layout_engine,
			grid_spacing,
			width: w,
			height: h,
			positions: Vec::new(),
			laid_out: None,
			synced_revision: None,
			drawn_revision: None,
			dirty: true,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.width = nw;
					c.height = nh;
					c.dirty = true;
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Signals are gone once the component unmounts; stop the loop.
			let Some(rev) = revision.try_get_untracked() else {
				return;
			};
			let drawn = graph.try_with_untracked(|g| {
				selected.try_with_untracked(|sel| {
					if let Some(ref mut c) = *context_anim.borrow_mut() {
						if c.dirty || c.drawn_revision != Some(rev) {
							c.draw(g, rev, sel, &ctx);
							c.drawn_revision = Some(rev);
						}
					}
				})
			});
			if drawn.flatten().is_none() {
				return;
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(p) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(canvas) = canvas_ref.get_untracked() {
			let _ = canvas.focus();
		}
		let gestures = interact(&context_md, graph, revision, |c, g, rev| {
			let gestures = c.with_scene(g, rev, |view, scene| view.pointer_down(p, scene));
			c.dirty = true;
			gestures
		});
		for gesture in gestures {
			callbacks.dispatch(gesture);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = pointer(canvas_ref, &ev) else {
			return;
		};
		interact(&context_mm, graph, revision, |c, g, rev| {
			let redraw = c.with_scene(g, rev, |view, scene| view.pointer_move(p, scene));
			c.dirty |= redraw;
		});
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(p) = pointer(canvas_ref, &ev) else {
			return;
		};
		let gestures = interact(&context_mu, graph, revision, |c, g, rev| {
			let gestures = c.with_scene(g, rev, |view, scene| view.pointer_up(p, scene));
			c.dirty = true;
			gestures
		});
		for gesture in gestures {
			callbacks.dispatch(gesture);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.view.pointer_leave();
			c.dirty = true;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(p) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.view.wheel(p.x, p.y, ev.delta_y());
			c.dirty = true;
		}
	};

	let context_kd = context.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		let key = ev.key();
		let gestures = selected
			.try_with_untracked(|sel| {
				interact(&context_kd, graph, revision, |c, g, _| c.view.key_down(&key, g, sel))
			})
			.unwrap_or_default();
		if !gestures.is_empty() {
			ev.prevent_default();
		}
		for gesture in gestures {
			callbacks.dispatch(gesture);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-editor-canvas"
			tabindex="0"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:keydown=on_keydown
			style="display: block; outline: none; cursor: default;"
		/>
	}
}
