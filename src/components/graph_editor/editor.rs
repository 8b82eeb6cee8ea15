//! Editor page: owns the [`GraphState`] and wires it to the canvas.

use leptos::prelude::*;
use log::info;
use web_sys::FocusEvent;

use super::component::{GraphCallbacks, GraphView};
use super::config::EditorConfig;
use super::state::GraphState;
use super::theme::Theme;
use super::types::{Edge, Graph, Node, NodeKey};

/// Header controls plus the editable canvas.
///
/// Every canvas callback maps onto exactly one [`GraphState`] operation; the
/// canvas redraws off the state's revision counter.
#[component]
pub fn GraphEditor(
	initial: Graph,
	#[prop(default = EditorConfig::default())] config: EditorConfig,
) -> impl IntoView {
	info!(
		"graph-editor: starting with {} nodes, {} edges",
		initial.nodes.len(),
		initial.edges.len()
	);
	let state = RwSignal::new(GraphState::from_config(initial, &config));
	let types = state.with_untracked(|s| s.types().clone());

	// Cloned only when nodes or edges change, not on selection changes.
	let graph_revision = Memo::new(move |_| state.with(GraphState::graph_revision));
	let graph = Memo::new(move |_| {
		graph_revision.track();
		state.with_untracked(|s| s.graph().clone())
	});
	let selected = Memo::new(move |_| state.with(|s| s.selected().clone()));
	let revision = Memo::new(move |_| state.with(GraphState::revision));
	let total_nodes = Memo::new(move |_| state.with(GraphState::total_nodes));

	let callbacks = GraphCallbacks {
		on_select_node: Callback::new(move |node: Option<Node>| state.update(|s| s.select_node(node))),
		on_select_edge: Callback::new(move |edge: Edge| state.update(|s| s.select_edge(edge))),
		on_create_node: Callback::new(move |(x, y): (f64, f64)| {
			state.update(|s| {
				s.create_node_at(x, y);
			})
		}),
		on_update_node: Callback::new(move |node: Node| state.update(|s| s.apply_node_update(node))),
		on_delete_node: Callback::new(move |(node, _key, remaining): (Node, NodeKey, Vec<Node>)| {
			state.update(|s| s.delete_node(&node, remaining))
		}),
		on_create_edge: Callback::new(move |(source, target): (Node, Node)| {
			state.update(|s| {
				s.create_edge(&source, &target);
			})
		}),
		on_swap_edge: Callback::new(move |(source, target, edge): (Node, Node, Edge)| {
			state.update(|s| s.swap_edge_endpoint(&source, &target, &edge))
		}),
		on_delete_edge: Callback::new(move |(edge, remaining): (Edge, Vec<Edge>)| {
			state.update(|s| s.delete_edge(&edge, remaining))
		}),
	};

	let add_node = move |_| {
		state.update(|s| {
			s.add_start_node();
		})
	};
	let delete_node = move |_| {
		state.update(|s| {
			s.remove_head_node();
		})
	};
	let on_total_blur = move |ev: FocusEvent| {
		let value = event_target_value(&ev);
		state.update(|s| {
			s.set_total_nodes(&value);
		});
	};

	view! {
		<div id="graph" class="graph-editor">
			<div class="graph-header">
				<button class="add-node" on:click=add_node>"Add Node"</button>
				<button class="delete-node" on:click=delete_node>"Delete Node"</button>
				<input
					class="total-nodes"
					type="number"
					min="0"
					placeholder=move || total_nodes.get().to_string()
					on:blur=on_total_blur
				/>
				<span class="graph-stats">
					{move || graph.with(|g| format!("{} nodes, {} edges", g.nodes.len(), g.edges.len()))}
				</span>
			</div>
			<div class="graph-canvas" style="position: relative; width: 100%; height: calc(100vh - 48px);">
				<GraphView
					graph=graph
					selected=selected
					revision=revision
					callbacks=callbacks
					types=types
					theme=Theme::by_name(config.theme)
					layout_engine=config.layout_engine
					grid_size=config.grid_size
					grid_spacing=config.grid_spacing
					min_zoom=config.min_zoom
					max_zoom=config.max_zoom
				/>
			</div>
		</div>
	}
}
