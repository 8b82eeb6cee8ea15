//! digraph-editor: Interactive directed graph editor rendered on a canvas.
//!
//! This crate provides a WASM-based editor page: typed nodes and edges, drag
//! to move, shift-drag to connect, plus a bulk sample generator for
//! exercising the renderer with large graphs.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Pulled in only to enable its `js` feature for `rand` on wasm32.
use getrandom as _;

/// UI components.
pub mod components;

pub use components::graph_editor::{
	EditorConfig, GraphEditor, GraphError, GraphState, GraphView, Theme, sample,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-editor: logging initialized");
}

/// Text of the `<script>` element with the given id, if the page has one.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the starting graph from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], edges: [...] }
fn load_graph_data() -> Option<components::graph_editor::Graph> {
	let json_text = script_text("graph-data")?;

	match components::graph_editor::Graph::from_json(&json_text) {
		Ok(graph) => {
			info!(
				"graph-editor: loaded {} nodes, {} edges",
				graph.nodes.len(),
				graph.edges.len()
			);
			Some(graph)
		}
		Err(e) => {
			warn!("graph-editor: failed to load graph data: {}", e);
			None
		}
	}
}

/// Load editor settings from a script element with id="editor-config".
fn load_editor_config() -> EditorConfig {
	let Some(json_text) = script_text("editor-config") else {
		return EditorConfig::default();
	};

	EditorConfig::from_json(&json_text).unwrap_or_else(|e| {
		warn!("graph-editor: failed to parse editor config: {}", e);
		EditorConfig::default()
	})
}

/// Main application component.
/// Loads the graph and settings from the DOM, falling back to the sample graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_editor_config();
	let graph = load_graph_data().unwrap_or_else(sample::hand_authored);
	let theme_name = Theme::by_name(config.theme).name;

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme_name />
		<Title text="Digraph Editor" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<GraphEditor initial=graph config=config />
	}
}
