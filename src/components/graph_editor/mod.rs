//! Directed graph editor.
//!
//! A canvas-rendered editor for directed graphs with typed nodes and edges:
//! - [`GraphState`] owns the canonical graph, the selection and the desired
//!   size of generated samples, and applies every edit synchronously
//! - [`GraphView`] draws the graph and reports user gestures through
//!   [`GraphCallbacks`], never mutating the graph itself
//! - [`GraphEditor`] is the page tying the two together behind a small header
//!
//! # Example
//!
//! ```ignore
//! use digraph_editor::{EditorConfig, GraphEditor, sample};
//!
//! view! { <GraphEditor initial=sample::hand_authored() config=EditorConfig::default() /> }
//! ```

pub mod catalog;
mod component;
pub mod config;
mod editor;
pub mod error;
mod keys;
mod layout;
mod render;
pub mod sample;
mod scale;
pub mod state;
pub mod theme;
pub mod types;
mod view;

pub use catalog::{EdgeType, NodeSubtype, NodeType, TypeTable};
pub use component::{GraphCallbacks, GraphView};
pub use config::{EditorConfig, LayoutEngine};
pub use editor::GraphEditor;
pub use error::GraphError;
pub use keys::KeyGenerator;
pub use state::GraphState;
pub use theme::Theme;
pub use types::{Edge, Graph, Node, NodeKey, Selection};
pub use view::Gesture;
