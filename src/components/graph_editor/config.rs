//! Editor configuration.
//!
//! Every field has a default, so a page may embed a partial JSON document
//! (camelCase keys) to override only what it needs.

use serde::{Deserialize, Serialize};

use super::error::GraphError;
use super::sample::GridLayout;
use super::theme::ThemeName;

/// How the renderer positions nodes for display. Stored positions are never
/// rewritten by a layout engine; only dragging does that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutEngine {
	/// Draw nodes where they are.
	#[default]
	None,
	/// Round positions to the background grid.
	SnapToGrid,
	/// Settle positions with a short force simulation.
	ForceDirected,
}

/// Tunables for the editor and its renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
	/// Snap size for positions reported after a drag. Values <= 0 disable snapping.
	pub grid_size: f64,
	/// Spacing of the background dot grid and of the snap-to-grid layout.
	pub grid_spacing: f64,
	/// Display layout applied to stored positions.
	pub layout_engine: LayoutEngine,
	/// Chance that a node created on the canvas is `special`.
	pub special_node_ratio: f64,
	/// Nodes per row in a generated sample.
	pub nodes_per_row: usize,
	/// Distance between generated nodes, both axes.
	pub sample_spacing: f64,
	/// Canvas theme.
	pub theme: ThemeName,
	/// Zoom bounds for the wheel and for fitting.
	pub min_zoom: f64,
	/// See `min_zoom`.
	pub max_zoom: f64,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			grid_size: 1.0,
			grid_spacing: 36.0,
			layout_engine: LayoutEngine::None,
			special_node_ratio: 0.25,
			nodes_per_row: 20,
			sample_spacing: 200.0,
			theme: ThemeName::Dark,
			min_zoom: 0.15,
			max_zoom: 1.5,
		}
	}
}

impl EditorConfig {
	/// Parses a configuration; absent fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Grid parameters for the bulk sample generator.
	pub fn sample_layout(&self) -> GridLayout {
		GridLayout {
			per_row: self.nodes_per_row.max(1),
			spacing: self.sample_spacing,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn partial_documents_keep_defaults() {
		let config =
			EditorConfig::from_json(r#"{"layoutEngine":"forceDirected","theme":"light"}"#).unwrap();
		assert_eq!(config.layout_engine, LayoutEngine::ForceDirected);
		assert_eq!(config.theme, ThemeName::Light);
		assert_eq!(config.special_node_ratio, 0.25);
		assert_eq!(config.nodes_per_row, 20);
	}

	#[test]
	fn empty_document_is_the_default() {
		assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
	}

	#[test]
	fn rejects_unknown_layout_engine() {
		assert!(EditorConfig::from_json(r#"{"layoutEngine":"radial"}"#).is_err());
	}

	#[test]
	fn sample_layout_never_has_zero_columns() {
		let config = EditorConfig {
			nodes_per_row: 0,
			..EditorConfig::default()
		};
		assert_eq!(config.sample_layout().per_row, 1);
	}
}
