//! Errors raised by strict graph operations and document loading.
//!
//! The editor itself treats absence as non-fatal; these errors surface only
//! through the `try_*` operations and when parsing embedded documents.

use thiserror::Error;

use super::types::NodeKey;

/// Failure of a strict graph operation or of loading a graph/config document.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The document is not valid JSON for the expected shape.
	#[error("failed to parse document: {0}")]
	Parse(#[from] serde_json::Error),
	/// Two nodes share one identity key.
	#[error("duplicate node key `{0}`")]
	DuplicateNode(NodeKey),
	/// An edge points at a node that does not exist.
	#[error("edge `{from}` -> `{to}` references missing node `{missing}`")]
	DanglingEdge {
		/// Edge source key.
		from: NodeKey,
		/// Edge target key.
		to: NodeKey,
		/// The endpoint that could not be resolved.
		missing: NodeKey,
	},
	/// An edge starts and ends on the same node.
	#[error("self-loop on node `{0}`")]
	SelfLoop(NodeKey),
	/// No node carries the requested key.
	#[error("no node with key `{0}`")]
	NodeNotFound(NodeKey),
	/// No edge runs between the requested endpoints.
	#[error("no edge `{from}` -> `{to}`")]
	EdgeNotFound {
		/// Requested source key.
		from: NodeKey,
		/// Requested target key.
		to: NodeKey,
	},
}
