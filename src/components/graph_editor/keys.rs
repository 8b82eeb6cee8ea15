//! Fresh identity keys for nodes created on the canvas.

use super::types::{Node, NodeKey};

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
	js_sys::Date::now() as u64
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_millis() as u64)
		.unwrap_or_default()
}

/// Hands out timestamp keys that are strictly increasing and never collide
/// with a numeric key already in the graph, even when several nodes are
/// created within the same millisecond.
#[derive(Clone, Debug)]
pub struct KeyGenerator {
	last: u64,
	clock: fn() -> u64,
}

impl KeyGenerator {
	/// Generator reading the wall clock.
	pub fn new() -> Self {
		Self::with_clock(now_millis)
	}

	/// Generator reading `clock` instead of the wall clock.
	pub fn with_clock(clock: fn() -> u64) -> Self {
		Self { last: 0, clock }
	}

	/// Next key for a node about to join `nodes`.
	pub fn next_key(&mut self, nodes: &[Node]) -> NodeKey {
		let mut candidate = (self.clock)().max(self.last.saturating_add(1));
		while nodes
			.iter()
			.any(|node| *node.key() == NodeKey::Number(candidate))
		{
			candidate += 1;
		}
		self.last = candidate;
		NodeKey::Number(candidate)
	}
}

impl Default for KeyGenerator {
	fn default() -> Self {
		Self::new()
	}
}
