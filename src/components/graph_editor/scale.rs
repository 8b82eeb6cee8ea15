//! Zoom-dependent sizes for canvas overlays.
//!
//! Node shapes always scale with the view (they are world-space geometry from
//! the type table). Text, strokes, arrowheads and hit tolerances need a say in
//! how they react to zoom, which is what this module centralizes.
//!
//! - **World-space** values scale with zoom like the nodes do.
//! - **Screen-space** values stay the same pixel size at any zoom.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`, ready for drawing after the
	/// canvas transform has been applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Base sizes and their zoom behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleConfig {
	/// Node title font size in world units.
	pub title_size: f64,
	pub title_behavior: ScaleBehavior,
	/// Edge handle label font size in world units.
	pub handle_text_size: f64,
	/// Multiplier on the edge style's stroke width.
	pub edge_width: f64,
	pub edge_behavior: ScaleBehavior,
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Distance from an edge within which a click hits it, in screen pixels.
	pub edge_tolerance: f64,
	/// Selection outline width in screen pixels.
	pub selection_width: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			title_size: 14.0,
			title_behavior: ScaleBehavior::Clamped {
				min_screen: 8.0,
				max_screen: f64::INFINITY,
			},
			handle_text_size: 12.0,
			edge_width: 1.0,
			edge_behavior: ScaleBehavior::Clamped {
				min_screen: 1.0,
				max_screen: 4.0,
			},
			arrow_size: 12.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 6.0,
				max_screen: 24.0,
			},
			edge_tolerance: 6.0,
			selection_width: 3.0,
		}
	}
}

/// Scale values resolved for one zoom level.
///
/// Create this once per frame and pass it to rendering and hit-testing code.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledValues {
	pub k: f64,
	pub title_font: String,
	pub handle_font: String,
	pub edge_width: f64,
	pub arrow_size: f64,
	/// Edge hit tolerance in world units.
	pub edge_tolerance: f64,
	pub selection_width: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let title_size = config.title_behavior.apply(config.title_size, k);
		let handle_size = config.title_behavior.apply(config.handle_text_size, k);

		Self {
			k,
			title_font: format!("{title_size}px sans-serif"),
			handle_font: format!("{handle_size}px sans-serif"),
			edge_width: config.edge_behavior.apply(config.edge_width, k),
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			edge_tolerance: config.edge_tolerance / k,
			selection_width: config.selection_width / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_values_hold_their_screen_bounds() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 6.0,
			max_screen: 24.0,
		};
		// Zoomed far out the arrow would be 1.2px on screen; it is held at 6px.
		assert!((behavior.apply(12.0, 0.1) * 0.1 - 6.0).abs() < 1e-9);
		// Zoomed far in it would be 48px; it is held at 24px.
		assert!((behavior.apply(12.0, 4.0) * 4.0 - 24.0).abs() < 1e-9);
		assert_eq!(behavior.apply(12.0, 1.0), 12.0);
	}

	#[test]
	fn screen_values_counter_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(6.0, 2.0), 3.0);
		assert_eq!(ScaleBehavior::World.apply(6.0, 2.0), 6.0);
	}

	#[test]
	fn tolerance_is_constant_on_screen() {
		let config = ScaleConfig::default();
		let near = ScaledValues::new(&config, 2.0);
		let far = ScaledValues::new(&config, 0.5);
		assert_eq!(near.edge_tolerance * 2.0, far.edge_tolerance * 0.5);
		assert_eq!(near.title_font, "14px sans-serif");
	}
}
