//! Visual theming for the editor canvas.
//!
//! Node and edge colors come from the type table; the theme covers the
//! surroundings: background, grid, text, selection and interaction overlays.

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	/// Opacity in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Hex notation when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Named theme selectable from the editor configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum ThemeName {
	#[default]
	Dark,
	Light,
}

/// Complete visual theme for the canvas surroundings.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Value for the page's `data-theme` attribute.
	pub name: &'static str,
	/// Canvas fill behind everything.
	pub background: Color,
	/// Background grid dots.
	pub grid: Color,
	/// Node titles and edge handle labels.
	pub text: Color,
	/// Outline and edge color for the selected item.
	pub selection: Color,
	/// Fill of edge handles (the label disc at an edge midpoint).
	pub handle_fill: Color,
	/// Line drawn while the user is dragging out or reattaching an edge.
	pub pending_edge: Color,
	/// Tooltip box background.
	pub tooltip_fill: Color,
}

impl Theme {
	/// Dark canvas, light text (default)
	pub fn default_theme() -> Self {
		Self {
			name: "dark",
			background: Color::rgb(22, 27, 34),
			grid: Color::rgba(140, 160, 180, 0.25),
			text: Color::rgb(230, 236, 242),
			selection: Color::rgb(88, 166, 255),
			handle_fill: Color::rgb(48, 56, 66),
			pending_edge: Color::rgba(140, 160, 180, 0.8),
			tooltip_fill: Color::rgba(10, 12, 16, 0.9),
		}
	}

	/// Light canvas in the style of the classic digraph editor
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(249, 249, 249),
			grid: Color::rgba(0, 0, 0, 0.15),
			text: Color::rgb(33, 33, 33),
			selection: Color::rgb(0, 120, 212),
			handle_fill: Color::rgb(255, 255, 255),
			pending_edge: Color::rgba(0, 0, 0, 0.5),
			tooltip_fill: Color::rgba(33, 33, 33, 0.9),
		}
	}

	/// Theme selected in the configuration.
	pub fn by_name(name: ThemeName) -> Self {
		match name {
			ThemeName::Dark => Self::default_theme(),
			ThemeName::Light => Self::light(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_colors_render_as_hex() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn lighten_moves_towards_white() {
		let c = Color::rgb(100, 0, 200).lighten(0.5);
		assert_eq!((c.r, c.g, c.b), (177, 127, 227));
		assert_eq!(Color::rgb(10, 10, 10).lighten(1.0).to_css(), "#ffffff");
	}

	#[test]
	fn theme_lookup_by_name() {
		assert_eq!(Theme::by_name(ThemeName::Light).name, "light");
		assert_eq!(Theme::default().name, "dark");
	}
}
