//! Canvas rendering for the graph editor.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background and dot grid
//! 2. Edges, arrowheads and their label handles (world space)
//! 3. Subtype underlays, node shapes, then titles
//! 4. The in-progress edge line and, in screen space, the edge tooltip

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::catalog::{NodeStyle, Shape};
use super::scale::ScaledValues;
use super::theme::Theme;
use super::types::Selection;
use super::view::{Hit, Interaction, Scene, ViewState};

/// Below this on-screen spacing the dot grid is skipped.
const MIN_GRID_PIXELS: f64 = 8.0;

/// Everything one frame needs.
pub struct Frame<'a> {
	pub scene: &'a Scene<'a>,
	pub view: &'a ViewState,
	pub selected: &'a Selection,
	pub theme: &'a Theme,
	pub scale: &'a ScaledValues,
	pub width: f64,
	pub height: f64,
	pub grid_spacing: f64,
}

impl Frame<'_> {
	fn position(&self, index: usize) -> (f64, f64) {
		self.view.node_position(self.scene, index)
	}
}

/// Renders the complete graph to the canvas.
pub fn render(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let t = &frame.view.transform;

	ctx.set_fill_style_str(&frame.theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, frame.width, frame.height);

	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);

	draw_grid(frame, ctx);
	draw_edges(frame, ctx);
	draw_nodes(frame, ctx);
	draw_pending_edge(frame, ctx);

	ctx.restore();

	draw_tooltip(frame, ctx);
}

fn draw_grid(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let spacing = frame.grid_spacing;
	let t = &frame.view.transform;
	if spacing <= 0.0 || spacing * t.k < MIN_GRID_PIXELS {
		return;
	}

	let (x0, y0) = t.screen_to_graph(0.0, 0.0);
	let (x1, y1) = t.screen_to_graph(frame.width, frame.height);
	let dot = 1.5 / t.k;

	ctx.set_fill_style_str(&frame.theme.grid.to_css());
	let mut y = (y0 / spacing).floor() * spacing;
	while y <= y1 {
		let mut x = (x0 / spacing).floor() * spacing;
		while x <= x1 {
			ctx.fill_rect(x - dot / 2.0, y - dot / 2.0, dot, dot);
			x += spacing;
		}
		y += spacing;
	}
}

fn set_dash(ctx: &CanvasRenderingContext2d, dashed: bool, k: f64) {
	if dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(8.0 / k.max(0.5)),
			&JsValue::from_f64(6.0 / k.max(0.5)),
		));
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_edges(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let scene = frame.scene;
	let scale = frame.scale;

	for edge in &scene.graph.edges {
		let Some(geom) = scene.edge_geometry_with(edge, |i| frame.position(i)) else {
			continue;
		};
		let style = scene.types.edge_style(edge.edge_type);
		let selected = frame.selected.is_edge(&edge.source, &edge.target);
		let color = if selected {
			frame.theme.selection
		} else {
			style.color
		};
		let (ux, uy) = geom.dir;
		let arrow = scale.arrow_size;

		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(style.width * scale.edge_width * if selected { 1.5 } else { 1.0 });
		set_dash(ctx, style.dashed, scale.k);
		ctx.begin_path();
		ctx.move_to(geom.start.0, geom.start.1);
		ctx.line_to(geom.tip.0 - ux * arrow, geom.tip.1 - uy * arrow);
		ctx.stroke();
		set_dash(ctx, false, scale.k);

		let (back_x, back_y) = (geom.tip.0 - ux * arrow, geom.tip.1 - uy * arrow);
		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
		ctx.set_fill_style_str(&color.to_css());
		ctx.begin_path();
		ctx.move_to(geom.tip.0, geom.tip.1);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(text) = &edge.handle_text {
			let (mx, my) = geom.mid;
			ctx.begin_path();
			let _ = ctx.arc(mx, my, style.handle_radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&frame.theme.handle_fill.to_css());
			ctx.fill();
			ctx.set_line_width(scale.edge_width);
			ctx.stroke();

			ctx.set_fill_style_str(&frame.theme.text.to_css());
			ctx.set_font(&scale.handle_font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(text, mx, my);
		}
	}
}

fn draw_nodes(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let scene = frame.scene;
	let types = scene.types;

	// Pass 1: subtype underlays
	for (i, node) in scene.graph.nodes.iter().enumerate() {
		if let Some(style) = node.subtype.and_then(|s| types.subtype_style(s)) {
			draw_shape(ctx, &style, frame.position(i), frame.scale.k);
		}
	}

	// Pass 2: shapes and selection outline
	for (i, node) in scene.graph.nodes.iter().enumerate() {
		let mut style = types.node_style(node.node_type);
		if frame.view.hovered == Hit::Node(i) {
			style.fill = style.fill.lighten(0.15);
		}
		let pos = frame.position(i);
		draw_shape(ctx, &style, pos, frame.scale.k);

		if frame.selected.is_node(node.key()) {
			trace_shape(ctx, style.shape, pos, style.width, style.height);
			ctx.set_stroke_style_str(&frame.theme.selection.to_css());
			ctx.set_line_width(frame.scale.selection_width);
			ctx.stroke();
		}
	}

	// Pass 3: titles on top
	ctx.set_font(&frame.scale.title_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for (i, node) in scene.graph.nodes.iter().enumerate() {
		if node.title.is_empty() {
			continue;
		}
		let style = types.node_style(node.node_type);
		let (x, y) = frame.position(i);
		ctx.set_fill_style_str(&style.stroke.to_css());
		let _ = ctx.fill_text(&node.title, x, y);
	}
}

fn draw_shape(ctx: &CanvasRenderingContext2d, style: &NodeStyle, (x, y): (f64, f64), k: f64) {
	trace_shape(ctx, style.shape, (x, y), style.width, style.height);
	ctx.set_fill_style_str(&style.fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&style.stroke.to_css());
	ctx.set_line_width(style.stroke_width.max(1.0 / k));
	ctx.stroke();

	if style.shape == Shape::Ring {
		ctx.begin_path();
		let _ = ctx.arc(x, y, style.width.min(style.height) * 0.3, 0.0, 2.0 * PI);
		ctx.stroke();
	}
}

/// Starts a new path outlining `shape` centered at `(x, y)`.
fn trace_shape(ctx: &CanvasRenderingContext2d, shape: Shape, (x, y): (f64, f64), w: f64, h: f64) {
	let (hw, hh) = (w / 2.0, h / 2.0);
	ctx.begin_path();
	match shape {
		Shape::Square | Shape::Bar => ctx.rect(x - hw, y - hh, w, h),
		Shape::Circle | Shape::Ring => {
			let _ = ctx.arc(x, y, hw.min(hh), 0.0, 2.0 * PI);
		}
		Shape::Hexagon => {
			ctx.move_to(x - hw, y);
			ctx.line_to(x - hw / 2.0, y - hh);
			ctx.line_to(x + hw / 2.0, y - hh);
			ctx.line_to(x + hw, y);
			ctx.line_to(x + hw / 2.0, y + hh);
			ctx.line_to(x - hw / 2.0, y + hh);
			ctx.close_path();
		}
	}
}

/// The line following the pointer while an edge is drawn out or reattached.
fn draw_pending_edge(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let scene = frame.scene;
	let (source, cursor) = match &frame.view.interaction {
		Interaction::Connecting { source, cursor } => (source, *cursor),
		Interaction::Reattaching {
			edge,
			cursor,
			moved: true,
		} => (&edge.source, *cursor),
		_ => return,
	};
	// The source may have been deleted mid-drag.
	let Some(from) = scene.index_of(source) else {
		return;
	};

	let (x, y) = frame.position(from);
	ctx.set_stroke_style_str(&frame.theme.pending_edge.to_css());
	ctx.set_line_width(frame.scale.edge_width * 2.0);
	set_dash(ctx, true, frame.scale.k);
	ctx.begin_path();
	ctx.move_to(x, y);
	ctx.line_to(cursor.0, cursor.1);
	ctx.stroke();
	set_dash(ctx, false, frame.scale.k);
}

/// Tooltip for the hovered edge, drawn in screen space so it stays legible.
fn draw_tooltip(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let (Hit::Edge(index) | Hit::EdgeHandle(index)) = frame.view.hovered else {
		return;
	};
	let scene = frame.scene;
	let Some(edge) = scene.graph.edges.get(index) else {
		return;
	};
	let Some(text) = edge.handle_tooltip_text.as_deref() else {
		return;
	};
	let Some(geom) = scene.edge_geometry_with(edge, |i| frame.position(i)) else {
		return;
	};

	let t = &frame.view.transform;
	let (sx, sy) = (geom.mid.0 * t.k + t.x, geom.mid.1 * t.k + t.y);
	let font_px = 12.0;
	let (w, h) = (text.chars().count() as f64 * font_px * 0.6 + 16.0, font_px + 12.0);
	let (bx, by) = (sx - w / 2.0, sy - h - 18.0);

	ctx.set_fill_style_str(&frame.theme.tooltip_fill.to_css());
	ctx.fill_rect(bx, by, w, h);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.95)");
	ctx.set_font(&format!("{font_px}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(text, sx, by + h / 2.0);
}
