use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::NetworkMapState;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &NetworkMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#10141f");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_outlines(state, ctx);
	draw_articles(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_outlines(state: &NetworkMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(160, 170, 190, 0.35)");
	ctx.set_line_width(0.8 / state.transform.k);
	for ring in &state.outlines {
		let Some((&(x0, y0), rest)) = ring.split_first() else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(x0, y0);
		for &(x, y) in rest {
			ctx.line_to(x, y);
		}
		ctx.close_path();
		ctx.stroke();
	}
}

fn draw_articles(state: &NetworkMapState, ctx: &CanvasRenderingContext2d) {
	let radius = 1.6 / state.transform.k.sqrt();
	ctx.set_fill_style_str("rgba(255, 200, 90, 0.55)");
	for &(x, y) in &state.articles {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_edges(state: &NetworkMapState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (dash, gap) = (6.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.highlight_t);

	for edge in &state.edges {
		let (Some(a), Some(b)) = (state.nodes.get(edge.source), state.nodes.get(edge.target)) else {
			continue;
		};
		let emphasized = state.is_emphasized(edge.source) && state.is_emphasized(edge.target);
		let touches_focus = state.is_focus(edge.source) || state.is_focus(edge.target);

		// t=0: every edge at 0.45; t=1: emphasized edges at 0.9, the rest at 0.08
		let (alpha, width) = if emphasized {
			(0.45 + 0.45 * t, edge.width * (1.0 + 0.4 * t) / k)
		} else {
			(0.45 - 0.37 * t, edge.width * (1.0 - 0.3 * t) / k)
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", alpha));
		ctx.set_line_width(width);
		if emphasized && touches_focus && t > 0.01 {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_nodes(state: &NetworkMapState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	// Background pass first so emphasized nodes land on top.
	for (idx, node) in state.nodes.iter().enumerate() {
		if has_highlight && state.is_emphasized(idx) {
			continue;
		}
		let radius = node.radius / k.sqrt();
		ctx.set_global_alpha(1.0 - 0.75 * t);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if state.is_selected(idx) {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("white");
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
	}

	if !has_highlight {
		return;
	}

	ctx.set_font(&font);
	for (idx, node) in state.nodes.iter().enumerate() {
		if !state.is_emphasized(idx) {
			continue;
		}
		let focus = state.is_focus(idx);
		let base = node.radius / k.sqrt();
		let (radius, glow_radius) = if focus {
			(base * (1.0 + 0.35 * t), base * (1.8 + 1.2 * t))
		} else {
			(base * (1.0 + 0.15 * t), 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(node.x, node.y, radius * 0.3, node.x, node.y, glow_radius) {
				let alpha = 0.35 * t;
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(node.x, node.y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();

		if focus || state.is_selected(idx) {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.4 + 0.4 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", 0.5 + 0.5 * t));
		let _ = ctx.fill_text(&node.label, node.x + radius + 3.0 / k, node.y + 3.0 / k);
	}
}
