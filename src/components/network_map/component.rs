use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{MapScene, NetworkMapState};
use crate::context::use_dashboard;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Spatial network drawn over country outlines and the visible articles.
/// Click a node to isolate it, click it again or the background to stop.
#[component]
pub fn NetworkMap() -> impl IntoView {
	let dash = use_dashboard();
	let canvas_ref = NodeRef::<Canvas>::new();
	let hovered = RwSignal::new(None::<String>);
	let state = Rc::new(RefCell::new(NetworkMapState::new(800.0, 600.0)));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));

	// Push every new snapshot of the stores into the canvas state.
	let state_scene = state.clone();
	Effect::new(move |_| {
		let (network, isolation, selected) = dash.network.with(|n| {
			(
				Arc::clone(n.filtered()),
				n.isolation().clone(),
				n.selected_node().map(str::to_string),
			)
		});
		let scene = MapScene {
			network,
			dataset: dash.map.with(|m| Arc::clone(m.dataset())),
			articles: dash.view.with(|v| Arc::clone(&v.items)),
			isolation,
			selected,
		};
		state_scene.borrow_mut().set_scene(scene);
	});

	let (state_init, animate_init, resize_init) = (state.clone(), animate.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("Canvas 2D context unavailable; network map disabled");
			return;
		};

		let (w, h) = fit_to_parent(&canvas);
		state_init.borrow_mut().resize(w, h);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = fit_to_parent(&canvas_resize);
			state_resize.borrow_mut().resize(nw, nh);
		}));
		if let Some(ref cb) = *resize_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = state_anim.borrow_mut();
				s.tick(0.016);
				render::render(&s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			state_md.borrow_mut().begin_pan(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let label = {
			let mut s = state_mm.borrow_mut();
			if s.pan.active {
				s.drag_pan(x, y);
			} else {
				let node = s.node_at_position(x, y);
				s.set_hover(node);
			}
			s.hover.node.and_then(|i| s.nodes.get(i)).map(|n| n.label.clone())
		};
		if hovered.with_untracked(|h| *h != label) {
			hovered.set(label);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let clicked = {
			let mut s = state_mu.borrow_mut();
			if !s.end_pan() {
				return;
			}
			pointer_position(canvas_ref, &ev)
				.and_then(|(x, y)| s.node_at_position(x, y))
				.and_then(|idx| s.node_id(idx).map(str::to_string))
		};
		dash.network.update(|n| match clicked {
			Some(id) => {
				n.toggle_isolation(&id);
				n.select_node(Some(id));
			}
			None => {
				n.disable_isolation();
				n.select_node(None);
			}
		});
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.end_pan();
		s.set_hover(None);
		hovered.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			state_wh.borrow_mut().zoom_at(x, y, factor);
		}
	};

	view! {
		<div class="network-map">
			<canvas
				node_ref=canvas_ref
				class="network-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || hovered.get().map(|label| view! { <div class="map-tooltip">{label}</div> })}
		</div>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Size the canvas to its parent, falling back to the window.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = match canvas.parent_element() {
		Some(p) if p.client_width() > 0 && p.client_height() > 0 => {
			(p.client_width() as f64, p.client_height() as f64)
		}
		_ => web_sys::window().map_or((800.0, 600.0), |win| window_size(&win)),
	};
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

fn window_size(win: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
	(dim(win.inner_width(), 800.0), dim(win.inner_height(), 600.0))
}

fn pointer_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
