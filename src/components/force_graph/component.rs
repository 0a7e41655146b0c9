use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::ev;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{CLICK_SLOP, ForceGraphState};
use super::types::{GraphData, Palette};

type StateCell = Rc<RefCell<Option<ForceGraphState>>>;

/// Size of the canvas: explicit props win, otherwise the parent's box.
fn measure(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Call `f` on every window resize until the current owner is cleaned up.
fn on_window_resize(f: impl Fn() + 'static) {
	let handle = window_event_listener(ev::resize, move |_| f());
	on_cleanup(move || handle.remove());
}

/// Run `frame` once per animation frame until `alive` is cleared.
fn run_animation(alive: Arc<AtomicBool>, mut frame: impl FnMut() + 'static) {
	let next: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let first = next.clone();
	*first.borrow_mut() = Some(Closure::new(move || {
		if !alive.load(Ordering::Relaxed) {
			// The closure holds `next`, so it has to drop itself
			let _ = next.borrow_mut().take();
			return;
		}
		frame();
		if let (Some(cb), Some(win)) = (&*next.borrow(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let (Some(cb), Some(win)) = (&*first.borrow(), web_sys::window()) {
		let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Force-directed canvas for the search graph.
///
/// Nodes appended to `data` join the running simulation; replacing the
/// node set restarts it. Clicking a node reports its id through
/// `on_select`, clicking the background reports `None`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] palette: Signal<Palette>,
	#[prop(optional, into)] on_select: Option<Callback<Option<String>>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: StateCell = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));

	let alive_cleanup = alive.clone();
	on_cleanup(move || alive_cleanup.store(false, Ordering::Relaxed));

	let state_palette = state.clone();
	Effect::new(move |_| {
		let palette = palette.get();
		if let Some(ref mut s) = *state_palette.borrow_mut() {
			s.palette = palette;
		}
	});

	let state_resize = state.clone();
	on_window_resize(move || {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (nw, nh) = measure(&canvas, width, height);
		canvas.set_width(nw as u32);
		canvas.set_height(nh as u32);
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			s.resize(nw, nh);
		}
	});

	let state_init = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		// Later runs only feed new data to the running simulation
		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.sync(&graph);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("canvas 2d context unavailable");
				return;
			}
		};

		let (w, h) = measure(&canvas, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let mut initial = ForceGraphState::new(&graph, w, h);
		initial.palette = palette.get_untracked();
		*state_init.borrow_mut() = Some(initial);

		let state_anim = state_init.clone();
		run_animation(alive.clone(), move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.moved = false;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			// Update hover state when not dragging
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				if (x - s.drag.start_x).hypot(y - s.drag.start_y) > CLICK_SLOP {
					s.drag.moved = true;
				}
				if let (Some(idx), true) = (s.drag.node_idx, s.drag.moved) {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				if (x - s.pan.start_x).hypot(y - s.pan.start_y) > CLICK_SLOP {
					s.pan.moved = true;
				}
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = {
			let mut guard = state_mu.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let clicked = if s.drag.active && !s.drag.moved {
				s.selected = s.drag.node_idx;
				Some(s.drag.node_idx.and_then(|idx| s.node_id(idx)))
			} else if s.pan.active && !s.pan.moved {
				s.selected = None;
				Some(None)
			} else {
				None
			};
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			clicked
		};
		if let (Some(selection), Some(cb)) = (clicked, on_select) {
			cb.run(selection);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	let state_dbl = state;
	let on_dblclick = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_dbl.borrow_mut() {
			s.fit_view();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:dblclick=on_dblclick
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	async fn next_frame() {
		let promise = js_sys::Promise::new(&mut |resolve, _| {
			if let Some(win) = web_sys::window() {
				let _ = win.request_animation_frame(&resolve);
			}
		});
		let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
	}

	fn dispatch_resize() {
		let window = web_sys::window().unwrap();
		let event = web_sys::Event::new("resize").unwrap();
		window.dispatch_event(&event).unwrap();
	}

	#[wasm_bindgen_test]
	fn resize_listener_goes_away_with_its_owner() {
		let hits = Rc::new(Cell::new(0));
		let owner = Owner::new();
		let counter = hits.clone();
		owner.with(|| on_window_resize(move || counter.set(counter.get() + 1)));

		dispatch_resize();
		assert_eq!(hits.get(), 1);

		owner.cleanup();
		dispatch_resize();
		assert_eq!(hits.get(), 1);
	}

	#[wasm_bindgen_test]
	async fn stopped_animation_frees_its_frame_closure() {
		let alive = Arc::new(AtomicBool::new(true));
		let frames = Rc::new(Cell::new(0u32));
		let counter = frames.clone();
		run_animation(alive.clone(), move || counter.set(counter.get() + 1));

		next_frame().await;
		next_frame().await;
		assert!(frames.get() > 0);

		alive.store(false, Ordering::Relaxed);
		next_frame().await;
		next_frame().await;
		let stopped_at = frames.get();
		next_frame().await;
		assert_eq!(frames.get(), stopped_at);
		assert_eq!(Rc::strong_count(&frames), 1);
	}
}
