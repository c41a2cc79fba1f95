use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::MindMapState;
use super::types::MindMapData;

const FRAME_DT: f64 = 0.016;
const BUTTON_ZOOM: f64 = 1.2;

type Shared<T> = Rc<RefCell<Option<T>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas: &NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Run `f` against the canvas state, if the canvas has been mounted.
fn with_state(state: &Shared<MindMapState>, f: impl FnOnce(&mut MindMapState)) {
	if let Some(ref mut s) = *state.borrow_mut() {
		f(s);
	}
}

/// Interactive mind map: drag nodes, pull edges out of the bottom handle,
/// drag the background to pan, scroll to zoom.
///
/// A new `data` value replaces the whole graph.
#[component]
pub fn MindMap(
	#[prop(into)] data: Signal<MindMapData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = true)] show_minimap: bool,
	#[prop(default = true)] show_controls: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<MindMapState> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("No window available, mind map disabled");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.filter(|w| *w > 0.0)
						.unwrap_or(800.0)
				}),
				height.unwrap_or(600.0),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				error!("Canvas has no 2d context");
				return;
			}
		};

		let mut initial = MindMapState::new(&data.get_untracked(), w, h, &mut rand::thread_rng());
		initial.show_minimap = show_minimap;
		*state_init.borrow_mut() = Some(initial);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				with_state(&state_resize, |s| s.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			with_state(&state_anim, |s| {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			});
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Later values of `data` are whole new graphs.
	let state_load = state.clone();
	Effect::new(move |prev: Option<()>| {
		let next = data.get();
		if prev.is_some() {
			with_state(&state_load, |s| s.load(&next, &mut rand::thread_rng()));
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(&canvas_ref, &ev) {
			with_state(&state_md, |s| s.pointer_down(x, y));
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(&canvas_ref, &ev) {
			with_state(&state_mm, |s| s.pointer_move(x, y));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(&canvas_ref, &ev) {
			with_state(&state_mu, |s| s.pointer_up(x, y));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| with_state(&state_ml, |s| s.pointer_leave());

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = local_point(&canvas_ref, &ev) {
			with_state(&state_wh, |s| s.wheel(x, y, ev.delta_y()));
		}
	};

	let (state_in, state_out, state_fit, state_layout) =
		(state.clone(), state.clone(), state.clone(), state.clone());

	view! {
		<div class="mind-map" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="mind-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{show_controls.then(move || view! {
				<div class="mind-map-controls">
					<button
						title="Zoom in"
						on:click=move |_| with_state(&state_in, |s| s.zoom_by(BUTTON_ZOOM))
					>
						"+"
					</button>
					<button
						title="Zoom out"
						on:click=move |_| with_state(&state_out, |s| s.zoom_by(1.0 / BUTTON_ZOOM))
					>
						"−"
					</button>
					<button
						title="Fit view"
						on:click=move |_| with_state(&state_fit, |s| s.fit_view())
					>
						"Fit"
					</button>
				</div>
				<button
					class="mind-map-layout"
					on:click=move |_| {
						debug!("Auto layout requested");
						with_state(&state_layout, |s| s.auto_layout());
					}
				>
					"Auto Layout"
				</button>
			})}
		</div>
	}
}
