//! Falling Shapes entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use falling_shapes::{FrameGate, Settings};
    use falling_shapes::renderer::{RenderState, Scene};
    use falling_shapes::sim::{
        Control, SimEvent, SimulationConfig, SimulationState, TickInput, apply_control,
        classify_click, reset, tick,
    };

    /// App instance holding all state
    struct App {
        state: SimulationState,
        scene: Scene,
        render_state: Option<RenderState>,
        input: TickInput,
        /// Stops the loop while the tab is hidden or the window unfocused
        gate: FrameGate,
    }

    impl App {
        fn new(settings: &Settings, seed: u64, width: f32, height: f32, focused: bool) -> Self {
            let config = SimulationConfig::from_settings(settings);
            let mut state = SimulationState::new(config, seed, width, height);
            state.publish_settings();
            state.refresh_stats();
            Self {
                state,
                scene: Scene::new(),
                render_state: None,
                input: TickInput::default(),
                gate: FrameGate::new(focused),
            }
        }

        /// Run one simulation tick
        fn update(&mut self, time: f64, delta: f32) {
            tick(&mut self.state, &mut self.scene, &mut self.input, time, delta);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.scene.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Push pending simulation notifications into the DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let set_text = |id: &str, text: String| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            };

            for event in self.state.drain_events() {
                match event {
                    SimEvent::StatsChanged(stats) => {
                        set_text("shape-count", stats.count.to_string());
                        set_text("total-area", stats.rounded_area().to_string());
                    }
                    SimEvent::SettingsChanged {
                        spawn_per_second,
                        gravity,
                    } => {
                        set_text("spawn-rate", spawn_per_second.to_string());
                        set_text("gravity", gravity.to_string());
                    }
                }
            }
        }

        /// Discard the simulation for a new canvas size
        fn resize(&mut self, physical: (u32, u32), logical: (f32, f32)) {
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(physical.0, physical.1, logical);
            }
            reset(&mut self.state, &mut self.scene, logical.0, logical.1);
        }
    }

    /// Canvas size as (physical pixels, CSS pixels)
    fn canvas_size(canvas: &HtmlCanvasElement) -> ((u32, u32), (f32, f32)) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let physical = (
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
        );
        (physical, (client_w as f32, client_h as f32))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Falling Shapes starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (physical, logical) = canvas_size(&canvas);
        canvas.set_width(physical.0);
        canvas.set_height(physical.1);

        let settings = Settings::load();
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        let focused = document.has_focus().unwrap_or(true);
        let app = Rc::new(RefCell::new(App::new(
            &settings, seed, logical.0, logical.1, focused,
        )));
        log::info!("Simulation initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, physical.0, physical.1, logical).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_pointer_handler(&canvas, app.clone());
        setup_controls(app.clone());
        setup_resize(&canvas, app.clone());
        setup_visibility(app.clone());
        setup_focus(app.clone());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(app);

        log::info!("Falling Shapes running!");
    }

    /// Clicks become one spawn or one remove request, applied next tick
    fn setup_pointer_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let mut a = app.borrow_mut();
            let point = glam::Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            let request = classify_click(&a.state, point);
            a.input.push(request);
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for control in Control::ALL {
            let Some(btn) = document.get_element_by_id(control.element_id()) else {
                log::warn!("Missing control button #{}", control.element_id());
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                apply_control(&mut a.state, control);
                a.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            let (physical, logical) = canvas_size(&canvas);
            canvas.set_width(physical.0);
            canvas.set_height(physical.1);
            app.borrow_mut().resize(physical, logical);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop the loop while hidden, restart without catch-up when visible
    fn setup_visibility(app: Rc<RefCell<App>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let visible = document_clone.visibility_state() != web_sys::VisibilityState::Hidden;
            log::info!("{}", if visible { "Tab visible" } else { "Paused (tab hidden)" });
            let restart = app.borrow_mut().gate.set_visible(visible);
            if restart {
                request_animation_frame(app.clone());
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Same pause/resume on window blur and focus
    fn setup_focus(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        let blur_app = app.clone();
        let blur = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            log::info!("Paused (window lost focus)");
            blur_app.borrow_mut().gate.set_focused(false);
        });
        let _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
        blur.forget();

        let focus = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            log::info!("Window focused");
            let restart = app.borrow_mut().gate.set_focused(true);
            if restart {
                request_animation_frame(app.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("focus", focus.as_ref().unchecked_ref());
        focus.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        app.borrow_mut().gate.mark_scheduled();
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let Some(delta) = a.gate.begin_frame(time) else {
                return;
            };
            a.update(time, delta);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Falling Shapes (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 for the web version");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate ten seconds at 60 Hz with a few clicks and print the stats
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use falling_shapes::consts::FRAME_MS;
    use falling_shapes::renderer::Scene;
    use falling_shapes::sim::{
        SimEvent, SimulationConfig, SimulationState, TickInput, classify_click, tick,
    };
    use falling_shapes::{Settings, frame_delta};
    use glam::Vec2;

    let settings = Settings::load();
    let seed = settings.seed_or(0x5EED);
    let mut state =
        SimulationState::new(SimulationConfig::from_settings(&settings), seed, 800.0, 600.0);
    let mut scene = Scene::new();
    let mut input = TickInput::default();

    let mut last = 0.0;
    for frame in 1..=600u32 {
        let now = frame as f64 * FRAME_MS;
        if frame % 120 == 0 {
            let request = classify_click(&state, Vec2::new(400.0, 200.0));
            input.push(request);
        }
        tick(&mut state, &mut scene, &mut input, now, frame_delta(last, now));
        last = now;
    }

    if let Some(SimEvent::StatsChanged(stats)) = state.drain_events().last().copied() {
        println!(
            "After 10s: {} shapes, total area {}, {} vertices on stage",
            stats.count,
            stats.rounded_area(),
            scene.vertices().len()
        );
    }
}
