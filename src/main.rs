//! Hole Rush entry point
//!
//! On the web, the page's WebXR engine drives the game through the exported
//! `hole_rush_*` functions. Natively, a scripted headless session is played.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use glam::{Vec2, Vec3};
    use wasm_bindgen::prelude::*;
    use web_sys::{MouseEvent, TouchEvent};

    use hole_rush::frontend::dom::DomPresenter;
    use hole_rush::platform::{PermissionState, SupportCheck};
    use hole_rush::{Game, Settings};

    /// Game plus the presenter bound to this page
    struct Runtime {
        game: Game,
        presenter: DomPresenter,
    }

    thread_local! {
        static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
    }

    /// Run `f` on the page runtime.
    ///
    /// Returns None before `run` and when called re-entrantly from a JS hook
    /// that fires while a frame is being presented.
    fn with_runtime<T>(f: impl FnOnce(&mut Runtime) -> T) -> Option<T> {
        RUNTIME.with(|rt| match rt.try_borrow_mut() {
            Ok(mut rt) => rt.as_mut().map(f),
            Err(_) => {
                log::warn!("Hole Rush re-entered from a hook, call ignored");
                None
            }
        })
    }

    /// Apply a lifecycle notification, then push the new phase to the page
    fn with_lifecycle<T>(f: impl FnOnce(&mut hole_rush::Game) -> T) -> Option<T> {
        with_runtime(|rt| {
            let out = f(&mut rt.game);
            rt.game.sync_presenter(&mut rt.presenter);
            out
        })
    }

    fn to_js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Hole Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        settings.save();
        let mut presenter = DomPresenter::new(&document, settings.joystick_max_radius);
        let mut game = Game::new(settings);
        game.sync_presenter(&mut presenter);

        RUNTIME.with(|rt| *rt.borrow_mut() = Some(Runtime { game, presenter }));
        setup_input_handlers(&document);

        log::info!("Hole Rush ready, waiting for host");
    }

    /// Pointer position of a mouse event
    fn mouse_point(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    /// First touch of a touch event, if it carries one
    fn touch_point(event: &TouchEvent) -> Option<Vec2> {
        let touches = event.touches();
        let points: Vec<Vec2> = (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
            .collect();
        hole_rush::platform::first_point(&points)
    }

    fn setup_input_handlers(document: &web_sys::Document) {
        let window = web_sys::window().expect("no window");
        let Some(container) = document.get_element_by_id("joystick-container") else {
            log::warn!("No #joystick-container, joystick disabled");
            return;
        };

        // Drag start on the joystick
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                with_runtime(|rt| rt.game.on_pointer_down(mouse_point(&event)));
            });
            let _ = container
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                // Missing touch point: drop the event
                if let Some(point) = touch_point(&event) {
                    with_runtime(|rt| rt.game.on_pointer_down(point));
                }
            });
            let _ = container
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drag move anywhere on the page
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                with_runtime(|rt| rt.game.on_pointer_move(mouse_point(&event)));
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(point) = touch_point(&event) {
                    with_runtime(|rt| rt.game.on_pointer_move(point));
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drag end
        for name in ["mouseup", "touchend", "touchcancel"] {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                with_runtime(|rt| rt.game.on_pointer_up());
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Motion permission result: "granted", "denied", "failed" or "not-required"
    #[wasm_bindgen]
    pub fn hole_rush_permission(result: &str) -> Result<(), JsValue> {
        let permission = PermissionState::from_str(result)
            .ok_or_else(|| JsValue::from_str("unknown permission result"))?;
        with_lifecycle(|game| game.on_permission(permission))
            .unwrap_or(Ok(()))
            .map_err(to_js_err)
    }

    /// AR support result: "supported", "no-xr", "unsupported" or "failed"
    #[wasm_bindgen]
    pub fn hole_rush_support_checked(result: &str) -> Result<(), JsValue> {
        let check = SupportCheck::from_str(result)
            .ok_or_else(|| JsValue::from_str("unknown support result"))?;
        with_lifecycle(|game| game.on_support_checked(check))
            .unwrap_or(Ok(()))
            .map_err(to_js_err)
    }

    /// Start button pressed; throws if the session cannot start
    #[wasm_bindgen]
    pub fn hole_rush_request_start() -> Result<(), JsValue> {
        with_lifecycle(|game| game.start_session())
            .unwrap_or(Ok(()))
            .map_err(to_js_err)
    }

    #[wasm_bindgen]
    pub fn hole_rush_session_started() -> bool {
        let seed = js_sys::Date::now() as u64;
        with_lifecycle(|game| game.on_session_started(seed)).unwrap_or(false)
    }

    /// Session start failed; returns the message to alert once
    #[wasm_bindgen]
    pub fn hole_rush_session_failed(message: &str) -> String {
        with_lifecycle(|game| game.on_session_start_failed(message).to_string())
            .unwrap_or_else(|| message.to_string())
    }

    #[wasm_bindgen]
    pub fn hole_rush_session_ended() {
        with_lifecycle(|game| game.end_session());
    }

    /// Hit-test result from the AR runtime; only the first one anchors
    #[wasm_bindgen]
    pub fn hole_rush_surface_found(x: f32, y: f32, z: f32) -> bool {
        with_runtime(|rt| rt.game.on_surface_found(Vec3::new(x, y, z))).unwrap_or(false)
    }

    /// Register `hook(targetsJson, collectorJson)` for draw-time sync
    #[wasm_bindgen]
    pub fn hole_rush_set_render_hook(hook: js_sys::Function) {
        with_runtime(|rt| rt.presenter.set_render_hook(hook));
    }

    /// Register `hook(x, y, z)` called when the hole is first placed
    #[wasm_bindgen]
    pub fn hole_rush_set_anchor_hook(hook: js_sys::Function) {
        with_runtime(|rt| rt.presenter.set_anchor_hook(hook));
    }

    /// Advance one frame (call from the XR animation loop)
    #[wasm_bindgen]
    pub fn hole_rush_frame() {
        with_runtime(|rt| rt.game.frame(&mut rt.presenter));
    }

    #[wasm_bindgen]
    pub fn hole_rush_state_json() -> Result<String, JsValue> {
        with_runtime(|rt| rt.game.snapshot_json().map_err(to_js_err))
            .unwrap_or_else(|| Ok(String::from("null")))
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), hole_rush::SessionError> {
    use glam::{Vec2, Vec3};
    use hole_rush::frontend::LogPresenter;
    use hole_rush::platform::{PermissionState, SupportCheck};
    use hole_rush::{Game, Settings};

    /// Demo length (one minute at 60 fps)
    const DEMO_FRAMES: u32 = 3600;
    /// Frames before the simulated hit-test finds the floor
    const SURFACE_DELAY: u32 = 30;

    env_logger::init();
    log::info!("Hole Rush (native) starting...");
    log::info!("Native mode plays a scripted headless session");

    let settings = Settings::load();
    let settings = match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            log::warn!("Invalid settings ({}), using defaults", e);
            Settings::default()
        }
    };
    let joystick_radius = settings.joystick_max_radius;
    let signs = settings.axis_signs;

    let mut game = Game::new(settings);
    game.on_permission(PermissionState::NotRequired)?;
    game.on_support_checked(SupportCheck::Supported)?;
    game.start_session()?;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    game.on_session_started(seed);

    let mut presenter = LogPresenter::new();
    let mut dragging = false;

    for frame in 0..DEMO_FRAMES {
        if frame == SURFACE_DELAY {
            game.on_surface_found(Vec3::new(0.0, -1.4, -1.5));
        }

        // Steer toward the nearest target like a player dragging the knob
        let heading = game.state().and_then(|state| {
            let hole = state.collector()?.pos;
            state
                .targets
                .iter()
                .map(|t| t.pos - hole)
                .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        });

        match heading {
            Some(delta) => {
                let dir = Vec2::new(delta.x * signs.x, delta.z * signs.z).normalize_or_zero();
                if !dragging {
                    game.on_pointer_down(Vec2::ZERO);
                    dragging = true;
                }
                game.on_pointer_move(dir * joystick_radius);
            }
            None if dragging => {
                game.on_pointer_up();
                dragging = false;
            }
            None => {}
        }

        game.frame(&mut presenter);
    }

    game.end_session();
    game.frame(&mut presenter);
    log::info!(
        "Demo finished after {} frames: {}",
        presenter.frames,
        presenter.score_text()
    );
    println!("{}", presenter.score_text());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
