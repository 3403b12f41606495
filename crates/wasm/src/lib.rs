//! Browser entry point: binds the frame controller to a `<canvas>`, the
//! window's resize and key events, canvas clicks and `requestAnimationFrame`.

mod canvas;
mod log;

use std::cell::RefCell;
use std::rc::Rc;

use easel_core::scene::{AnyScene, StartScene};
use easel_core::{EngineConfig, FrameController, Key, SetupError};
use easel_protocol::Viewport;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent, Window};

pub use canvas::CanvasSurface;
pub use log::ConsoleMakeWriter;

/// Id of the canvas element the engine draws into.
pub const CANVAS_ID: &str = "canvas";

struct Host {
    controller: FrameController,
    surface: CanvasSurface,
}

type SharedHost = Rc<RefCell<Host>>;

/// Start the engine on the page's canvas. `config_json` is an optional,
/// possibly partial, JSON engine config.
#[wasm_bindgen]
pub fn init_frame(config_json: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();

    let config = match config_json.as_deref() {
        Some(json) => EngineConfig::from_json(json)?,
        None => EngineConfig::default(),
    };
    log::init(if config.debug.enabled { "debug" } else { "info" });

    let window = web_sys::window().ok_or_else(|| SetupError::Host("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| SetupError::Host("no document".into()))?;
    let mut surface = CanvasSurface::from_document(&document, CANVAS_ID)?;
    surface
        .fill_viewport(&document)
        .map_err(|err| SetupError::Host(format!("could not style canvas: {err:?}")))?;

    let mut controller = FrameController::new(config)?;
    controller.resize_now(&mut surface, viewport_of(&window), window.device_pixel_ratio());
    controller.set_scene(AnyScene::Start(StartScene::new(config)));

    let host = Rc::new(RefCell::new(Host {
        controller,
        surface,
    }));
    listen_resize(&window, &host)?;
    listen_click(&host)?;
    listen_keydown(&window, &host)?;
    start_loop(&window, host)?;

    tracing::info!(canvas = CANVAS_ID, "frame initialized");
    Ok(())
}

fn viewport_of(window: &Window) -> Viewport {
    let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

fn listener_error(event: &str, err: &JsValue) -> SetupError {
    SetupError::Host(format!("could not listen for {event}: {err:?}"))
}

fn listen_resize(window: &Window, host: &SharedHost) -> Result<(), SetupError> {
    let host = Rc::clone(host);
    let win = window.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let Ok(mut host) = host.try_borrow_mut() else {
            return;
        };
        let request = host
            .controller
            .request_resize(viewport_of(&win), win.device_pixel_ratio());
        tracing::trace!(?request, "resize requested");
    });
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|err| listener_error("resize", &err))?;
    on_resize.forget();
    Ok(())
}

fn listen_click(host: &SharedHost) -> Result<(), SetupError> {
    let canvas = host.borrow().surface.canvas().clone();
    let host = Rc::clone(host);
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let Ok(mut host) = host.try_borrow_mut() else {
            tracing::warn!("click dropped: host busy");
            return;
        };
        // Client coordinates are CSS pixels, the frame's own unit.
        let bounds = host.surface.canvas().get_bounding_client_rect();
        let x = f64::from(ev.client_x()) - bounds.left();
        let y = f64::from(ev.client_y()) - bounds.top();
        let outcome = host.controller.click(x, y);
        tracing::trace!(x, y, ?outcome, "click");
    });
    canvas
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|err| listener_error("click", &err))?;
    on_click.forget();
    Ok(())
}

fn listen_keydown(window: &Window, host: &SharedHost) -> Result<(), SetupError> {
    let host = Rc::clone(host);
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        let Ok(mut host) = host.try_borrow_mut() else {
            tracing::warn!("key dropped: host busy");
            return;
        };
        let key = Key::from_dom(&ev.key());
        let outcome = host.controller.key_down(&key);
        tracing::trace!(?key, ?outcome, "keydown");
    });
    window
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
        .map_err(|err| listener_error("keydown", &err))?;
    on_key.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Tick once per animation frame, forever. The callback re-arms itself.
fn start_loop(window: &Window, host: SharedHost) -> Result<(), SetupError> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let rearm = Rc::clone(&callback);
    let win = window.clone();

    *callback.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        if let Ok(mut host) = host.try_borrow_mut() {
            let Host {
                controller,
                surface,
            } = &mut *host;
            controller.tick(surface);
        }
        if let Some(next) = rearm.borrow().as_ref()
            && let Err(err) = win.request_animation_frame(next.as_ref().unchecked_ref())
        {
            tracing::error!(?err, "requestAnimationFrame failed; render loop stopped");
        }
    }));

    let first = callback.borrow();
    let first = first
        .as_ref()
        .ok_or_else(|| SetupError::Host("render loop callback missing".into()))?;
    window
        .request_animation_frame(first.as_ref().unchecked_ref())
        .map_err(|err| listener_error("animation frames", &err))?;
    Ok(())
}
