//! # Browser Host
//!
//! Two entry points:
//!
//! - [`mount_effects`]: the particle engine alone, on a page canvas.
//! - [`mount_page`]: a whole [`Page`](crate::Page), with section paging
//!   wired to the window's `wheel`, `keydown` and `scroll` events.
//!
//! Both drive their engines from `requestAnimationFrame`. A frame loop stops
//! on its own once its step reports nothing left to run, so tearing down
//! never races a pending frame. Dropping a handle tears it down.

mod canvas;
mod page;

use std::cell::RefCell;
use std::rc::Rc;

use folio_effects::{DeviceClass, EffectConfig, ParticleEngine};
use folio_ui::{SystemClock, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, Window};

pub use canvas::CanvasSurface;
pub use page::{mount_page, PageHandle};

type SharedEngine = Rc<RefCell<ParticleEngine<CanvasSurface, SystemClock>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type Listener = Closure<dyn FnMut(Event)>;

/// Installs the panic hook once the module loads.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Event listeners on one target, removed together.
struct ListenerSet {
    target: EventTarget,
    listeners: Vec<(&'static str, Listener)>,
}

impl ListenerSet {
    fn new(target: EventTarget) -> Self {
        Self {
            target,
            listeners: Vec::new(),
        }
    }

    fn add(&mut self, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
        let listener = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        self.target
            .add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.push((kind, listener));
        Ok(())
    }

    /// Adds a listener that may call `preventDefault`.
    fn add_active(&mut self, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
        let listener = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        self.target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            listener.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push((kind, listener));
        Ok(())
    }

    fn clear(&mut self) {
        for (kind, listener) in self.listeners.drain(..) {
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())
            {
                tracing::warn!("Could not remove {} listener: {:?}", kind, err);
            }
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}

/// A mounted effect. Dropping it tears it down.
#[wasm_bindgen]
pub struct EffectsHandle {
    engine: SharedEngine,
    listeners: ListenerSet,
}

#[wasm_bindgen]
impl EffectsHandle {
    /// Stops the frame loop and removes the resize listener.
    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.engine.borrow_mut().teardown();
    }

    /// Number of particles in the live pool.
    #[wasm_bindgen(getter)]
    pub fn pool_size(&self) -> usize {
        self.engine.borrow().pool_size()
    }
}

impl Drop for EffectsHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Starts the effect described by `config_json` on the canvas with id
/// `canvas_id`.
///
/// A missing canvas or unusable record mounts an effect that renders
/// nothing rather than failing.
///
/// # Errors
///
/// Fails only when there is no `window`.
#[wasm_bindgen]
pub fn mount_effects(canvas_id: &str, config_json: &str) -> Result<EffectsHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let mut engine = ParticleEngine::new(SystemClock::new(), None);
    if let Some(surface) = find_canvas(&window, canvas_id) {
        engine.attach_surface(surface);
    } else {
        tracing::warn!("Canvas #{} unavailable, effects disabled", canvas_id);
    }
    engine.set_device(DeviceClass::from_user_agent(&user_agent(&window)));

    let outcome = engine.start(EffectConfig::from_json_lossy(config_json), viewport_of(&window));
    tracing::debug!("Mounted effects: {:?}", outcome);
    let engine: SharedEngine = Rc::new(RefCell::new(engine));

    let mut listeners = ListenerSet::new(window.clone().into());
    {
        let engine = Rc::clone(&engine);
        let window = window.clone();
        listeners.add("resize", move |_| {
            engine.borrow_mut().resize(viewport_of(&window));
        })?;
    }

    if engine.borrow().is_running() {
        let engine = Rc::clone(&engine);
        start_frame_loop(&window, move || engine.borrow_mut().frame().should_continue())?;
    }

    Ok(EffectsHandle { engine, listeners })
}

fn find_canvas(window: &Window, canvas_id: &str) -> Option<CanvasSurface> {
    let canvas = window
        .document()?
        .get_element_by_id(canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    CanvasSurface::from_canvas(canvas).ok()
}

fn user_agent(window: &Window) -> String {
    window.navigator().user_agent().unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation)]
fn viewport_of(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(
        dimension(window.inner_width()) as f32,
        dimension(window.inner_height()) as f32,
    )
}

/// Requests frames until `step` returns false, then drops the callback.
fn start_frame_loop(window: &Window, mut step: impl FnMut() -> bool + 'static) -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);
    let loop_window = window.clone();

    *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if !step() {
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(frame) = next.borrow().as_ref() {
            if loop_window
                .request_animation_frame(frame.as_ref().unchecked_ref())
                .is_err()
            {
                tracing::warn!("requestAnimationFrame refused, frame loop stopped");
            }
        }
    })));

    if let Some(frame) = callback.borrow().as_ref() {
        window.request_animation_frame(frame.as_ref().unchecked_ref())?;
    }
    Ok(())
}
