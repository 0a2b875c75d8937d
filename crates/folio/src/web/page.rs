//! Section paging on the live document.
//!
//! The document is read once at mount into a [`PageTree`]: the body, every
//! marked section, and one extra node. That node stands in for whichever
//! nested scroll region the current wheel or key event started in; its
//! metrics are refreshed from the DOM right before the event is routed.

use std::cell::RefCell;
use std::rc::Rc;

use folio_effects::{EffectConfig, StartOutcome};
use folio_scroll::{LockTransition, NodeId, Overflow, PageTree, ScrollMetrics, TickState};
use folio_ui::{Key, SystemClock, WheelDelta};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, WheelEvent, Window};

use super::{find_canvas, start_frame_loop, user_agent, viewport_of, CanvasSurface, ListenerSet};
use crate::page::{HostEvent, Page};
use crate::settings::SiteSettings;

type SharedPage = Rc<RefCell<Page<CanvasSurface, SystemClock>>>;

/// A mounted page. Dropping it tears it down.
#[wasm_bindgen]
pub struct PageHandle {
    page: SharedPage,
    window: Window,
    listeners: ListenerSet,
}

#[wasm_bindgen]
impl PageHandle {
    /// Locks page scrolling while a modal is open.
    pub fn open_modal(&mut self) {
        let transition = self.page.borrow_mut().open_modal();
        apply_lock(&self.window, transition);
    }

    /// Releases the modal lock; the last release scrolls back.
    pub fn close_modal(&mut self) {
        let transition = self.page.borrow_mut().close_modal();
        apply_lock(&self.window, transition);
    }

    /// Animates to the section with `id`.
    pub fn jump_to_section(&mut self, id: &str) -> bool {
        self.page.borrow_mut().jump_to_section(id)
    }

    /// Animates to the top of the page.
    pub fn scroll_to_top(&mut self) -> bool {
        self.page.borrow_mut().scroll_to_top()
    }

    /// Switches the ambient effect. Returns true if the new one is running.
    pub fn set_effects(&mut self, config_json: &str) -> bool {
        let outcome = self
            .page
            .borrow_mut()
            .set_effect_config(EffectConfig::from_json_lossy(config_json));
        matches!(outcome, StartOutcome::Running { .. })
    }

    /// Whether the back-to-top control should show.
    #[wasm_bindgen(getter)]
    pub fn back_to_top_visible(&self) -> bool {
        self.page.borrow().back_to_top_visible()
    }

    /// Index of the current section.
    #[wasm_bindgen(getter)]
    pub fn current_section(&self) -> usize {
        self.page.borrow().snap().current_index()
    }

    /// Removes every listener and stops both engines. Safe to call any
    /// number of times.
    pub fn teardown(&mut self) {
        self.listeners.clear();
        self.page.borrow_mut().teardown();
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mounts a page: effects on the canvas with id `canvas_id`, section paging
/// over every element carrying the configured marker class.
///
/// A missing canvas only disables the effect.
///
/// # Errors
///
/// Fails when there is no `window` or `document`, or `settings_toml` does
/// not parse.
#[wasm_bindgen]
pub fn mount_page(canvas_id: &str, settings_toml: &str) -> Result<PageHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let mut settings =
        SiteSettings::from_toml_str(settings_toml).map_err(|err| JsValue::from_str(&err.to_string()))?;
    if settings.user_agent.is_none() {
        settings.user_agent = Some(user_agent(&window));
    }

    let (tree, slot) = read_document(&window, &settings.scroll.section_marker)?;
    let surface = find_canvas(&window, canvas_id);
    if surface.is_none() {
        tracing::warn!("Canvas #{} unavailable, effects disabled", canvas_id);
    }
    let mut page = Page::new(&settings, surface, tree, viewport_of(&window), SystemClock::new());
    page.handle(HostEvent::Scroll(scroll_y(&window)));
    tracing::info!("Mounted page with {} sections", page.snap().sections().len());
    let page: SharedPage = Rc::new(RefCell::new(page));

    let mut listeners = ListenerSet::new(window.clone().into());
    {
        let (page, window) = (Rc::clone(&page), window.clone());
        listeners.add_active("wheel", move |event: Event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            #[allow(clippy::cast_possible_truncation)]
            let delta = WheelDelta {
                dx: wheel.delta_x() as f32,
                dy: wheel.delta_y() as f32,
            };
            let origin = nearest_scrollable(&window, event.target().and_then(|t| t.dyn_into::<Element>().ok()));
            let outcome = {
                let mut page = page.borrow_mut();
                let target = place_nested(&mut page, slot, origin);
                page.handle(HostEvent::Wheel { delta, target })
            };
            if outcome.prevents_default() {
                event.prevent_default();
            }
        })?;
    }
    {
        let (page, window) = (Rc::clone(&page), window.clone());
        listeners.add_active("keydown", move |event: Event| {
            let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::from_dom(&keyboard.key());
            if key == Key::Other {
                return;
            }
            let origin = nearest_scrollable(&window, window.document().and_then(|d| d.active_element()));
            let outcome = {
                let mut page = page.borrow_mut();
                let focused = place_nested(&mut page, slot, origin);
                page.tree_mut().focus(focused);
                page.handle(HostEvent::Key(key))
            };
            if outcome.prevents_default() {
                event.prevent_default();
            }
        })?;
    }
    {
        let (page, window) = (Rc::clone(&page), window.clone());
        listeners.add("scroll", move |_| {
            if let Ok(mut page) = page.try_borrow_mut() {
                page.handle(HostEvent::Scroll(scroll_y(&window)));
            }
        })?;
    }
    {
        let (page, window) = (Rc::clone(&page), window.clone());
        listeners.add("resize", move |_| {
            page.borrow_mut().handle(HostEvent::Resize(viewport_of(&window)));
        })?;
    }

    {
        let (page, loop_window) = (Rc::clone(&page), window.clone());
        start_frame_loop(&window, move || {
            let (frame, attached) = {
                let mut page = page.borrow_mut();
                let frame = page.frame();
                (frame, page.snap().is_attached())
            };
            if attached && frame.scroll.state != TickState::Idle {
                loop_window.scroll_to_with_x_and_y(0.0, f64::from(frame.scroll.position));
            }
            attached
        })?;
    }

    Ok(PageHandle {
        page,
        window,
        listeners,
    })
}

/// Builds the tree from the live document. Returns it with the node that
/// stands in for nested scroll regions.
fn read_document(window: &Window, marker: &str) -> Result<(PageTree, NodeId), JsValue> {
    let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;
    let offset = f64::from(scroll_y(window));
    let mut tree = PageTree::new();
    let body = tree.add_root();

    let found = document.query_selector_all(&format!(".{marker}"))?;
    for i in 0..found.length() {
        let Some(element) = found.get(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let rect = element.get_bounding_client_rect();
        let id = match element.id() {
            id if id.is_empty() => format!("section-{i}"),
            id => id,
        };
        #[allow(clippy::cast_possible_truncation)]
        let (top, height) = ((rect.top() + offset) as f32, rect.height() as f32);
        tree.add_block(body, &id, &[marker], top, height);
    }

    let slot = tree.add_child(body);
    Ok((tree, slot))
}

/// Points the stand-in node at `metrics` and returns it, or `None` when the
/// event started outside any nested scroll region.
fn place_nested(
    page: &mut Page<CanvasSurface, SystemClock>,
    slot: NodeId,
    metrics: Option<ScrollMetrics>,
) -> Option<NodeId> {
    let metrics = metrics?;
    page.tree_mut().set_metrics(slot, metrics);
    Some(slot)
}

/// Metrics of the nearest element at or above `start` that scrolls on its
/// own. The search stops at `<body>`.
fn nearest_scrollable(window: &Window, start: Option<Element>) -> Option<ScrollMetrics> {
    let mut current = start;
    while let Some(element) = current {
        if matches!(element.tag_name().as_str(), "BODY" | "HTML") {
            return None;
        }
        let metrics = metrics_of(window, &element);
        if metrics.is_scrollable() {
            return Some(metrics);
        }
        current = element.parent_element();
    }
    None
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn metrics_of(window: &Window, element: &Element) -> ScrollMetrics {
    let overflow = window
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("overflow-y").ok())
        .map_or(Overflow::Visible, |value| Overflow::from_css(&value));
    ScrollMetrics {
        overflow,
        scroll_top: element.scroll_top() as f32,
        scroll_height: element.scroll_height() as f32,
        client_height: element.client_height() as f32,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scroll_y(window: &Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// Pins the body on the first lock and releases it on the last unlock.
fn apply_lock(window: &Window, transition: LockTransition) {
    let Some(body) = window.document().and_then(|d| d.body()) else {
        return;
    };
    let style = body.style();
    let applied = match transition {
        LockTransition::Locked { saved_offset } => style
            .set_property("position", "fixed")
            .and_then(|()| style.set_property("top", &format!("{}px", -saved_offset)))
            .and_then(|()| style.set_property("width", "100%")),
        LockTransition::Unlocked { restore_offset } => ["position", "top", "width"]
            .iter()
            .try_for_each(|&name| style.remove_property(name).map(drop))
            .map(|()| window.scroll_to_with_x_and_y(0.0, f64::from(restore_offset))),
        LockTransition::Nested { .. } | LockTransition::NotLocked => Ok(()),
    };
    if let Err(err) = applied {
        tracing::warn!("Scroll lock style not applied: {:?}", err);
    }
}
