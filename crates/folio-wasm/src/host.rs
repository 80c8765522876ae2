//! Browser glue: frame scheduling, DOM listeners, and the shared pointer.

use folio_core::{FrameHandle, FrameScheduler, PointerHub, PointerPosition, ScheduleError, SurfaceMeasure};
use gloo_events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// Slot holding the frame callback, filled once the widget exists.
pub type FrameSlot = Rc<RefCell<Option<FrameCallback>>>;

// ─── Frame scheduling ────────────────────────────────────────────────────

/// `requestAnimationFrame` behind the [`FrameScheduler`] seam.
pub struct RafScheduler {
    window: Window,
    callback: FrameSlot,
}

impl RafScheduler {
    pub fn new(window: Window, callback: FrameSlot) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, ScheduleError> {
        let slot = self.callback.borrow();
        let Some(cb) = slot.as_ref() else {
            return Err(ScheduleError("frame callback not installed".into()));
        };
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| ScheduleError(format!("{e:?}")))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {e:?}", handle.0);
        }
    }
}

// ─── Shared pointer ──────────────────────────────────────────────────────

struct PointerSource {
    hub: PointerHub,
    _listener: EventListener,
}

thread_local! {
    static POINTER: RefCell<Option<PointerSource>> = const { RefCell::new(None) };
}

/// The page-wide pointer hub. The first call installs the single window
/// `pointermove` listener that feeds it.
pub fn shared_pointer(window: &Window) -> PointerHub {
    POINTER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(source) = slot.as_ref() {
            return source.hub.clone();
        }
        let hub = PointerHub::new();
        let publisher = hub.clone();
        let view = window.clone();
        let listener = EventListener::new(window, "pointermove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (w, h) = viewport(&view);
            if let Some(pos) =
                PointerPosition::from_client(mouse.client_x() as f64, mouse.client_y() as f64, w, h)
            {
                publisher.publish(pos);
            }
        });
        log::debug!("pointer listener installed");
        *slot = Some(PointerSource {
            hub: hub.clone(),
            _listener: listener,
        });
        hub
    })
}

// ─── Measurement ─────────────────────────────────────────────────────────

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Measure the canvas's container in CSS pixels.
pub fn measure(window: &Window, canvas: &HtmlCanvasElement) -> SurfaceMeasure {
    let (w, h) = match canvas.parent_element() {
        Some(parent) => (parent.client_width(), parent.client_height()),
        None => (canvas.client_width(), canvas.client_height()),
    };
    SurfaceMeasure::new(w as f64, h as f64, window.device_pixel_ratio())
}

/// Whether the user asked the platform to minimize motion.
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches())
}
