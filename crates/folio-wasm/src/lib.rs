//! WASM bridge for Folio: mounts animation widgets on HTML canvases.
//!
//! Compiled via `wasm-pack build --target web`. Every method reports
//! failure as a console log plus a `false`/JSON result; nothing throws.

mod canvas2d;
mod host;
mod logger;

use canvas2d::Canvas2dRenderer;
use folio_core::{
    AnimationComponent, FolioConfig, LifecycleState, MountEnv, ResizeOutcome, Simulation, WidgetConfig,
    WidgetId, WidgetSim,
};
use folio_render::Theme;
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use host::{FrameSlot, RafScheduler};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

type Component = AnimationComponent<WidgetSim, Canvas2dRenderer>;

/// Mutable widget state shared with the frame and DOM callbacks.
struct Inner {
    component: Component,
    scheduler: RafScheduler,
    window: Window,
    resize_debounce_ms: u32,
    /// Listeners and the resize timer live exactly as long as the mount.
    listeners: Vec<EventListener>,
    resize_timer: Option<Timeout>,
}

impl Inner {
    fn apply_resize(&mut self) -> ResizeOutcome {
        let measure = host::measure(&self.window, self.component.renderer().canvas());
        let outcome = self.component.resize(measure);
        log::trace!("{} resize: {outcome:?}", self.component.id());
        outcome
    }

    fn detach(&mut self) {
        self.listeners.clear();
        self.resize_timer = None;
    }
}

/// One animated widget bound to a `<canvas>` element.
#[wasm_bindgen]
pub struct FolioWidget {
    inner: Rc<RefCell<Inner>>,
    /// Kept so the frame callback outlives every pending request.
    _frame: FrameSlot,
}

#[wasm_bindgen]
impl FolioWidget {
    /// Create a widget for `canvas_id` from a JSON config. Returns
    /// `undefined` (and logs why) when the canvas or config is invalid.
    pub fn new(canvas_id: &str, config_json: &str) -> Option<FolioWidget> {
        logger::init(log::Level::Info);

        let config = match FolioConfig::from_json(config_json) {
            Ok(config) => config,
            Err(e) => {
                log::error!("#{canvas_id}: {e}");
                return None;
            }
        };
        let window = web_sys::window()?;
        let canvas = window
            .document()?
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            log::error!("#{canvas_id} is not a canvas element");
            return None;
        };
        let sim = match WidgetSim::from_config(&config.widget) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("#{canvas_id}: {e}");
                return None;
            }
        };

        let component = AnimationComponent::new(
            WidgetId::intern(canvas_id),
            sim,
            Canvas2dRenderer::new(canvas, Theme::light()),
            &config.animation,
        );
        let frame: FrameSlot = Rc::new(RefCell::new(None));
        let inner = Rc::new(RefCell::new(Inner {
            component,
            scheduler: RafScheduler::new(window.clone(), frame.clone()),
            window,
            resize_debounce_ms: config.animation.resize_debounce_ms,
            listeners: Vec::new(),
            resize_timer: None,
        }));

        let weak = Rc::downgrade(&inner);
        *frame.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
            if let Some(inner) = weak.upgrade() {
                let mut guard = inner.borrow_mut();
                let Inner {
                    component,
                    scheduler,
                    ..
                } = &mut *guard;
                component.on_frame(now_ms, scheduler);
            }
        }));

        log::debug!("#{canvas_id}: created {} widget", config.widget.kind());
        Some(Self {
            inner,
            _frame: frame,
        })
    }

    /// Start animating. Returns `false` if already mounted.
    pub fn mount(&self) -> bool {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let window = inner.window.clone();
        let env = MountEnv {
            measure: Some(host::measure(&window, inner.component.renderer().canvas())),
            reduced_motion: host::prefers_reduced_motion(&window),
            pointer: inner
                .component
                .simulation()
                .wants_pointer()
                .then(|| host::shared_pointer(&window)),
        };

        match inner.component.mount(env, &mut inner.scheduler) {
            Ok(state) => log::debug!("{} mounted: {state:?}", inner.component.id()),
            Err(e) => {
                log::warn!("{}: {e}", inner.component.id());
                return false;
            }
        }
        inner.listeners = attach_listeners(&window, &self.inner);
        true
    }

    /// Stop animating and detach every listener. Safe to call repeatedly.
    pub fn unmount(&self) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.component.unmount(&mut inner.scheduler);
        inner.detach();
    }

    /// Re-measure the container now. Returns `false` while it has no area.
    pub fn resize(&self) -> bool {
        let outcome = self.inner.borrow_mut().apply_resize();
        !matches!(outcome, ResizeOutcome::Deferred)
    }

    /// Switch palettes and repaint the current frame.
    pub fn set_theme(&self, is_dark: bool) {
        let mut inner = self.inner.borrow_mut();
        inner
            .component
            .renderer_mut()
            .set_theme(Theme::for_mode(is_dark));
        inner.component.repaint();
    }

    /// `"unmounted"`, `"running"` or `"static"`.
    pub fn lifecycle(&self) -> String {
        match self.inner.borrow().component.lifecycle() {
            LifecycleState::Unmounted => "unmounted",
            LifecycleState::Running => "running",
            LifecycleState::Static => "static",
        }
        .to_string()
    }

    /// Current simulation state as JSON, or `null` when unmounted.
    pub fn state_json(&self) -> String {
        let inner = self.inner.borrow();
        serde_json::to_string(&inner.component.state()).unwrap_or_else(|e| {
            log::warn!("state serialization failed: {e}");
            "null".to_string()
        })
    }
}

impl Drop for FolioWidget {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.inner.try_borrow_mut() {
            let inner = &mut *guard;
            inner.component.unmount(&mut inner.scheduler);
            inner.detach();
        }
    }
}

/// Window resize and page visibility listeners for one mounted widget.
fn attach_listeners(window: &Window, inner: &Rc<RefCell<Inner>>) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let weak = Rc::downgrade(inner);
    listeners.push(EventListener::new(window, "resize", move |_| on_resize(&weak)));

    if let Some(document) = window.document() {
        let weak = Rc::downgrade(inner);
        let doc = document.clone();
        listeners.push(EventListener::new(&document, "visibilitychange", move |_| {
            if let Some(inner) = weak.upgrade() {
                let mut guard = inner.borrow_mut();
                let inner = &mut *guard;
                inner.component.set_visible(!doc.hidden(), &mut inner.scheduler);
            }
        }));
    }
    listeners
}

/// Trailing-edge debounce: each signal replaces the pending timeout, and
/// dropping the old one clears it.
fn on_resize(weak: &Weak<RefCell<Inner>>) {
    let Some(rc) = weak.upgrade() else {
        return;
    };
    let mut inner = rc.borrow_mut();
    if inner.resize_debounce_ms == 0 {
        inner.apply_resize();
        return;
    }
    let weak = weak.clone();
    let timer = Timeout::new(inner.resize_debounce_ms, move || {
        // the fired timeout stays stored until the next signal replaces it
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().apply_resize();
        }
    });
    inner.resize_timer = Some(timer);
}

// ─── Standalone functions (no canvas needed) ─────────────────────────────

/// Validate a widget config. Returns JSON: `{"ok":true,"kind":"..."}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    let result = match FolioConfig::from_json(json) {
        Ok(config) => serde_json::json!({ "ok": true, "kind": config.widget.kind().name() }),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
    };
    result.to_string()
}

/// Default config for a widget kind as JSON, or `{"ok":false,...}`.
#[wasm_bindgen]
pub fn default_config(kind: &str) -> String {
    match kind.parse() {
        Ok(kind) => {
            let config = FolioConfig::new(WidgetConfig::default_for(kind));
            serde_json::to_string(&config)
                .unwrap_or_else(|e| serde_json::json!({ "ok": false, "error": e.to_string() }).to_string())
        }
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn validate_reports_kind() {
        assert_eq!(
            parse(&validate_config(r#"{"widget":{"kind":"orbit"}}"#)),
            serde_json::json!({ "ok": true, "kind": "orbit" })
        );
    }

    #[test]
    fn validate_reports_errors_as_json() {
        let out = parse(&validate_config(
            r#"{"widget":{"kind":"pong","winning_score":0}}"#,
        ));
        assert_eq!(out["ok"], false);
        assert_eq!(
            out["error"],
            "invalid value for `winning_score`: must be at least 1"
        );
    }

    #[test]
    fn oversized_resize_debounce_is_rejected() {
        let out = parse(&validate_config(
            r#"{"animation":{"resize_debounce_ms":4294967295},"widget":{"kind":"gaze"}}"#,
        ));
        assert_eq!(out["ok"], false);
    }

    #[test]
    fn default_config_round_trips() {
        let json = default_config("clouds");
        assert_eq!(parse(&validate_config(&json))["kind"], "clouds");
        assert_eq!(parse(&default_config("tetris"))["ok"], false);
    }
}
