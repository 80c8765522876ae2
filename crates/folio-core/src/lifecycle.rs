//! Lifecycle manager: one frame-driven animation component.
//!
//! An [`AnimationComponent`] composes a [`Simulation`] (update rule) with a
//! [`Renderer`] (paint rule) and drives them from host frame callbacks. The
//! host owns the actual callback mechanism and hands in a [`FrameScheduler`]
//! on every call that may schedule or cancel.
//!
//! ```text
//! Unmounted ──mount──▶ Running ──(frames)──▶ Running
//!     ▲     └─mount(reduced motion)─▶ Static     │
//!     └──────────────── unmount ◀────────────────┘
//! ```

use crate::clock::FrameClock;
use crate::config::AnimationConfig;
use crate::error::{LifecycleError, RenderError, ScheduleError};
use crate::id::WidgetId;
use crate::pointer::{PointerHub, PointerSubscription};
use crate::sim::{FrameInput, Simulation};
use crate::surface::{ResizeOutcome, SurfaceDescriptor, SurfaceMeasure, SurfaceOwner};

/// Host-issued identifier for a pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host frame-callback mechanism (`requestAnimationFrame` in the browser).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, ScheduleError>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Paints a state onto an owned surface. Never mutates the state.
pub trait Renderer<S> {
    /// Resize the backing store and reapply the CSS-pixel scale transform.
    fn configure(&mut self, surface: &SurfaceDescriptor) -> Result<(), RenderError>;

    /// Fully repaint the surface from `state`.
    fn render(&mut self, state: &S, surface: &SurfaceDescriptor) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    Running,
    Static,
}

/// Everything the host knows at mount time.
#[derive(Clone, Default)]
pub struct MountEnv {
    /// Container measurement; `None` when layout is not available yet.
    pub measure: Option<SurfaceMeasure>,
    /// Platform reduced-motion preference, queried once.
    pub reduced_motion: bool,
    /// Global pointer observable, for widgets that track the pointer.
    pub pointer: Option<PointerHub>,
}

pub struct AnimationComponent<S: Simulation, R> {
    id: WidgetId,
    sim: S,
    renderer: R,
    clock: FrameClock,
    surface: SurfaceOwner,
    lifecycle: LifecycleState,
    state: Option<S::State>,
    pending: Option<FrameHandle>,
    pointer: Option<PointerSubscription>,
    visible: bool,
    frames: u64,
}

impl<S, R> AnimationComponent<S, R>
where
    S: Simulation,
    R: Renderer<S::State>,
{
    pub fn new(id: WidgetId, sim: S, renderer: R, config: &AnimationConfig) -> Self {
        Self {
            id,
            sim,
            renderer,
            clock: FrameClock::new(config.dt_max_ms),
            surface: SurfaceOwner::new(config.dpr_cap),
            lifecycle: LifecycleState::Unmounted,
            state: None,
            pending: None,
            pointer: None,
            visible: true,
            frames: 0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn state(&self) -> Option<&S::State> {
        self.state.as_ref()
    }

    pub fn surface(&self) -> Option<&SurfaceDescriptor> {
        self.surface.current()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of integration steps taken since mount.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Mount the component. Starts the frame chain, or paints a single still
    /// frame when the reduced-motion preference is set.
    pub fn mount(
        &mut self,
        env: MountEnv,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<LifecycleState, LifecycleError> {
        if self.lifecycle != LifecycleState::Unmounted {
            return Err(LifecycleError::AlreadyMounted);
        }

        if self.sim.wants_pointer()
            && let Some(hub) = &env.pointer
        {
            self.pointer = Some(hub.subscribe(self.id));
        }

        self.clock.reset();
        self.visible = true;
        self.frames = 0;

        if let Some(measure) = env.measure {
            self.apply_resize(measure);
        }

        if env.reduced_motion {
            log::debug!("{} mounted static (reduced motion)", self.id);
            self.enter_static();
            return Ok(LifecycleState::Static);
        }

        self.state = Some(self.sim.init());
        self.lifecycle = LifecycleState::Running;
        if let Err(e) = self.schedule(scheduler) {
            log::warn!("{}: {e}; falling back to a still frame", self.id);
            self.enter_static();
            return Ok(LifecycleState::Static);
        }
        log::debug!("{} mounted running", self.id);
        Ok(LifecycleState::Running)
    }

    /// Handle one host frame callback. Returns `true` if a frame was painted.
    ///
    /// A callback arriving after unmount, while static, or while hidden is
    /// ignored.
    pub fn on_frame(&mut self, now_ms: f64, scheduler: &mut dyn FrameScheduler) -> bool {
        // the callback that was pending is the one firing now
        self.pending = None;

        if self.lifecycle != LifecycleState::Running || !self.visible {
            return false;
        }
        let Some(prev) = self.state.as_ref() else {
            return false;
        };

        let dt = self.clock.tick(now_ms);
        let input = FrameInput {
            pointer: self.pointer.as_ref().and_then(PointerSubscription::latest),
        };
        let next = self.sim.update(prev, dt, &input);
        self.state = Some(next);
        self.frames += 1;

        let painted = self.paint();

        if let Err(e) = self.schedule(scheduler) {
            log::warn!("{}: {e}; stopping animation", self.id);
            self.lifecycle = LifecycleState::Static;
        }
        painted
    }

    /// React to a container resize. Never touches the simulation state.
    pub fn resize(&mut self, measure: SurfaceMeasure) -> ResizeOutcome {
        if self.lifecycle == LifecycleState::Unmounted {
            return ResizeOutcome::Deferred;
        }
        let outcome = self.apply_resize(measure);
        // a resized backing store is blank; a static widget gets no next frame
        if matches!(outcome, ResizeOutcome::Resized(_)) && self.lifecycle == LifecycleState::Static
        {
            self.paint();
        }
        outcome
    }

    /// Pause while the page is hidden and resume when it is shown again.
    pub fn set_visible(&mut self, visible: bool, scheduler: &mut dyn FrameScheduler) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if self.lifecycle != LifecycleState::Running {
            return;
        }
        if visible {
            self.clock.reset();
            if let Err(e) = self.schedule(scheduler) {
                log::warn!("{}: {e}; stopping animation", self.id);
                self.lifecycle = LifecycleState::Static;
            }
        } else {
            self.cancel(scheduler);
            log::debug!("{} paused (hidden)", self.id);
        }
    }

    /// Paint the current state again, e.g. after a theme change.
    pub fn repaint(&mut self) -> bool {
        self.paint()
    }

    /// Tear down: cancel the pending callback, release the pointer, drop the
    /// state. Safe to call any number of times.
    pub fn unmount(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.cancel(scheduler);
        self.pointer = None;
        self.state = None;
        self.surface.clear();
        if self.lifecycle != LifecycleState::Unmounted {
            log::debug!("{} unmounted after {} frames", self.id, self.frames);
        }
        self.lifecycle = LifecycleState::Unmounted;
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn enter_static(&mut self) {
        self.state = Some(self.sim.still_frame());
        self.lifecycle = LifecycleState::Static;
        self.paint();
    }

    fn apply_resize(&mut self, measure: SurfaceMeasure) -> ResizeOutcome {
        let outcome = self.surface.resize(measure);
        if let ResizeOutcome::Resized(desc) = outcome
            && let Err(e) = self.renderer.configure(&desc)
        {
            log::warn!("{}: cannot configure surface: {e}", self.id);
        }
        outcome
    }

    fn paint(&mut self) -> bool {
        let (Some(state), Some(surface)) = (self.state.as_ref(), self.surface.current()) else {
            return false;
        };
        match self.renderer.render(state, surface) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{}: {e}; drawing nothing", self.id);
                false
            }
        }
    }

    fn schedule(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), ScheduleError> {
        if self.pending.is_some() {
            return Ok(());
        }
        self.pending = Some(scheduler.request_frame()?);
        Ok(())
    }

    fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }
}
