//! Folio core: the frame-driven animation component and its widgets.
//!
//! Everything here is platform-free. Hosts (the browser bridge, the headless
//! runner, tests) supply timestamps, container measurements, and a frame
//! scheduler; this crate owns the state, the integrators, and the lifecycle.

pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod pointer;
pub mod sim;
pub mod surface;
pub mod widgets;

pub use clock::FrameClock;
pub use config::{AnimationConfig, FolioConfig, WidgetConfig};
pub use error::{ConfigError, LifecycleError, RenderError, ScheduleError};
pub use glam::{DMat3, DVec2, DVec3};
pub use id::WidgetId;
pub use lifecycle::{
    AnimationComponent, FrameHandle, FrameScheduler, LifecycleState, MountEnv, Renderer,
};
pub use pointer::{PointerHub, PointerPosition, PointerSubscription};
pub use sim::{FrameInput, Simulation, TICK_SECONDS, ticks};
pub use surface::{ResizeOutcome, SurfaceDescriptor, SurfaceMeasure, SurfaceOwner};
pub use widgets::{WidgetKind, WidgetSim, WidgetState};
