//! The per-widget state integrator contract.

use crate::pointer::PointerPosition;
use std::fmt::Debug;

/// Nominal tick length. Per-tick speeds are scaled by `dt / TICK_SECONDS`.
pub const TICK_SECONDS: f64 = 1.0 / 60.0;

/// Number of nominal ticks covered by `dt` seconds.
pub fn ticks(dt: f64) -> f64 {
    dt.max(0.0) / TICK_SECONDS
}

/// Inputs available to one update step besides elapsed time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Latest global pointer position, when the widget subscribed to it.
    pub pointer: Option<PointerPosition>,
}

/// A deterministic state integrator.
///
/// `update` must be a pure function of `(prev, dt, input)`: any randomness
/// lives in the state as a seed, so replaying the same inputs replays the
/// same frames.
pub trait Simulation {
    type State: Clone + Debug;

    /// Fresh state for a newly mounted widget.
    fn init(&self) -> Self::State;

    /// Advance `prev` by `dt` seconds (already clamped by the clock).
    fn update(&self, prev: &Self::State, dt: f64, input: &FrameInput) -> Self::State;

    /// The single frame shown when motion is suppressed.
    fn still_frame(&self) -> Self::State {
        self.init()
    }

    /// Whether this widget reads the global pointer.
    fn wants_pointer(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_scale_with_dt() {
        assert!((ticks(TICK_SECONDS) - 1.0).abs() < 1e-12);
        assert!((ticks(0.05) - 3.0).abs() < 1e-9);
        assert_eq!(ticks(-1.0), 0.0);
    }
}
