//! A head that turns toward the global pointer and blinks now and then.

use crate::config::require_positive;
use crate::error::ConfigError;
use crate::sim::{FrameInput, Simulation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub max_yaw_deg: f64,
    pub max_pitch_deg: f64,
    /// Easing rate toward the target, per second.
    pub stiffness: f64,
    pub blink_interval_s: f64,
    pub blink_duration_s: f64,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            max_yaw_deg: 35.0,
            max_pitch_deg: 20.0,
            stiffness: 6.0,
            blink_interval_s: 4.0,
            blink_duration_s: 0.15,
        }
    }
}

impl GazeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("max_yaw_deg", self.max_yaw_deg)?;
        require_positive("max_pitch_deg", self.max_pitch_deg)?;
        require_positive("stiffness", self.stiffness)?;
        require_positive("blink_interval_s", self.blink_interval_s)?;
        require_positive("blink_duration_s", self.blink_duration_s)?;
        if self.blink_duration_s >= self.blink_interval_s {
            return Err(ConfigError::invalid(
                "blink_duration_s",
                "must be shorter than blink_interval_s",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeState {
    /// Current head yaw in radians, positive to the right.
    pub yaw: f64,
    /// Current head pitch in radians, positive downward.
    pub pitch: f64,
    /// Seconds into the current blink cycle.
    pub blink_clock: f64,
    /// Eye openness in `[0, 1]`.
    pub eye_open: f64,
}

#[derive(Debug, Clone)]
pub struct GazeSim {
    config: GazeConfig,
}

impl GazeSim {
    pub fn new(config: GazeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GazeConfig {
        &self.config
    }

    fn openness(&self, blink_clock: f64) -> f64 {
        let c = &self.config;
        let into_blink = blink_clock - (c.blink_interval_s - c.blink_duration_s);
        if into_blink <= 0.0 {
            return 1.0;
        }
        // close then reopen, a V over the blink duration
        let t = into_blink / c.blink_duration_s;
        (2.0 * t - 1.0).abs().clamp(0.0, 1.0)
    }
}

impl Simulation for GazeSim {
    type State = GazeState;

    fn init(&self) -> GazeState {
        GazeState {
            yaw: 0.0,
            pitch: 0.0,
            blink_clock: 0.0,
            eye_open: 1.0,
        }
    }

    fn update(&self, prev: &GazeState, dt: f64, input: &FrameInput) -> GazeState {
        let c = &self.config;
        let (target_yaw, target_pitch) = match input.pointer {
            Some(p) => (
                p.x.clamp(-1.0, 1.0) * c.max_yaw_deg.to_radians(),
                p.y.clamp(-1.0, 1.0) * c.max_pitch_deg.to_radians(),
            ),
            None => (0.0, 0.0),
        };
        let alpha = 1.0 - (-c.stiffness * dt.max(0.0)).exp();
        let blink_clock = (prev.blink_clock + dt.max(0.0)).rem_euclid(c.blink_interval_s);
        GazeState {
            yaw: prev.yaw + (target_yaw - prev.yaw) * alpha,
            pitch: prev.pitch + (target_pitch - prev.pitch) * alpha,
            blink_clock,
            eye_open: self.openness(blink_clock),
        }
    }

    fn wants_pointer(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerPosition;
    use crate::sim::TICK_SECONDS;

    fn pointing(x: f64, y: f64) -> FrameInput {
        FrameInput {
            pointer: Some(PointerPosition { x, y }),
        }
    }

    #[test]
    fn eases_toward_pointer_without_overshoot() {
        let sim = GazeSim::new(GazeConfig::default());
        let target = 35f64.to_radians();
        let mut s = sim.init();
        let mut last = s.yaw;
        for _ in 0..240 {
            s = sim.update(&s, TICK_SECONDS, &pointing(1.0, 0.0));
            assert!(s.yaw >= last && s.yaw <= target + 1e-12);
            last = s.yaw;
        }
        assert!((s.yaw - target).abs() < 1e-3);
    }

    #[test]
    fn returns_to_center_without_pointer() {
        let sim = GazeSim::new(GazeConfig::default());
        let mut s = sim.init();
        s.yaw = 0.5;
        s.pitch = -0.2;
        for _ in 0..600 {
            s = sim.update(&s, TICK_SECONDS, &FrameInput::default());
        }
        assert!(s.yaw.abs() < 1e-6 && s.pitch.abs() < 1e-6);
    }

    #[test]
    fn blinks_once_per_interval() {
        let sim = GazeSim::new(GazeConfig::default());
        let mut s = sim.init();
        let mut closed_frames = 0;
        for _ in 0..240 {
            s = sim.update(&s, TICK_SECONDS, &FrameInput::default());
            if s.eye_open < 0.5 {
                closed_frames += 1;
            }
        }
        assert!(closed_frames > 0 && closed_frames < 10, "{closed_frames}");
    }

    #[test]
    fn zero_dt_holds_pose() {
        let sim = GazeSim::new(GazeConfig::default());
        let s = sim.init();
        assert_eq!(sim.update(&s, 0.0, &pointing(1.0, 1.0)), s);
    }
}
