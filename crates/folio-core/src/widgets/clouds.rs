//! Weather scene: clouds drifting across the sky and wrapping around.
//!
//! Positions are normalized to the surface (`0..1` on both axes), so the
//! scene survives any resize unchanged.

use crate::config::require_positive;
use crate::error::ConfigError;
use crate::sim::{FrameInput, Simulation};
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudsConfig {
    pub count: u32,
    /// Drift speed range, in surface widths per second.
    pub min_speed: f64,
    pub max_speed: f64,
    /// Cloud width range, as a fraction of the surface width.
    pub min_size: f64,
    pub max_size: f64,
    pub seed: u64,
}

impl Default for CloudsConfig {
    fn default() -> Self {
        Self {
            count: 5,
            min_speed: 0.01,
            max_speed: 0.03,
            min_size: 0.12,
            max_size: 0.25,
            seed: 0xC10D,
        }
    }
}

impl CloudsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::invalid("count", "must be at least 1"));
        }
        require_positive("min_speed", self.min_speed)?;
        require_positive("min_size", self.min_size)?;
        if self.min_speed > self.max_speed {
            return Err(ConfigError::invalid("min_speed", "must not exceed max_speed"));
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::invalid("min_size", "must not exceed max_size"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    /// Center, normalized.
    pub pos: DVec2,
    /// Width as a fraction of the surface width.
    pub size: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudsState {
    pub clouds: Vec<Cloud>,
}

#[derive(Debug, Clone)]
pub struct CloudsSim {
    config: CloudsConfig,
}

impl CloudsSim {
    pub fn new(config: CloudsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CloudsConfig {
        &self.config
    }
}

impl Simulation for CloudsSim {
    type State = CloudsState;

    fn init(&self) -> CloudsState {
        let c = &self.config;
        let mut rng = fastrand::Rng::with_seed(c.seed);
        let mut lerp = |lo: f64, hi: f64| lo + (hi - lo) * rng.f64();
        let clouds = (0..c.count)
            .map(|_| {
                let x = lerp(0.0, 1.0);
                let y = lerp(0.1, 0.6);
                Cloud {
                    pos: DVec2::new(x, y),
                    size: lerp(c.min_size, c.max_size),
                    speed: lerp(c.min_speed, c.max_speed),
                }
            })
            .collect();
        CloudsState { clouds }
    }

    fn update(&self, prev: &CloudsState, dt: f64, _input: &FrameInput) -> CloudsState {
        let dt = dt.max(0.0);
        let clouds = prev
            .clouds
            .iter()
            .map(|cloud| {
                // fully off the right edge re-enters fully off the left
                let span = 1.0 + cloud.size;
                let shifted = cloud.pos.x + cloud.speed * dt + cloud.size / 2.0;
                Cloud {
                    pos: DVec2::new(shifted.rem_euclid(span) - cloud.size / 2.0, cloud.pos.y),
                    ..*cloud
                }
            })
            .collect();
        CloudsState { clouds }
    }
}
