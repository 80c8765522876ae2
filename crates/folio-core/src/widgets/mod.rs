//! The widget catalog.
//!
//! Each widget is a [`Simulation`] in its own module. [`WidgetSim`] wraps
//! them in one enum so hosts can mount any kind from a [`WidgetConfig`]
//! without generics leaking into the bridge.

pub mod bounce;
pub mod clouds;
pub mod gaze;
pub mod orbit;
pub mod pong;

use crate::config::WidgetConfig;
use crate::error::ConfigError;
use crate::sim::{FrameInput, Simulation};
use bounce::{BounceSim, BounceState};
use clouds::{CloudsSim, CloudsState};
use gaze::{GazeSim, GazeState};
use orbit::{OrbitSim, OrbitState};
use pong::{PongSim, PongState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Bounce,
    Pong,
    Orbit,
    Gaze,
    Clouds,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::Bounce,
        WidgetKind::Pong,
        WidgetKind::Orbit,
        WidgetKind::Gaze,
        WidgetKind::Clouds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Pong => "pong",
            Self::Orbit => "orbit",
            Self::Gaze => "gaze",
            Self::Clouds => "clouds",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::invalid("kind", format!("unknown widget `{s}`")))
    }
}

/// Any widget's simulation.
#[derive(Debug, Clone)]
pub enum WidgetSim {
    Bounce(BounceSim),
    Pong(PongSim),
    Orbit(OrbitSim),
    Gaze(GazeSim),
    Clouds(CloudsSim),
}

/// Any widget's state, tagged by kind in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetState {
    Bounce(BounceState),
    Pong(PongState),
    Orbit(OrbitState),
    Gaze(GazeState),
    Clouds(CloudsState),
}

impl WidgetState {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Bounce(_) => WidgetKind::Bounce,
            Self::Pong(_) => WidgetKind::Pong,
            Self::Orbit(_) => WidgetKind::Orbit,
            Self::Gaze(_) => WidgetKind::Gaze,
            Self::Clouds(_) => WidgetKind::Clouds,
        }
    }
}

impl WidgetSim {
    /// Validate `config` and build the matching simulation.
    pub fn from_config(config: &WidgetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(match config {
            WidgetConfig::Bounce(c) => Self::Bounce(BounceSim::new(c.clone())),
            WidgetConfig::Pong(c) => Self::Pong(PongSim::new(c.clone())),
            WidgetConfig::Orbit(c) => Self::Orbit(OrbitSim::new(c.clone())),
            WidgetConfig::Gaze(c) => Self::Gaze(GazeSim::new(c.clone())),
            WidgetConfig::Clouds(c) => Self::Clouds(CloudsSim::new(c.clone())),
        })
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Bounce(_) => WidgetKind::Bounce,
            Self::Pong(_) => WidgetKind::Pong,
            Self::Orbit(_) => WidgetKind::Orbit,
            Self::Gaze(_) => WidgetKind::Gaze,
            Self::Clouds(_) => WidgetKind::Clouds,
        }
    }
}

impl Simulation for WidgetSim {
    type State = WidgetState;

    fn init(&self) -> WidgetState {
        match self {
            Self::Bounce(s) => WidgetState::Bounce(s.init()),
            Self::Pong(s) => WidgetState::Pong(s.init()),
            Self::Orbit(s) => WidgetState::Orbit(s.init()),
            Self::Gaze(s) => WidgetState::Gaze(s.init()),
            Self::Clouds(s) => WidgetState::Clouds(s.init()),
        }
    }

    fn update(&self, prev: &WidgetState, dt: f64, input: &FrameInput) -> WidgetState {
        match (self, prev) {
            (Self::Bounce(s), WidgetState::Bounce(p)) => WidgetState::Bounce(s.update(p, dt, input)),
            (Self::Pong(s), WidgetState::Pong(p)) => WidgetState::Pong(s.update(p, dt, input)),
            (Self::Orbit(s), WidgetState::Orbit(p)) => WidgetState::Orbit(s.update(p, dt, input)),
            (Self::Gaze(s), WidgetState::Gaze(p)) => WidgetState::Gaze(s.update(p, dt, input)),
            (Self::Clouds(s), WidgetState::Clouds(p)) => WidgetState::Clouds(s.update(p, dt, input)),
            (sim, state) => {
                log::warn!(
                    "{} state fed to {} simulation; restarting",
                    state.kind(),
                    sim.kind()
                );
                self.init()
            }
        }
    }

    fn still_frame(&self) -> WidgetState {
        match self {
            Self::Bounce(s) => WidgetState::Bounce(s.still_frame()),
            Self::Pong(s) => WidgetState::Pong(s.still_frame()),
            Self::Orbit(s) => WidgetState::Orbit(s.still_frame()),
            Self::Gaze(s) => WidgetState::Gaze(s.still_frame()),
            Self::Clouds(s) => WidgetState::Clouds(s.still_frame()),
        }
    }

    fn wants_pointer(&self) -> bool {
        match self {
            Self::Bounce(s) => s.wants_pointer(),
            Self::Pong(s) => s.wants_pointer(),
            Self::Orbit(s) => s.wants_pointer(),
            Self::Gaze(s) => s.wants_pointer(),
            Self::Clouds(s) => s.wants_pointer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_names_round_trip() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.name().parse::<WidgetKind>().unwrap(), kind);
        }
        assert!("tetris".parse::<WidgetKind>().is_err());
    }

    #[test]
    fn only_gaze_wants_pointer() {
        for kind in WidgetKind::ALL {
            let sim = WidgetSim::from_config(&WidgetConfig::default_for(kind)).unwrap();
            assert_eq!(sim.wants_pointer(), kind == WidgetKind::Gaze, "{kind}");
            assert_eq!(sim.init().kind(), kind);
        }
    }

    #[test]
    fn mismatched_state_restarts() {
        let pong = WidgetSim::from_config(&WidgetConfig::default_for(WidgetKind::Pong)).unwrap();
        let orbit = WidgetSim::from_config(&WidgetConfig::default_for(WidgetKind::Orbit)).unwrap();
        let next = pong.update(&orbit.init(), 0.016, &FrameInput::default());
        assert_eq!(next, pong.init());
    }

    #[test]
    fn state_snapshot_is_tagged() {
        let sim = WidgetSim::from_config(&WidgetConfig::default_for(WidgetKind::Gaze)).unwrap();
        let json = serde_json::to_value(sim.init()).unwrap();
        assert_eq!(json["kind"], "gaze");
        assert_eq!(json["eye_open"], 1.0);
    }
}
