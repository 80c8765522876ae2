//! Bouncing letters: a phase-driven oscillation with a scale pulse.

use crate::config::require_positive;
use crate::error::ConfigError;
use crate::sim::{FrameInput, Simulation};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    pub text: String,
    /// Seconds for one full oscillation.
    pub period_s: f64,
    /// Peak vertical offset, in CSS pixels.
    pub amplitude: f64,
    /// Phase offset between neighbouring letters, in radians.
    pub stagger: f64,
    /// Relative scale swing of the pulse (0.08 = ±8%).
    pub pulse: f64,
    pub font_size: f64,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            text: "HELLO".to_string(),
            period_s: 1.6,
            amplitude: 12.0,
            stagger: 0.45,
            pulse: 0.08,
            font_size: 48.0,
        }
    }
}

impl BounceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.trim().is_empty() {
            return Err(ConfigError::invalid("text", "must not be empty"));
        }
        require_positive("period_s", self.period_s)?;
        require_positive("font_size", self.font_size)?;
        if !(0.0..1.0).contains(&self.pulse) {
            return Err(ConfigError::invalid("pulse", "must be in [0, 1)"));
        }
        Ok(())
    }
}

/// Pose of one letter for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterPose {
    pub ch: char,
    pub offset_y: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BounceState {
    /// Accumulated phase, wrapped into `[0, 2π)`.
    pub phase: f64,
    pub font_size: f64,
    pub letters: Vec<LetterPose>,
}

#[derive(Debug, Clone)]
pub struct BounceSim {
    config: BounceConfig,
}

impl BounceSim {
    pub fn new(config: BounceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BounceConfig {
        &self.config
    }

    fn pose(&self, phase: f64) -> BounceState {
        let c = &self.config;
        let letters = c
            .text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let local = phase + i as f64 * c.stagger;
                LetterPose {
                    ch,
                    offset_y: c.amplitude * local.sin(),
                    scale: 1.0 + c.pulse * (2.0 * local).sin(),
                }
            })
            .collect();
        BounceState {
            phase,
            font_size: c.font_size,
            letters,
        }
    }
}

impl Simulation for BounceSim {
    type State = BounceState;

    fn init(&self) -> BounceState {
        self.pose(0.0)
    }

    fn update(&self, prev: &BounceState, dt: f64, _input: &FrameInput) -> BounceState {
        let phase = (prev.phase + TAU * dt / self.config.period_s).rem_euclid(TAU);
        self.pose(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(sim: &BounceSim, state: &BounceState, dt: f64) -> BounceState {
        sim.update(state, dt, &FrameInput::default())
    }

    #[test]
    fn quarter_period_peaks_first_letter() {
        let sim = BounceSim::new(BounceConfig::default());
        let s = step(&sim, &sim.init(), 0.4); // period 1.6
        assert!((s.phase - TAU / 4.0).abs() < 1e-9);
        assert!((s.letters[0].offset_y - 12.0).abs() < 1e-9);
    }

    #[test]
    fn phase_wraps_after_full_period() {
        let sim = BounceSim::new(BounceConfig::default());
        let mut s = sim.init();
        for _ in 0..32 {
            s = step(&sim, &s, 0.05);
        }
        // 32 × 0.05 = 1.6 s = one period
        assert!(s.phase < 1e-6 || (TAU - s.phase) < 1e-6, "phase {}", s.phase);
        assert!((0.0..TAU).contains(&s.phase));
    }

    #[test]
    fn letters_follow_text_and_stay_bounded() {
        let sim = BounceSim::new(BounceConfig {
            text: "Hi!".into(),
            ..BounceConfig::default()
        });
        let mut s = sim.init();
        assert_eq!(
            s.letters.iter().map(|l| l.ch).collect::<String>(),
            "Hi!".to_string()
        );
        for _ in 0..200 {
            s = step(&sim, &s, 0.0173);
            for l in &s.letters {
                assert!(l.offset_y.abs() <= 12.0 + 1e-9);
                assert!((0.92 - 1e-9..=1.08 + 1e-9).contains(&l.scale));
            }
        }
    }

    #[test]
    fn update_is_deterministic() {
        let sim = BounceSim::new(BounceConfig::default());
        let a = step(&sim, &sim.init(), 0.033);
        let b = step(&sim, &sim.init(), 0.033);
        assert_eq!(a, b);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = BounceConfig {
            period_s: 0.0,
            ..BounceConfig::default()
        };
        assert!(bad.validate().is_err());
        let empty = BounceConfig {
            text: "  ".into(),
            ..BounceConfig::default()
        };
        assert!(empty.validate().is_err());
        assert!(BounceConfig::default().validate().is_ok());
    }
}
