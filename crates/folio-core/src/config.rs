//! Configuration: animation tuning plus one tagged config per widget kind.
//!
//! Configs arrive as JSON from the page. Every field has a default, so
//! `{"widget":{"kind":"pong"}}` is a complete configuration.

use crate::clock::DEFAULT_DT_MAX_MS;
use crate::error::ConfigError;
use crate::surface::DEFAULT_DPR_CAP;
use crate::widgets::bounce::BounceConfig;
use crate::widgets::clouds::CloudsConfig;
use crate::widgets::gaze::GazeConfig;
use crate::widgets::orbit::OrbitConfig;
use crate::widgets::pong::PongConfig;
use crate::widgets::WidgetKind;
use serde::{Deserialize, Serialize};

// ─── Animation ────────────────────────────────────────────────────────────

/// Longest accepted resize quiet period. Timers take a signed 32-bit delay.
pub const MAX_RESIZE_DEBOUNCE_MS: u32 = 10_000;

/// Settings shared by every frame-driven component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Largest frame delta fed to an integrator. Default: **50 ms**.
    pub dt_max_ms: f64,
    /// Device-pixel-ratio cap for the backing store. Default: **2.0**.
    pub dpr_cap: f64,
    /// Quiet period before a resize is applied; 0 applies immediately.
    /// Default: **100 ms**, at most [`MAX_RESIZE_DEBOUNCE_MS`].
    pub resize_debounce_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            dt_max_ms: DEFAULT_DT_MAX_MS,
            dpr_cap: DEFAULT_DPR_CAP,
            resize_debounce_ms: 100,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("dt_max_ms", self.dt_max_ms)?;
        require_positive("dpr_cap", self.dpr_cap)?;
        if self.resize_debounce_ms > MAX_RESIZE_DEBOUNCE_MS {
            return Err(ConfigError::invalid(
                "resize_debounce_ms",
                format!("must be at most {MAX_RESIZE_DEBOUNCE_MS}, got {}", self.resize_debounce_ms),
            ));
        }
        Ok(())
    }
}

// ─── Widgets ──────────────────────────────────────────────────────────────

/// Per-widget configuration, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetConfig {
    Bounce(BounceConfig),
    Pong(PongConfig),
    Orbit(OrbitConfig),
    Gaze(GazeConfig),
    Clouds(CloudsConfig),
}

impl WidgetConfig {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Bounce(_) => WidgetKind::Bounce,
            Self::Pong(_) => WidgetKind::Pong,
            Self::Orbit(_) => WidgetKind::Orbit,
            Self::Gaze(_) => WidgetKind::Gaze,
            Self::Clouds(_) => WidgetKind::Clouds,
        }
    }

    /// Default configuration for a widget kind.
    pub fn default_for(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Bounce => Self::Bounce(BounceConfig::default()),
            WidgetKind::Pong => Self::Pong(PongConfig::default()),
            WidgetKind::Orbit => Self::Orbit(OrbitConfig::default()),
            WidgetKind::Gaze => Self::Gaze(GazeConfig::default()),
            WidgetKind::Clouds => Self::Clouds(CloudsConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Bounce(c) => c.validate(),
            Self::Pong(c) => c.validate(),
            Self::Orbit(c) => c.validate(),
            Self::Gaze(c) => c.validate(),
            Self::Clouds(c) => c.validate(),
        }
    }
}

// ─── Top level ────────────────────────────────────────────────────────────

/// Complete configuration for one mounted widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    pub widget: WidgetConfig,
}

impl FolioConfig {
    pub fn new(widget: WidgetConfig) -> Self {
        Self {
            animation: AnimationConfig::default(),
            widget,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.animation.validate()?;
        self.widget.validate()
    }
}

/// Reject zero, negative, and non-finite values.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be > 0, got {value}")))
    }
}
