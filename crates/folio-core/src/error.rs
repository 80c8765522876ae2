//! Error types for the animation core.
//!
//! None of these ever reach the hosting page: the bridge logs them and
//! degrades to "draw nothing".

/// A renderer could not paint a frame.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The drawing context could not be acquired (canvas detached, context lost).
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The backend rejected a drawing command.
    #[error("backend error: {0}")]
    Backend(String),
}

impl RenderError {
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// The host refused to schedule a frame callback.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("frame scheduling failed: {0}")]
pub struct ScheduleError(pub String);

/// Lifecycle misuse by the host.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("component is already mounted")]
    AlreadyMounted,
}

/// Invalid widget or animation configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            RenderError::surface_unavailable("no 2d context")
                .to_string()
                .starts_with("surface unavailable:")
        );
        assert!(
            RenderError::backend("x")
                .to_string()
                .starts_with("backend error:")
        );
        assert_eq!(
            ConfigError::invalid("period", "must be > 0").to_string(),
            "invalid value for `period`: must be > 0"
        );
    }
}
