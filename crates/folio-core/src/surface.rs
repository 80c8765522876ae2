//! Canvas/surface sizing.
//!
//! A surface is measured in CSS pixels and backed by a store of physical
//! pixels. The backing size is `ceil(css × min(dpr, cap))`; the cap bounds
//! fill cost on very dense displays.

use serde::{Deserialize, Serialize};

/// Default device-pixel-ratio cap.
pub const DEFAULT_DPR_CAP: f64 = 2.0;

/// Raw container measurement reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMeasure {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl SurfaceMeasure {
    pub const fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }

    /// A container that has not been laid out yet (or is hidden) has no area.
    pub fn has_area(&self) -> bool {
        self.css_width.is_finite()
            && self.css_height.is_finite()
            && self.css_width > 0.0
            && self.css_height > 0.0
    }
}

/// Resolved surface geometry, read-only to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl SurfaceDescriptor {
    /// Compute a descriptor, or `None` when the measure has no area.
    pub fn compute(measure: SurfaceMeasure, dpr_cap: f64) -> Option<Self> {
        if !measure.has_area() {
            return None;
        }
        let dpr = sanitize_dpr(measure.device_pixel_ratio);
        let scale = effective_scale(dpr, dpr_cap);
        Some(Self {
            css_width: measure.css_width,
            css_height: measure.css_height,
            device_pixel_ratio: dpr,
            backing_width: (measure.css_width * scale).ceil() as u32,
            backing_height: (measure.css_height * scale).ceil() as u32,
        })
    }

    /// Scale from CSS pixels to backing pixels.
    pub fn scale(&self) -> f64 {
        if self.css_width > 0.0 {
            self.backing_width as f64 / self.css_width
        } else {
            1.0
        }
    }

    /// Uniform factor that maps a `logical_w × logical_h` field into this
    /// surface while preserving aspect ratio.
    pub fn fit(&self, logical_w: f64, logical_h: f64) -> f64 {
        if logical_w <= 0.0 || logical_h <= 0.0 {
            return 1.0;
        }
        (self.css_width / logical_w).min(self.css_height / logical_h)
    }
}

fn sanitize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

fn effective_scale(dpr: f64, cap: f64) -> f64 {
    let cap = if cap.is_finite() && cap > 0.0 { cap } else { DEFAULT_DPR_CAP };
    dpr.min(cap)
}

/// What a `resize` call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// The descriptor changed; the backing store must be resized.
    Resized(SurfaceDescriptor),
    /// Same geometry as before; nothing to do.
    Unchanged(SurfaceDescriptor),
    /// The container has no area yet; retry on the next resize signal.
    Deferred,
}

/// Tracks the current descriptor for one widget's surface.
#[derive(Debug, Clone)]
pub struct SurfaceOwner {
    dpr_cap: f64,
    current: Option<SurfaceDescriptor>,
}

impl Default for SurfaceOwner {
    fn default() -> Self {
        Self::new(DEFAULT_DPR_CAP)
    }
}

impl SurfaceOwner {
    pub fn new(dpr_cap: f64) -> Self {
        Self {
            dpr_cap,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&SurfaceDescriptor> {
        self.current.as_ref()
    }

    /// Recompute the descriptor from a fresh container measurement.
    ///
    /// Idempotent: an unchanged measurement returns `Unchanged` with the
    /// identical descriptor. A zero-size container keeps the previous
    /// descriptor (if any) and returns `Deferred`.
    pub fn resize(&mut self, measure: SurfaceMeasure) -> ResizeOutcome {
        let Some(next) = SurfaceDescriptor::compute(measure, self.dpr_cap) else {
            log::debug!(
                "deferring resize: container is {}x{}",
                measure.css_width,
                measure.css_height
            );
            return ResizeOutcome::Deferred;
        };
        if self.current == Some(next) {
            return ResizeOutcome::Unchanged(next);
        }
        self.current = Some(next);
        ResizeOutcome::Resized(next)
    }

    /// Forget the descriptor (on unmount).
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backing_size_uses_capped_dpr() {
        let d = SurfaceDescriptor::compute(SurfaceMeasure::new(300.5, 150.0, 3.0), 2.0).unwrap();
        assert_eq!(d.backing_width, 601);
        assert_eq!(d.backing_height, 300);
        assert_eq!(d.device_pixel_ratio, 3.0);
        assert!((d.scale() - 2.0).abs() < 0.01);
    }

    #[test]
    fn fractional_dpr_rounds_up() {
        let d = SurfaceDescriptor::compute(SurfaceMeasure::new(101.0, 33.0, 1.5), 2.0).unwrap();
        assert_eq!(d.backing_width, 152); // ceil(151.5)
        assert_eq!(d.backing_height, 50); // ceil(49.5)
    }

    #[test]
    fn invalid_dpr_falls_back_to_one() {
        for dpr in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let d = SurfaceDescriptor::compute(SurfaceMeasure::new(10.0, 10.0, dpr), 2.0).unwrap();
            assert_eq!(d.backing_width, 10, "dpr {dpr}");
        }
    }

    #[test]
    fn zero_size_is_deferred() {
        let mut owner = SurfaceOwner::default();
        assert_eq!(owner.resize(SurfaceMeasure::new(0.0, 200.0, 1.0)), ResizeOutcome::Deferred);
        assert_eq!(owner.resize(SurfaceMeasure::new(200.0, 0.0, 1.0)), ResizeOutcome::Deferred);
        assert!(owner.current().is_none());
    }

    #[test]
    fn deferred_keeps_previous_descriptor() {
        let mut owner = SurfaceOwner::default();
        owner.resize(SurfaceMeasure::new(320.0, 200.0, 1.0));
        assert_eq!(owner.resize(SurfaceMeasure::new(0.0, 0.0, 1.0)), ResizeOutcome::Deferred);
        assert_eq!(owner.current().map(|d| d.backing_width), Some(320));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut owner = SurfaceOwner::default();
        let m = SurfaceMeasure::new(640.0, 360.0, 2.0);
        let first = match owner.resize(m) {
            ResizeOutcome::Resized(d) => d,
            other => panic!("expected Resized, got {other:?}"),
        };
        let second = match owner.resize(m) {
            ResizeOutcome::Unchanged(d) => d,
            other => panic!("expected Unchanged, got {other:?}"),
        };
        assert_eq!(first, second);
    }

    #[test]
    fn fit_preserves_aspect() {
        let d = SurfaceDescriptor::compute(SurfaceMeasure::new(400.0, 400.0, 1.0), 2.0).unwrap();
        assert_eq!(d.fit(800.0, 400.0), 0.5);
    }
}
