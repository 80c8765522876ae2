//! Display list → Vello scene.
//!
//! Encodes frames for GPU presentation. The caller owns the wgpu surface
//! and presents [`VelloRenderer::scene`] after each render.

use crate::color::Color;
use crate::paint::paint_widget;
use crate::scene::{DisplayList, DrawCmd};
use crate::theme::Theme;
use folio_core::{RenderError, Renderer, SurfaceDescriptor, WidgetState};
use kurbo::{Affine, BezPath, Ellipse, Line, Rect, Stroke};
use peniko::Fill;
use vello::Scene;

/// Encode a display list into `scene` under `transform` (CSS → device).
/// Returns the number of commands encoded.
///
/// Text is not encoded: glyph runs need font data, which this backend does
/// not load. Text-only content is drawn by the Canvas2D backend.
pub fn encode_list(scene: &mut Scene, list: &DisplayList, transform: Affine) -> usize {
    let mut encoded = 0;
    for cmd in list.commands() {
        match cmd {
            DrawCmd::Clear(color) => {
                let rect = Rect::new(0.0, 0.0, list.width(), list.height());
                scene.fill(Fill::NonZero, transform, to_peniko(*color), None, &rect);
            }
            DrawCmd::FillRect { rect, color } => {
                scene.fill(Fill::NonZero, transform, to_peniko(*color), None, rect);
            }
            DrawCmd::FillEllipse {
                center,
                rx,
                ry,
                color,
            } => {
                let shape = Ellipse::new(*center, (*rx, *ry), 0.0);
                scene.fill(Fill::NonZero, transform, to_peniko(*color), None, &shape);
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                let line = Line::new(*from, *to);
                scene.stroke(&Stroke::new(*width), transform, to_peniko(*color), None, &line);
            }
            DrawCmd::Polyline {
                points,
                closed,
                width,
                color,
            } => {
                let mut path = BezPath::new();
                let mut iter = points.iter();
                if let Some(first) = iter.next() {
                    path.move_to(*first);
                }
                for p in iter {
                    path.line_to(*p);
                }
                if *closed {
                    path.close_path();
                }
                scene.stroke(&Stroke::new(*width), transform, to_peniko(*color), None, &path);
            }
            DrawCmd::Text { at, text, size, .. } => {
                log::trace!("skipping text {text:?} {size}px at ({}, {})", at.x, at.y);
                continue;
            }
        }
        encoded += 1;
    }
    encoded
}

fn to_peniko(c: Color) -> peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    peniko::Color::from_rgba8(r, g, b, a)
}

/// Vello backend for widget states.
pub struct VelloRenderer {
    scene: Scene,
    theme: Theme,
    surface: Option<SurfaceDescriptor>,
    encoded: usize,
}

impl VelloRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            scene: Scene::new(),
            theme,
            surface: None,
            encoded: 0,
        }
    }

    /// The scene for the most recent frame.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Draw commands encoded for the most recent frame, text excluded.
    pub fn encoded_commands(&self) -> usize {
        self.encoded
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

impl Renderer<WidgetState> for VelloRenderer {
    fn configure(&mut self, surface: &SurfaceDescriptor) -> Result<(), RenderError> {
        log::debug!(
            "vello surface {}x{} (dpr {})",
            surface.backing_width,
            surface.backing_height,
            surface.device_pixel_ratio
        );
        self.surface = Some(*surface);
        Ok(())
    }

    fn render(&mut self, state: &WidgetState, surface: &SurfaceDescriptor) -> Result<(), RenderError> {
        if self.surface.as_ref() != Some(surface) {
            return Err(RenderError::surface_unavailable("surface not configured"));
        }
        let list = paint_widget(state, surface, &self.theme);
        self.scene.reset();
        self.encoded = encode_list(&mut self.scene, &list, Affine::scale(surface.scale()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Simulation, SurfaceMeasure, WidgetConfig, WidgetKind, WidgetSim};

    fn surface() -> SurfaceDescriptor {
        SurfaceDescriptor::compute(SurfaceMeasure::new(200.0, 100.0, 2.0), 2.0).unwrap()
    }

    #[test]
    fn render_requires_configured_surface() {
        let state = WidgetSim::from_config(&WidgetConfig::default_for(WidgetKind::Clouds))
            .unwrap()
            .init();
        let mut r = VelloRenderer::new(Theme::light());
        assert!(matches!(
            r.render(&state, &surface()),
            Err(RenderError::SurfaceUnavailable(_))
        ));

        r.configure(&surface()).unwrap();
        r.render(&state, &surface()).unwrap();
        assert!(r.encoded_commands() > 1);
    }

    #[test]
    fn every_widget_kind_encodes() {
        let mut r = VelloRenderer::new(Theme::dark());
        r.configure(&surface()).unwrap();
        for kind in WidgetKind::ALL {
            let state = WidgetSim::from_config(&WidgetConfig::default_for(kind))
                .unwrap()
                .init();
            r.render(&state, &surface()).unwrap();
            // more than the background clear
            assert!(r.encoded_commands() > 1, "{kind} painted nothing");
        }
    }

    #[test]
    fn text_is_not_counted_as_encoded() {
        let mut list = DisplayList::new(100.0, 50.0, Color::WHITE);
        list.text(
            kurbo::Point::new(10.0, 20.0),
            "hi".to_string(),
            12.0,
            crate::scene::TextAlign::Left,
            Color::BLACK,
        );
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        let mut scene = Scene::new();
        assert_eq!(list.len(), 3);
        assert_eq!(encode_list(&mut scene, &list, Affine::IDENTITY), 2);
    }

    #[test]
    fn bounce_encodes_letter_shadows() {
        let state = WidgetSim::from_config(&WidgetConfig::default_for(WidgetKind::Bounce))
            .unwrap()
            .init();
        let mut r = VelloRenderer::new(Theme::light());
        r.configure(&surface()).unwrap();
        r.render(&state, &surface()).unwrap();
        // clear plus one shadow per letter of "HELLO"
        assert_eq!(r.encoded_commands(), 6);
    }
}
