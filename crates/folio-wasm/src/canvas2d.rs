//! Canvas2D backend.
//!
//! Replays a [`DisplayList`] onto an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. The context transform maps CSS pixels to
//! backing pixels, so painters never see the device pixel ratio.

use folio_core::{RenderError, Renderer, SurfaceDescriptor, WidgetState};
use folio_render::{DisplayList, DrawCmd, TextAlign, Theme, paint_widget};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FONT_STACK: &str = "-apple-system, BlinkMacSystemFont, 'Inter', 'Segoe UI', sans-serif";

/// Draw a display list. Expects the CSS → device transform to be set.
pub fn replay(ctx: &CanvasRenderingContext2d, list: &DisplayList) {
    for cmd in list.commands() {
        match cmd {
            DrawCmd::Clear(color) => {
                ctx.clear_rect(0.0, 0.0, list.width(), list.height());
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, list.width(), list.height());
            }
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
            DrawCmd::FillEllipse {
                center,
                rx,
                ry,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.begin_path();
                let _ = ctx.ellipse(center.x, center.y, *rx, *ry, 0.0, 0.0, TAU);
                ctx.fill();
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width);
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
            }
            DrawCmd::Polyline {
                points,
                closed,
                width,
                color,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    continue;
                };
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width);
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                if *closed {
                    ctx.close_path();
                }
                ctx.stroke();
            }
            DrawCmd::Text {
                at,
                text,
                size,
                align,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_font(&format!("600 {size:.1}px {FONT_STACK}"));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                    TextAlign::Right => "right",
                });
                ctx.set_text_baseline("alphabetic");
                let _ = ctx.fill_text(text, at.x, at.y);
            }
        }
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Canvas2D renderer for widget states. Owns its canvas exclusively.
pub struct Canvas2dRenderer {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    theme: Theme,
}

impl Canvas2dRenderer {
    pub fn new(canvas: HtmlCanvasElement, theme: Theme) -> Self {
        let ctx = context_2d(&canvas);
        if ctx.is_none() {
            log::warn!("canvas #{}: 2d context unavailable", canvas.id());
        }
        Self { canvas, ctx, theme }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn context(&mut self) -> Result<&CanvasRenderingContext2d, RenderError> {
        if self.ctx.is_none() {
            self.ctx = context_2d(&self.canvas);
        }
        self.ctx
            .as_ref()
            .ok_or_else(|| RenderError::surface_unavailable(format!("canvas #{}", self.canvas.id())))
    }
}

impl Renderer<WidgetState> for Canvas2dRenderer {
    fn configure(&mut self, surface: &SurfaceDescriptor) -> Result<(), RenderError> {
        self.canvas.set_width(surface.backing_width);
        self.canvas.set_height(surface.backing_height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", surface.css_width));
        let _ = style.set_property("height", &format!("{}px", surface.css_height));

        // resizing the backing store resets the context transform
        let scale = surface.scale();
        self.context()?
            .set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
            .map_err(|e| RenderError::backend(format!("{e:?}")))
    }

    fn render(&mut self, state: &WidgetState, surface: &SurfaceDescriptor) -> Result<(), RenderError> {
        let list = paint_widget(state, surface, &self.theme);
        replay(self.context()?, &list);
        Ok(())
    }
}
