//! Backend-neutral display list.
//!
//! Painters turn a widget state into a [`DisplayList`] in CSS pixels; each
//! backend replays it under its own device-pixel transform. A list always
//! starts with a full-surface [`DrawCmd::Clear`], so replaying one never
//! leaves residue from the previous frame.

use crate::color::Color;
use kurbo::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole surface.
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillEllipse {
        center: Point,
        rx: f64,
        ry: f64,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
        width: f64,
        color: Color,
    },
    /// Text anchored at its baseline.
    Text {
        at: Point,
        text: String,
        size: f64,
        align: TextAlign,
        color: Color,
    },
}

/// Ordered draw commands for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    width: f64,
    height: f64,
    cmds: Vec<DrawCmd>,
}

impl DisplayList {
    /// Start a frame of `width × height` CSS pixels cleared to `background`.
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Self {
            width,
            height,
            cmds: vec![DrawCmd::Clear(background)],
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::FillRect { rect, color });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.fill_ellipse(center, radius, radius, color);
    }

    pub fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Color) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.push(DrawCmd::FillEllipse {
            center,
            rx,
            ry,
            color,
        });
    }

    pub fn line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn polyline(&mut self, points: Vec<Point>, closed: bool, width: f64, color: Color) {
        if points.len() < 2 {
            return;
        }
        self.push(DrawCmd::Polyline {
            points,
            closed,
            width,
            color,
        });
    }

    pub fn text(&mut self, at: Point, text: impl Into<String>, size: f64, align: TextAlign, color: Color) {
        self.push(DrawCmd::Text {
            at,
            text: text.into(),
            size,
            align,
            color,
        });
    }
}
