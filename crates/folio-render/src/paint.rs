//! Widget state → display list.
//!
//! Painters are pure: they read a state and the surface geometry and emit
//! commands in CSS pixels. Logical widget coordinates are scaled to fit the
//! surface, centered, with the aspect ratio preserved.

use crate::scene::{DisplayList, TextAlign};
use crate::theme::Theme;
use folio_core::widgets::bounce::BounceState;
use folio_core::widgets::clouds::CloudsState;
use folio_core::widgets::gaze::GazeState;
use folio_core::widgets::orbit::{OrbitPhase, OrbitState, orbit_position};
use folio_core::widgets::pong::{PongPhase, PongState, Side};
use folio_core::{DMat3, DVec3, SurfaceDescriptor, WidgetState};
use kurbo::{Point, Rect};
use std::f64::consts::TAU;

/// Paint any widget state onto a fresh display list.
pub fn paint_widget(state: &WidgetState, surface: &SurfaceDescriptor, theme: &Theme) -> DisplayList {
    let mut list = DisplayList::new(surface.css_width, surface.css_height, theme.background);
    match state {
        WidgetState::Bounce(s) => paint_bounce(&mut list, s, theme),
        WidgetState::Pong(s) => paint_pong(&mut list, s, surface, theme),
        WidgetState::Orbit(s) => paint_orbit(&mut list, s, theme),
        WidgetState::Gaze(s) => paint_gaze(&mut list, s, theme),
        WidgetState::Clouds(s) => paint_clouds(&mut list, s, theme),
    }
    list
}

// ─── Bounce ──────────────────────────────────────────────────────────────

/// Advance per letter, as a fraction of the font size.
const LETTER_ADVANCE: f64 = 0.72;

fn paint_bounce(list: &mut DisplayList, s: &BounceState, theme: &Theme) {
    let advance = s.font_size * LETTER_ADVANCE;
    let total = advance * s.letters.len() as f64;
    // shrink long words to fit the surface width
    let shrink = (list.width() * 0.9 / total).min(1.0);
    let advance = advance * shrink;
    let start = (list.width() - advance * s.letters.len() as f64) / 2.0 + advance / 2.0;
    let baseline = list.height() / 2.0 + s.font_size * shrink * 0.35;

    for (i, letter) in s.letters.iter().enumerate() {
        if letter.ch.is_whitespace() {
            continue;
        }
        let x = start + i as f64 * advance;
        // the shadow narrows as its letter rises
        let lift = (letter.offset_y / s.font_size).clamp(0.0, 1.0);
        let shadow_rx = advance * 0.35 * (1.0 - 0.5 * lift);
        list.fill_ellipse(
            Point::new(x, baseline + s.font_size * shrink * 0.12),
            shadow_rx,
            shadow_rx * 0.25,
            theme.muted.with_alpha(0.35),
        );

        let color = if i % 2 == 0 { theme.foreground } else { theme.accent };
        list.text(
            Point::new(x, baseline - letter.offset_y * shrink),
            letter.ch.to_string(),
            s.font_size * shrink * letter.scale,
            TextAlign::Center,
            color,
        );
    }
}

// ─── Pong ────────────────────────────────────────────────────────────────

fn paint_pong(list: &mut DisplayList, s: &PongState, surface: &SurfaceDescriptor, theme: &Theme) {
    let f = &s.field;
    let k = surface.fit(f.width, f.height);
    let ox = (list.width() - f.width * k) / 2.0;
    let oy = (list.height() - f.height * k) / 2.0;
    let at = |x: f64, y: f64| Point::new(ox + x * k, oy + y * k);

    // center net
    let dash = f.height / 20.0;
    let mut y = 0.0;
    while y < f.height {
        let top = at(f.width / 2.0 - 1.0, y);
        let bottom = at(f.width / 2.0 + 1.0, y + dash * 0.6);
        list.fill_rect(Rect::from_points(top, bottom), theme.muted.with_alpha(0.5));
        y += dash;
    }

    for side in [Side::Left, Side::Right] {
        let x = f.paddle_x(side);
        let cy = s.paddle_y(side);
        let rect = Rect::from_points(
            at(x, cy - f.paddle_height / 2.0),
            at(x + f.paddle_width, cy + f.paddle_height / 2.0),
        );
        list.fill_rect(rect, theme.foreground);
    }

    let score_size = (f.height * k * 0.12).max(10.0);
    list.text(
        at(f.width * 0.25, f.height * 0.15),
        s.score.left.to_string(),
        score_size,
        TextAlign::Center,
        theme.muted,
    );
    list.text(
        at(f.width * 0.75, f.height * 0.15),
        s.score.right.to_string(),
        score_size,
        TextAlign::Center,
        theme.muted,
    );

    match s.phase {
        PongPhase::Playing => {
            list.fill_circle(at(s.ball.pos.x, s.ball.pos.y), f.ball_radius * k, theme.accent);
        }
        PongPhase::Over { winner, .. } => {
            let label = match winner {
                Side::Left => "PLAYER WINS",
                Side::Right => "CPU WINS",
            };
            list.text(
                at(f.width / 2.0, f.height / 2.0),
                label,
                score_size * 0.8,
                TextAlign::Center,
                theme.accent_alt,
            );
        }
    }
}

// ─── Orbit ───────────────────────────────────────────────────────────────

const ORBIT_SAMPLES: usize = 72;

/// Orthographic view of the orbit scene, tilted toward the viewer.
struct OrbitView {
    center: Point,
    scale: f64,
    yaw: f64,
}

impl OrbitView {
    const TILT: f64 = 0.35;

    fn project(&self, p: DVec3) -> Point {
        let p = DMat3::from_rotation_y(self.yaw) * p;
        let (sin_t, cos_t) = Self::TILT.sin_cos();
        let y = p.y * cos_t - p.z * sin_t;
        Point::new(self.center.x + p.x * self.scale, self.center.y - y * self.scale)
    }
}

fn paint_orbit(list: &mut DisplayList, s: &OrbitState, theme: &Theme) {
    let reach = s
        .bodies
        .iter()
        .map(|b| b.radius)
        .fold(1.0_f64, f64::max);
    let view = OrbitView {
        center: Point::new(list.width() / 2.0, list.height() / 2.0),
        scale: list.width().min(list.height()) / (2.0 * reach * 1.15),
        yaw: s.camera_yaw,
    };

    // planet
    list.fill_circle(view.center, view.scale * 0.9, theme.accent.with_alpha(0.85));

    for body in &s.bodies {
        let points = (0..ORBIT_SAMPLES)
            .map(|i| {
                let angle = i as f64 / ORBIT_SAMPLES as f64 * TAU;
                view.project(orbit_position(body.radius, body.inclination, angle))
            })
            .collect();
        list.polyline(points, true, 1.0, theme.muted.with_alpha(0.4));
    }

    for body in s.live_bodies() {
        list.fill_circle(view.project(body.position()), 4.0, theme.foreground);
    }

    for p in &s.particles {
        list.fill_circle(view.project(p.pos), 2.0, theme.accent_alt.fade(p.alpha()));
    }

    if let OrbitPhase::Collided { .. } = s.phase {
        list.text(
            Point::new(list.width() / 2.0, list.height() - 12.0),
            "COLLISION",
            12.0,
            TextAlign::Center,
            theme.accent_alt,
        );
    }
}

// ─── Gaze ────────────────────────────────────────────────────────────────

fn paint_gaze(list: &mut DisplayList, s: &GazeState, theme: &Theme) {
    let r = list.width().min(list.height()) * 0.38;
    let center = Point::new(list.width() / 2.0, list.height() / 2.0);
    // head turns: features shift toward the look direction
    let shift_x = s.yaw.sin() * r * 0.45;
    let shift_y = s.pitch.sin() * r * 0.45;

    list.fill_circle(center, r, theme.foreground.with_alpha(0.12));

    let eye_r = r * 0.16;
    for dir in [-1.0, 1.0] {
        let eye = Point::new(center.x + dir * r * 0.35 + shift_x, center.y - r * 0.1 + shift_y);
        list.fill_ellipse(eye, eye_r, eye_r * s.eye_open.max(0.05), theme.cloud);
        if s.eye_open > 0.3 {
            let pupil = Point::new(eye.x + shift_x * 0.25, eye.y + shift_y * 0.25);
            list.fill_circle(pupil, eye_r * 0.45, theme.foreground);
        }
    }

    let mouth_y = center.y + r * 0.45 + shift_y;
    list.line(
        Point::new(center.x - r * 0.25 + shift_x, mouth_y),
        Point::new(center.x + r * 0.25 + shift_x, mouth_y),
        2.0,
        theme.muted,
    );
}

// ─── Clouds ──────────────────────────────────────────────────────────────

fn paint_clouds(list: &mut DisplayList, s: &CloudsState, theme: &Theme) {
    let (w, h) = (list.width(), list.height());
    list.fill_rect(Rect::new(0.0, 0.0, w, h), theme.sky);
    for cloud in &s.clouds {
        let cw = cloud.size * w;
        let c = Point::new(cloud.pos.x * w, cloud.pos.y * h);
        let puff = theme.cloud.with_alpha(0.9);
        list.fill_ellipse(c, cw * 0.5, cw * 0.22, puff);
        list.fill_circle(Point::new(c.x - cw * 0.18, c.y - cw * 0.1), cw * 0.2, puff);
        list.fill_circle(Point::new(c.x + cw * 0.12, c.y - cw * 0.16), cw * 0.26, puff);
    }
}
