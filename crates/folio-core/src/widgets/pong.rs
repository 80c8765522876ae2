//! Two-paddle game played by two simple AIs.
//!
//! Speeds are in field units per nominal tick. Each update advances by
//! `ticks(dt)` ticks, so a clamped 50 ms frame moves the ball at most three
//! ticks' worth.
//!
//! ## Rules
//!
//! | Event | Effect |
//! |-------|--------|
//! | Ball hits top/bottom wall | `vy` reflects, `vx` unchanged |
//! | Ball hits a paddle | `vx` reflects (slightly faster), `vy` bends by hit offset |
//! | Ball leaves left/right edge | opposite side scores, ball re-served |
//! | A score reaches `winning_score` | game over; reset after `reset_delay_ms` |
//! | Ball barely moves for `stuck_ticks` ticks | random velocity kick |

use crate::config::require_positive;
use crate::error::ConfigError;
use crate::sim::{FrameInput, Simulation, ticks};
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    pub field_width: f64,
    pub field_height: f64,
    pub paddle_width: f64,
    pub paddle_height: f64,
    /// Gap between a field edge and the outer face of its paddle.
    pub paddle_inset: f64,
    /// Paddle travel per tick.
    pub paddle_speed: f64,
    /// Paddles ignore targets closer than this, to avoid jitter.
    pub deadband: f64,
    pub ball_radius: f64,
    /// Per-axis ball speed of the opening serve.
    pub serve_speed: f64,
    /// Speed multiplier applied to `vx` on each paddle hit.
    pub hit_speedup: f64,
    /// How strongly the hit offset bends `vy`.
    pub spin: f64,
    pub max_speed: f64,
    pub winning_score: u32,
    pub reset_delay_ms: f64,
    /// Per-tick displacement below which a tick counts as stuck.
    pub stuck_threshold: f64,
    pub stuck_ticks: u32,
    pub kick_min: f64,
    pub kick_max: f64,
    pub seed: u64,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 400.0,
            paddle_width: 8.0,
            paddle_height: 60.0,
            paddle_inset: 12.0,
            paddle_speed: 2.5,
            deadband: 10.0,
            ball_radius: 5.0,
            serve_speed: 2.0,
            hit_speedup: 1.05,
            spin: 1.5,
            max_speed: 7.0,
            winning_score: 7,
            reset_delay_ms: 3000.0,
            stuck_threshold: 0.5,
            stuck_ticks: 90,
            kick_min: 2.0,
            kick_max: 4.0,
            seed: 0x5EED_F011,
        }
    }
}

impl PongConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("field_width", self.field_width)?;
        require_positive("field_height", self.field_height)?;
        require_positive("paddle_width", self.paddle_width)?;
        require_positive("paddle_height", self.paddle_height)?;
        require_positive("ball_radius", self.ball_radius)?;
        require_positive("serve_speed", self.serve_speed)?;
        require_positive("max_speed", self.max_speed)?;
        require_positive("kick_min", self.kick_min)?;
        if self.paddle_height >= self.field_height {
            return Err(ConfigError::invalid(
                "paddle_height",
                "must be smaller than field_height",
            ));
        }
        if 2.0 * (self.paddle_inset + self.paddle_width) >= self.field_width {
            return Err(ConfigError::invalid("paddle_inset", "paddles overlap"));
        }
        if self.winning_score == 0 {
            return Err(ConfigError::invalid("winning_score", "must be at least 1"));
        }
        if self.kick_min > self.kick_max {
            return Err(ConfigError::invalid("kick_min", "must not exceed kick_max"));
        }
        if self.reset_delay_ms < 0.0 {
            return Err(ConfigError::invalid("reset_delay_ms", "must not be negative"));
        }
        Ok(())
    }
}

// ─── State ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
}

/// Field geometry, copied into the state so painters need nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PongField {
    pub width: f64,
    pub height: f64,
    pub paddle_width: f64,
    pub paddle_height: f64,
    pub paddle_inset: f64,
    pub ball_radius: f64,
}

impl PongField {
    /// x of the face the ball bounces off, for each paddle.
    pub fn paddle_face(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.paddle_inset + self.paddle_width,
            Side::Right => self.width - self.paddle_inset - self.paddle_width,
        }
    }

    /// Left edge of the paddle rectangle.
    pub fn paddle_x(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.paddle_inset,
            Side::Right => self.width - self.paddle_inset - self.paddle_width,
        }
    }

    fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    fn bump(&mut self, side: Side) -> u32 {
        match side {
            Side::Left => {
                self.left += 1;
                self.left
            }
            Side::Right => {
                self.right += 1;
                self.right
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PongPhase {
    Playing,
    Over { winner: Side, elapsed_ms: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongState {
    pub field: PongField,
    pub ball: Ball,
    /// Paddle centers (y).
    pub left_y: f64,
    pub right_y: f64,
    pub score: Score,
    pub phase: PongPhase,
    /// Nominal ticks of near-zero ball displacement since the ball last
    /// moved, so the watchdog delay does not depend on frame rate.
    pub stuck_ticks: f64,
    pub rng_seed: u64,
}

impl PongState {
    pub fn paddle_y(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_y,
            Side::Right => self.right_y,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, PongPhase::Over { .. })
    }
}

// ─── Simulation ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PongSim {
    config: PongConfig,
}

impl PongSim {
    pub fn new(config: PongConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PongConfig {
        &self.config
    }

    fn field(&self) -> PongField {
        let c = &self.config;
        PongField {
            width: c.field_width,
            height: c.field_height,
            paddle_width: c.paddle_width,
            paddle_height: c.paddle_height,
            paddle_inset: c.paddle_inset,
            ball_radius: c.ball_radius,
        }
    }

    /// Ball to center, random horizontal direction and vertical slope.
    fn serve(&self, s: &mut PongState, rng: &mut fastrand::Rng) {
        let speed = self.config.serve_speed;
        let vx = if rng.bool() { speed } else { -speed };
        let vy = random_component(rng, speed * 0.25, speed * 0.75);
        s.ball = Ball {
            pos: s.field.center(),
            vel: DVec2::new(vx, vy),
        };
        s.stuck_ticks = 0.0;
    }

    fn track(&self, paddle_y: f64, target: f64, n: f64) -> f64 {
        let c = &self.config;
        let diff = target - paddle_y;
        let moved = if diff.abs() > c.deadband {
            paddle_y + diff.signum() * diff.abs().min(c.paddle_speed * n)
        } else {
            paddle_y
        };
        let half = c.paddle_height / 2.0;
        moved.clamp(half, c.field_height - half)
    }

    fn move_paddles(&self, s: &mut PongState, n: f64) {
        let mid = s.field.height / 2.0;
        // each AI follows the ball only while it is incoming
        let left_target = if s.ball.vel.x < 0.0 { s.ball.pos.y } else { mid };
        let right_target = if s.ball.vel.x > 0.0 { s.ball.pos.y } else { mid };
        s.left_y = self.track(s.left_y, left_target, n);
        s.right_y = self.track(s.right_y, right_target, n);
    }

    fn bounce_walls(&self, s: &mut PongState) {
        let r = s.field.ball_radius;
        let ball = &mut s.ball;
        if ball.pos.y - r <= 0.0 {
            ball.pos.y = r;
            ball.vel.y = ball.vel.y.abs();
        } else if ball.pos.y + r >= s.field.height {
            ball.pos.y = s.field.height - r;
            ball.vel.y = -ball.vel.y.abs();
        }
    }

    fn bounce_paddles(&self, s: &mut PongState, before: DVec2) {
        let f = s.field;
        let r = f.ball_radius;
        let half = f.paddle_height / 2.0;

        if s.ball.vel.x < 0.0 {
            let face = f.paddle_face(Side::Left);
            let reached = s.ball.pos.x - r <= face && before.x - r >= face - f.paddle_width;
            let offset = s.ball.pos.y - s.left_y;
            if reached && offset.abs() <= half + r {
                s.ball.pos.x = face + r;
                s.ball.vel = self.deflect(s.ball.vel, offset / half, 1.0);
            }
        } else if s.ball.vel.x > 0.0 {
            let face = f.paddle_face(Side::Right);
            let reached = s.ball.pos.x + r >= face && before.x + r <= face + f.paddle_width;
            let offset = s.ball.pos.y - s.right_y;
            if reached && offset.abs() <= half + r {
                s.ball.pos.x = face - r;
                s.ball.vel = self.deflect(s.ball.vel, offset / half, -1.0);
            }
        }
    }

    fn deflect(&self, vel: DVec2, offset: f64, direction: f64) -> DVec2 {
        let c = &self.config;
        let vx = (vel.x.abs() * c.hit_speedup).min(c.max_speed) * direction;
        let vy = (vel.y + offset.clamp(-1.0, 1.0) * c.spin).clamp(-c.max_speed, c.max_speed);
        DVec2::new(vx, vy)
    }

    /// Which side scored this tick, if the ball left the field.
    fn goal(&self, s: &PongState) -> Option<Side> {
        let r = s.field.ball_radius;
        if s.ball.pos.x + r < 0.0 {
            Some(Side::Right)
        } else if s.ball.pos.x - r > s.field.width {
            Some(Side::Left)
        } else {
            None
        }
    }

    fn step_over(&self, s: &mut PongState, rng: &mut fastrand::Rng, dt: f64) {
        let PongPhase::Over { winner, elapsed_ms } = s.phase else {
            return;
        };
        let elapsed_ms = elapsed_ms + dt * 1000.0;
        if elapsed_ms >= self.config.reset_delay_ms {
            log::debug!("pong: new match after {winner:?} won");
            s.score = Score::default();
            s.phase = PongPhase::Playing;
            self.serve(s, rng);
        } else {
            s.phase = PongPhase::Over { winner, elapsed_ms };
        }
    }

    fn step_playing(&self, s: &mut PongState, rng: &mut fastrand::Rng, dt: f64) {
        let c = &self.config;
        let n = ticks(dt);

        if s.stuck_ticks >= f64::from(c.stuck_ticks) {
            s.ball.vel = DVec2::new(
                random_component(rng, c.kick_min, c.kick_max),
                random_component(rng, c.kick_min, c.kick_max),
            );
            s.stuck_ticks = 0.0;
            log::debug!("pong: ball stuck, kicked to {:?}", s.ball.vel);
        }

        self.move_paddles(s, n);

        let before = s.ball.pos;
        s.ball.pos = before + s.ball.vel * n;
        self.bounce_walls(s);
        self.bounce_paddles(s, before);

        if let Some(side) = self.goal(s) {
            let points = s.score.bump(side);
            if points >= c.winning_score {
                log::debug!("pong: {side:?} wins {}-{}", s.score.left, s.score.right);
                s.ball = Ball {
                    pos: s.field.center(),
                    vel: DVec2::ZERO,
                };
                s.stuck_ticks = 0.0;
                s.phase = PongPhase::Over {
                    winner: side,
                    elapsed_ms: 0.0,
                };
            } else {
                self.serve(s, rng);
            }
            return;
        }

        if n > 0.0 {
            let moved = s.ball.pos - before;
            let (dx, dy) = (moved.x.abs() / n, moved.y.abs() / n);
            if dx < c.stuck_threshold && dy < c.stuck_threshold {
                s.stuck_ticks += n;
            } else {
                s.stuck_ticks = 0.0;
            }
        }
    }
}

impl Simulation for PongSim {
    type State = PongState;

    fn init(&self) -> PongState {
        let field = self.field();
        let speed = self.config.serve_speed;
        PongState {
            field,
            ball: Ball {
                pos: field.center(),
                vel: DVec2::new(speed, speed),
            },
            left_y: field.height / 2.0,
            right_y: field.height / 2.0,
            score: Score::default(),
            phase: PongPhase::Playing,
            stuck_ticks: 0.0,
            rng_seed: self.config.seed,
        }
    }

    fn update(&self, prev: &PongState, dt: f64, _input: &FrameInput) -> PongState {
        let mut s = prev.clone();
        let mut rng = fastrand::Rng::with_seed(s.rng_seed);
        match s.phase {
            PongPhase::Over { .. } => self.step_over(&mut s, &mut rng, dt),
            PongPhase::Playing => self.step_playing(&mut s, &mut rng, dt),
        }
        s.rng_seed = rng.get_seed();
        s
    }
}

/// Random value with magnitude in `[min, max]` and random sign.
fn random_component(rng: &mut fastrand::Rng, min: f64, max: f64) -> f64 {
    let magnitude = min + (max - min) * rng.f64();
    if rng.bool() { magnitude } else { -magnitude }
}
