//! Integration tests: configured widgets driven through realistic frame
//! timelines.
//!
//! Timestamps come from a fake host clock; every update goes through the
//! same `FrameClock` the lifecycle manager uses.

use folio_core::widgets::orbit::{OrbitPhase, OrbitSim};
use folio_core::widgets::pong::{PongPhase, PongSim, Score};
use folio_core::{
    DVec2, FolioConfig, FrameClock, FrameInput, Simulation, TICK_SECONDS, WidgetConfig,
    WidgetKind, WidgetSim, WidgetState,
};

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Feed `frames` timestamps spaced `step_ms` apart through a clock.
fn run<S: Simulation>(sim: &S, start: S::State, frames: usize, step_ms: f64) -> S::State {
    let mut clock = FrameClock::new(50.0);
    let mut state = start;
    for i in 0..=frames {
        let dt = clock.tick(i as f64 * step_ms);
        state = sim.update(&state, dt, &FrameInput::default());
    }
    state
}

fn pong() -> PongSim {
    match FolioConfig::from_json(r#"{"widget":{"kind":"pong"}}"#).unwrap().widget {
        WidgetConfig::Pong(c) => PongSim::new(c),
        other => panic!("expected pong, got {other:?}"),
    }
}

// ─── Pong ────────────────────────────────────────────────────────────────

#[test]
fn long_frame_gap_moves_ball_at_most_three_ticks() {
    let sim = pong();
    let start = sim.init();
    let mut clock = FrameClock::new(50.0);
    clock.tick(0.0);
    // a 10 s tab-switch gap
    let dt = clock.tick(10_000.0);
    assert_eq!(dt, 0.05);

    let next = sim.update(&start, dt, &FrameInput::default());
    let moved = (next.ball.pos - start.ball.pos).length();
    let limit = start.ball.vel.length() * (0.05 / TICK_SECONDS);
    assert!(moved <= limit + 1e-9, "moved {moved}, limit {limit}");
}

#[test]
fn ball_bounces_between_walls_over_time() {
    let sim = pong();
    let mut state = sim.init();
    let mut clock = FrameClock::new(50.0);
    let mut flips = 0;
    for i in 0..=600 {
        let dt = clock.tick(i as f64 * 16.0);
        let next = sim.update(&state, dt, &FrameInput::default());
        if next.ball.vel.y.signum() != state.ball.vel.y.signum() && !next.is_over() {
            flips += 1;
        }
        let r = next.field.ball_radius;
        assert!(next.ball.pos.y >= r - 1e-9 && next.ball.pos.y <= next.field.height - r + 1e-9);
        state = next;
    }
    assert!(flips > 0, "ball never hit a wall");
}

#[test]
fn match_point_then_reset_after_three_seconds() {
    let sim = pong();
    let mut state = sim.init();
    state.score = Score { left: 3, right: 6 };
    state.ball.pos = DVec2::new(-state.field.ball_radius + 1.0, 30.0);
    state.ball.vel = DVec2::new(-4.0, 0.0);
    state.left_y = state.field.height - state.field.paddle_height / 2.0;

    let over = sim.update(&state, TICK_SECONDS, &FrameInput::default());
    assert_eq!(over.score, Score { left: 3, right: 7 });
    assert!(over.is_over());

    // 2.9 s of frames at 60 fps: still over, ball parked
    let held = run(&sim, over.clone(), 174, 1000.0 / 60.0);
    assert!(held.is_over());
    assert_eq!(held.ball, over.ball);

    let restarted = run(&sim, held, 12, 1000.0 / 60.0);
    assert_eq!(restarted.phase, PongPhase::Playing);
    assert_eq!(restarted.score, Score::default());
}

#[test]
fn stalled_ball_is_kicked_back_into_play() {
    let sim = pong();
    let mut state = sim.init();
    state.ball.vel = DVec2::new(0.1, -0.1);
    let after = run(&sim, state, 95, 1000.0 / 60.0);
    let v = after.ball.vel;
    assert!(v.x.abs() >= 2.0 && v.y.abs() >= 2.0, "not kicked: {v:?}");
}

// ─── Orbit ───────────────────────────────────────────────────────────────

#[test]
fn orbit_collides_and_resets_on_a_real_timeline() {
    let sim = OrbitSim::new(Default::default());
    let initial = sim.init();
    let mut clock = FrameClock::new(50.0);
    let mut state = initial.clone();
    let mut collided_at = None;
    let mut reset_at = None;

    for i in 0..=600 {
        let now = i as f64 * 1000.0 / 60.0;
        let next = sim.update(&state, clock.tick(now), &FrameInput::default());
        let was = matches!(state.phase, OrbitPhase::Collided { .. });
        let is = matches!(next.phase, OrbitPhase::Collided { .. });
        if !was && is && collided_at.is_none() {
            collided_at = Some(now);
            assert_eq!(next.bodies.iter().filter(|b| b.destroyed).count(), 2);
            assert!(!next.particles.is_empty());
        }
        if was && !is && reset_at.is_none() {
            reset_at = Some(now);
            assert_eq!(next.bodies, initial.bodies);
            assert!(next.particles.is_empty());
        }
        state = next;
    }

    let (hit, reset) = (collided_at.unwrap(), reset_at.unwrap());
    let delay = reset - hit;
    assert!((2990.0..=3020.0).contains(&delay), "reset after {delay} ms");
}

// ─── Catalog ─────────────────────────────────────────────────────────────

#[test]
fn every_widget_runs_a_second_of_frames() {
    for kind in WidgetKind::ALL {
        let sim = WidgetSim::from_config(&WidgetConfig::default_for(kind)).unwrap();
        let state = run(&sim, sim.init(), 60, 1000.0 / 60.0);
        assert_eq!(state.kind(), kind);
        if let WidgetState::Bounce(b) = &state {
            assert_eq!(b.letters.len(), 5);
        }
    }
}

#[test]
fn replays_are_deterministic() {
    for kind in WidgetKind::ALL {
        let sim = WidgetSim::from_config(&WidgetConfig::default_for(kind)).unwrap();
        let a = run(&sim, sim.init(), 300, 23.0);
        let b = run(&sim, sim.init(), 300, 23.0);
        assert_eq!(a, b, "{kind} diverged");
    }
}
