//! Integration tests: simulated widget states → display lists.

use folio_core::widgets::orbit::OrbitSim;
use folio_core::widgets::pong::{PongSim, Score};
use folio_core::{
    DVec2, FrameInput, Simulation, SurfaceDescriptor, SurfaceMeasure, TICK_SECONDS, WidgetState,
};
use folio_render::{DrawCmd, Theme, paint_widget};

fn surface() -> SurfaceDescriptor {
    SurfaceDescriptor::compute(SurfaceMeasure::new(640.0, 320.0, 1.0), 2.0).unwrap()
}

fn texts(state: &WidgetState) -> Vec<String> {
    paint_widget(state, &surface(), &Theme::light())
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn pong_shows_score_and_winner() {
    let sim = PongSim::new(Default::default());
    let mut s = sim.init();
    s.score = Score { left: 6, right: 2 };
    s.ball.pos = DVec2::new(s.field.width + s.field.ball_radius - 1.0, 100.0);
    s.ball.vel = DVec2::new(5.0, 0.0);

    assert_eq!(texts(&WidgetState::Pong(s.clone())), vec!["6", "2"]);

    let over = sim.update(&s, TICK_SECONDS, &FrameInput::default());
    assert_eq!(texts(&WidgetState::Pong(over)), vec!["7", "2", "PLAYER WINS"]);
}

#[test]
fn orbit_collision_paints_burst_and_hides_wreckage() {
    let sim = OrbitSim::new(Default::default());
    let mut s = sim.init();
    let before = paint_widget(&WidgetState::Orbit(s.clone()), &surface(), &Theme::dark());
    while s.particles.is_empty() {
        s = sim.update(&s, TICK_SECONDS, &FrameInput::default());
    }
    let after = paint_widget(&WidgetState::Orbit(s.clone()), &surface(), &Theme::dark());

    let circles = |cmds: &[DrawCmd]| {
        cmds.iter()
            .filter(|c| matches!(c, DrawCmd::FillEllipse { .. }))
            .count()
    };
    // planet + 3 bodies before; planet + 1 survivor + burst after
    assert_eq!(circles(before.commands()), 4);
    assert_eq!(circles(after.commands()), 2 + s.particles.len());
    assert!(texts(&WidgetState::Orbit(s)).contains(&"COLLISION".to_string()));
}

#[test]
fn every_frame_is_a_full_repaint() {
    let sim = PongSim::new(Default::default());
    let mut s = sim.init();
    for _ in 0..30 {
        s = sim.update(&s, TICK_SECONDS, &FrameInput::default());
        let list = paint_widget(&WidgetState::Pong(s.clone()), &surface(), &Theme::dark());
        let clears = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::Clear(_)))
            .count();
        assert_eq!(clears, 1);
        assert!(matches!(list.commands()[0], DrawCmd::Clear(_)));
    }
}
