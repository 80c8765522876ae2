//! Satellites on inclined circular orbits, with a collision burst.
//!
//! Decorative only: bodies follow fixed circles, no gravity. Two bodies whose
//! distance drops below `collision_distance` are destroyed on the same tick,
//! a particle burst spawns at their midpoint, and after `reset_delay_ms` the
//! scene starts over.

use crate::config::require_positive;
use crate::error::ConfigError;
use crate::sim::{FrameInput, Simulation, ticks};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// One orbit, angles in degrees as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub radius: f64,
    pub inclination_deg: f64,
    pub start_deg: f64,
    /// Signed angular step per tick.
    pub step_deg: f64,
}

impl BodySpec {
    fn new(name: &str, radius: f64, inclination_deg: f64, start_deg: f64, step_deg: f64) -> Self {
        Self {
            name: name.to_owned(),
            radius,
            inclination_deg,
            start_deg,
            step_deg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub bodies: Vec<BodySpec>,
    pub collision_distance: f64,
    pub reset_delay_ms: f64,
    pub burst_particles: u32,
    /// Particle speed per tick.
    pub burst_speed: f64,
    pub particle_life_s: f64,
    /// Camera yaw drift, radians per second.
    pub camera_drift: f64,
    pub seed: u64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            // sentinel and kestrel meet at (-3, 0, 0) after 150 ticks
            bodies: vec![
                BodySpec::new("sentinel", 3.0, 0.0, 90.0, 0.6),
                BodySpec::new("kestrel", 3.0, 55.0, 270.0, -0.6),
                BodySpec::new("relay", 4.5, 20.0, 0.0, 0.3),
            ],
            collision_distance: 0.5,
            reset_delay_ms: 3000.0,
            burst_particles: 24,
            burst_speed: 0.04,
            particle_life_s: 1.2,
            camera_drift: 0.05,
            seed: 0x0B17_C0DE,
        }
    }
}

impl OrbitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.len() < 2 {
            return Err(ConfigError::invalid(
                "bodies",
                format!("need at least 2 bodies, got {}", self.bodies.len()),
            ));
        }
        for body in &self.bodies {
            require_positive("bodies.radius", body.radius)?;
        }
        require_positive("collision_distance", self.collision_distance)?;
        require_positive("particle_life_s", self.particle_life_s)?;
        if self.reset_delay_ms < 0.0 {
            return Err(ConfigError::invalid("reset_delay_ms", "must not be negative"));
        }
        Ok(())
    }
}

// ─── State ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    pub radius: f64,
    /// Inclination in radians.
    pub inclination: f64,
    /// Current angle in radians, wrapped into `[0, 2π)`.
    pub angle: f64,
    pub destroyed: bool,
}

impl Body {
    fn from_spec(spec: &BodySpec) -> Self {
        Self {
            name: spec.name.clone(),
            radius: spec.radius,
            inclination: spec.inclination_deg.to_radians(),
            angle: spec.start_deg.to_radians().rem_euclid(TAU),
            destroyed: false,
        }
    }

    pub fn position(&self) -> DVec3 {
        orbit_position(self.radius, self.inclination, self.angle)
    }
}

/// Point on an inclined circle: `(r cos θ, r sin θ cos i, r sin θ sin i)`.
pub fn orbit_position(radius: f64, inclination: f64, angle: f64) -> DVec3 {
    let (sin_t, cos_t) = angle.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    DVec3::new(
        radius * cos_t,
        radius * sin_t * cos_i,
        radius * sin_t * sin_i,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec3,
    /// Velocity per tick.
    pub vel: DVec3,
    /// Remaining life in seconds.
    pub life: f64,
    pub max_life: f64,
}

impl Particle {
    /// Opacity in `[0, 1]`, fading linearly over the lifetime.
    pub fn alpha(&self) -> f64 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrbitPhase {
    Tracking,
    Collided { elapsed_ms: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    pub bodies: SmallVec<[Body; 4]>,
    pub particles: Vec<Particle>,
    pub phase: OrbitPhase,
    pub camera_yaw: f64,
    pub rng_seed: u64,
}

impl OrbitState {
    pub fn live_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.destroyed)
    }
}

// ─── Simulation ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OrbitSim {
    config: OrbitConfig,
}

impl OrbitSim {
    pub fn new(config: OrbitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    fn initial_bodies(&self) -> SmallVec<[Body; 4]> {
        self.config.bodies.iter().map(Body::from_spec).collect()
    }

    fn advance_bodies(&self, s: &mut OrbitState, n: f64) {
        for (body, spec) in s.bodies.iter_mut().zip(&self.config.bodies) {
            if body.destroyed {
                continue;
            }
            body.angle = (body.angle + spec.step_deg.to_radians() * n).rem_euclid(TAU);
        }
    }

    /// First live pair closer than the collision distance.
    fn find_collision(&self, s: &OrbitState) -> Option<(usize, usize)> {
        let bodies = &s.bodies;
        for i in 0..bodies.len() {
            if bodies[i].destroyed {
                continue;
            }
            for j in (i + 1)..bodies.len() {
                if bodies[j].destroyed {
                    continue;
                }
                let d = bodies[i].position().distance(bodies[j].position());
                if d < self.config.collision_distance {
                    return Some((i, j));
                }
            }
        }
        None
    }

    fn burst(&self, at: DVec3, rng: &mut fastrand::Rng) -> Vec<Particle> {
        let c = &self.config;
        (0..c.burst_particles)
            .map(|_| {
                // uniform direction on the sphere
                let z = rng.f64() * 2.0 - 1.0;
                let theta = rng.f64() * TAU;
                let ring = (1.0 - z * z).sqrt();
                let dir = DVec3::new(ring * theta.cos(), ring * theta.sin(), z);
                let speed = c.burst_speed * (0.5 + rng.f64());
                Particle {
                    pos: at,
                    vel: dir * speed,
                    life: c.particle_life_s,
                    max_life: c.particle_life_s,
                }
            })
            .collect()
    }

    fn step_particles(particles: &mut Vec<Particle>, dt: f64) {
        let n = ticks(dt);
        for p in particles.iter_mut() {
            p.pos = p.pos + p.vel * n;
            p.life -= dt;
        }
        particles.retain(|p| p.life > 0.0);
    }
}

impl Simulation for OrbitSim {
    type State = OrbitState;

    fn init(&self) -> OrbitState {
        OrbitState {
            bodies: self.initial_bodies(),
            particles: Vec::new(),
            phase: OrbitPhase::Tracking,
            camera_yaw: 0.0,
            rng_seed: self.config.seed,
        }
    }

    fn update(&self, prev: &OrbitState, dt: f64, _input: &FrameInput) -> OrbitState {
        let mut s = prev.clone();
        let mut rng = fastrand::Rng::with_seed(s.rng_seed);
        s.camera_yaw = (s.camera_yaw + self.config.camera_drift * dt).rem_euclid(TAU);
        Self::step_particles(&mut s.particles, dt);

        match s.phase {
            OrbitPhase::Collided { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + dt * 1000.0;
                if elapsed_ms >= self.config.reset_delay_ms {
                    log::debug!("orbit: resetting after collision");
                    s.bodies = self.initial_bodies();
                    s.particles.clear();
                    s.phase = OrbitPhase::Tracking;
                } else {
                    self.advance_bodies(&mut s, ticks(dt));
                    s.phase = OrbitPhase::Collided { elapsed_ms };
                }
            }
            OrbitPhase::Tracking => {
                self.advance_bodies(&mut s, ticks(dt));
                if let Some((i, j)) = self.find_collision(&s) {
                    let at = s.bodies[i].position().lerp(s.bodies[j].position(), 0.5);
                    log::debug!(
                        "orbit: {} and {} collided at {at:?}",
                        s.bodies[i].name,
                        s.bodies[j].name
                    );
                    s.bodies[i].destroyed = true;
                    s.bodies[j].destroyed = true;
                    let burst = self.burst(at, &mut rng);
                    s.particles.extend(burst);
                    s.phase = OrbitPhase::Collided { elapsed_ms: 0.0 };
                }
            }
        }

        s.rng_seed = rng.get_seed();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TICK_SECONDS;
    use pretty_assertions::assert_eq;

    fn step(sim: &OrbitSim, s: &OrbitState, dt: f64) -> OrbitState {
        sim.update(s, dt, &FrameInput::default())
    }

    fn run_until_collision(sim: &OrbitSim) -> (OrbitState, OrbitState, usize) {
        let mut s = sim.init();
        for tick in 1..=1000 {
            let next = step(sim, &s, TICK_SECONDS);
            if matches!(next.phase, OrbitPhase::Collided { .. }) {
                return (s, next, tick);
            }
            s = next;
        }
        panic!("no collision within 1000 ticks");
    }

    #[test]
    fn position_formula() {
        let p = orbit_position(2.0, std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!((p.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn default_bodies_collide_in_same_tick() {
        let sim = OrbitSim::new(OrbitConfig::default());
        let (before, after, tick) = run_until_collision(&sim);
        assert!((140..=150).contains(&tick), "collided at tick {tick}");

        let destroyed: Vec<&str> = after
            .bodies
            .iter()
            .filter(|b| b.destroyed)
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(destroyed, vec!["sentinel", "kestrel"]);
        assert!(before.bodies.iter().all(|b| !b.destroyed));
        assert!(!after.bodies[2].destroyed);

        let mid = after.bodies[0].position().lerp(after.bodies[1].position(), 0.5);
        assert_eq!(after.particles.len(), 24);
        assert!(after.particles.iter().all(|p| p.pos == mid));
        assert!(mid.distance(DVec3::new(-3.0, 0.0, 0.0)) < 0.5);
    }

    #[test]
    fn destroyed_bodies_stop_moving() {
        let sim = OrbitSim::new(OrbitConfig::default());
        let (_, after, _) = run_until_collision(&sim);
        let next = step(&sim, &after, TICK_SECONDS);
        assert_eq!(next.bodies[0].angle, after.bodies[0].angle);
        assert_eq!(next.bodies[1].angle, after.bodies[1].angle);
        assert!(next.bodies[2].angle != after.bodies[2].angle);
    }

    #[test]
    fn reset_restores_initial_angles() {
        let sim = OrbitSim::new(OrbitConfig::default());
        let initial = sim.init();
        let (_, mut s, _) = run_until_collision(&sim);

        for _ in 0..59 {
            s = step(&sim, &s, 0.05);
            assert!(matches!(s.phase, OrbitPhase::Collided { .. }));
        }
        s = step(&sim, &s, 0.05);
        assert_eq!(s.phase, OrbitPhase::Tracking);
        assert_eq!(s.bodies, initial.bodies);
        assert!(s.particles.is_empty());
    }

    #[test]
    fn particles_fade_and_expire() {
        let sim = OrbitSim::new(OrbitConfig::default());
        let (_, mut s, _) = run_until_collision(&sim);
        let start = s.particles[0].alpha();
        s = step(&sim, &s, 0.05);
        assert!(s.particles[0].alpha() < start);
        for _ in 0..30 {
            s = step(&sim, &s, 0.05);
        }
        // 1.55 s elapsed, past the 1.2 s lifetime
        assert!(s.particles.is_empty());
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let sim = OrbitSim::new(OrbitConfig::default());
        let s = sim.init();
        let next = step(&sim, &s, 0.0);
        assert_eq!(next, s);
    }

    #[test]
    fn needs_two_bodies() {
        let mut config = OrbitConfig::default();
        config.bodies.truncate(1);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least 2 bodies"));
    }
}
