//! Headless widget runner.
//!
//! Mounts one widget against a fixed-size surface, fires frames at a fixed
//! step, and prints JSON-lines snapshots of the state. Useful for tuning
//! configs and for checking that a seed replays identically.
//!
//! ```text
//! folio-sim pong --frames 600 --every 60
//! folio-sim orbit --config orbit.json --step-ms 33 --paint
//! RUST_LOG=debug folio-sim gaze --pointer 0.8,-0.4
//! ```

mod headless;

use anyhow::{Context, Result, bail};
use clap::Parser;
use folio_core::{
    AnimationComponent, FolioConfig, LifecycleState, MountEnv, PointerHub, PointerPosition,
    SurfaceMeasure, WidgetConfig, WidgetId, WidgetKind, WidgetSim, WidgetState,
};
use folio_render::{Theme, VelloRenderer};
use headless::HeadlessScheduler;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio-sim", version)]
struct Cli {
    /// Widget to run: bounce, pong, orbit, gaze, clouds.
    kind: WidgetKind,

    /// JSON config file. Its widget kind must match `kind`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Host frame interval in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    step_ms: f64,

    /// Randomize each frame interval by up to ± this many milliseconds.
    #[arg(long, default_value_t = 0.0)]
    jitter_ms: f64,

    /// Print a snapshot every N frames.
    #[arg(long, default_value_t = 60)]
    every: u64,

    /// Override the seed of seeded widgets (pong, orbit, clouds).
    #[arg(long)]
    seed: Option<u64>,

    /// Surface width in CSS pixels.
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Surface height in CSS pixels.
    #[arg(long, default_value_t = 360.0)]
    height: f64,

    /// Device pixel ratio reported by the fake host.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Fixed pointer position as `x,y` in [-1, 1].
    #[arg(long, value_parser = parse_pointer)]
    pointer: Option<PointerPosition>,

    /// Mount as if the user prefers reduced motion.
    #[arg(long)]
    reduced_motion: bool,

    /// Paint each snapshot frame and report the draw-command count.
    #[arg(long)]
    paint: bool,

    /// Use the dark palette when painting.
    #[arg(long)]
    dark: bool,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    widget: WidgetId,
    frame: u64,
    t_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<usize>,
    state: &'a WidgetState,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let stdout = std::io::stdout();
    run(&cli, config, &mut stdout.lock())
}

fn load_config(cli: &Cli) -> Result<FolioConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            FolioConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => FolioConfig::new(WidgetConfig::default_for(cli.kind)),
    };
    if config.widget.kind() != cli.kind {
        bail!(
            "config is for `{}`, not `{}`",
            config.widget.kind(),
            cli.kind
        );
    }
    if let Some(seed) = cli.seed
        && !apply_seed(&mut config.widget, seed)
    {
        log::warn!("{} is not seeded; ignoring --seed", cli.kind);
    }
    Ok(config)
}

/// Replace the seed of a seeded widget. Returns `false` for unseeded kinds.
fn apply_seed(widget: &mut WidgetConfig, seed: u64) -> bool {
    match widget {
        WidgetConfig::Pong(c) => c.seed = seed,
        WidgetConfig::Orbit(c) => c.seed = seed,
        WidgetConfig::Clouds(c) => c.seed = seed,
        WidgetConfig::Bounce(_) | WidgetConfig::Gaze(_) => return false,
    }
    true
}

fn parse_pointer(s: &str) -> Result<PointerPosition, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let coord = |v: &str| -> Result<f64, String> {
        let v: f64 = v.trim().parse().map_err(|e| format!("`{v}`: {e}"))?;
        if (-1.0..=1.0).contains(&v) {
            Ok(v)
        } else {
            Err(format!("{v} is outside [-1, 1]"))
        }
    };
    Ok(PointerPosition {
        x: coord(x)?,
        y: coord(y)?,
    })
}

fn run(cli: &Cli, config: FolioConfig, out: &mut impl Write) -> Result<()> {
    if !(cli.step_ms.is_finite() && cli.step_ms > 0.0) {
        bail!("--step-ms must be positive, got {}", cli.step_ms);
    }
    if !(cli.jitter_ms.is_finite() && cli.jitter_ms >= 0.0) {
        bail!("--jitter-ms must be non-negative, got {}", cli.jitter_ms);
    }
    let every = cli.every.max(1);
    let mut jitter = fastrand::Rng::with_seed(cli.seed.unwrap_or(0));

    let sim = WidgetSim::from_config(&config.widget)?;
    let renderer = VelloRenderer::new(Theme::for_mode(cli.dark));
    let mut component = AnimationComponent::new(
        WidgetId::next(cli.kind),
        sim,
        renderer,
        &config.animation,
    );

    let pointer = cli.pointer.map(|pos| {
        let hub = PointerHub::new();
        hub.publish(pos);
        hub
    });
    let env = MountEnv {
        measure: Some(SurfaceMeasure::new(cli.width, cli.height, cli.dpr)),
        reduced_motion: cli.reduced_motion,
        pointer,
    };
    let mut scheduler = HeadlessScheduler::new();
    let lifecycle = component.mount(env, &mut scheduler)?;
    log::info!("{} mounted {lifecycle:?}", component.id());

    let mut now_ms = 0.0;
    write_snapshot(out, &mut component, cli.paint, 0, now_ms)?;

    if lifecycle == LifecycleState::Running {
        for frame in 1..=cli.frames {
            if scheduler.take_pending().is_none() {
                log::warn!("no frame pending after {} frames; stopping", frame - 1);
                break;
            }
            now_ms += frame_interval(cli.step_ms, cli.jitter_ms, &mut jitter);
            component.on_frame(now_ms, &mut scheduler);
            if frame % every == 0 {
                write_snapshot(out, &mut component, cli.paint, frame, now_ms)?;
            }
        }
    }

    component.unmount(&mut scheduler);
    out.flush()?;
    Ok(())
}

/// One host frame interval. Jitter can make it zero but never negative.
fn frame_interval(step_ms: f64, jitter_ms: f64, rng: &mut fastrand::Rng) -> f64 {
    if jitter_ms == 0.0 {
        return step_ms;
    }
    (step_ms + (rng.f64() * 2.0 - 1.0) * jitter_ms).max(0.0)
}

fn write_snapshot(
    out: &mut impl Write,
    component: &mut AnimationComponent<WidgetSim, VelloRenderer>,
    paint: bool,
    frame: u64,
    t_ms: f64,
) -> Result<()> {
    let commands = if paint && component.repaint() {
        Some(component.renderer().encoded_commands())
    } else {
        None
    };
    let Some(state) = component.state() else {
        bail!("{} has no state to report", component.id());
    };
    let line = serde_json::to_string(&Snapshot {
        widget: component.id(),
        frame,
        t_ms,
        commands,
        state,
    })?;
    writeln!(out, "{line}")?;
    Ok(())
}
