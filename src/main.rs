//! Gridfire entry point
//!
//! Headless host: picks a character, runs the simulation on a fixed-step
//! clock with the autopilot at the controls, and reports the result.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use gridfire::Tuning;
use gridfire::platform::FixedStepper;
use gridfire::sim::{CharacterClass, GameState, TickInput, WorldSnapshot};

#[derive(Debug, Parser)]
#[command(name = "gridfire", about = "Run the arena simulation headless")]
struct Args {
    /// Character class by name or hotkey (1-4), or `none` to abort startup
    #[arg(long, default_value = "soldier")]
    class: String,

    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Stop after this many ticks if the run is still going
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Simulated host frame time in milliseconds
    #[arg(long, default_value_t = 16.667, value_parser = parse_frame_ms)]
    frame_ms: f32,

    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Print the final world snapshot, map layout included, as JSON
    #[arg(long)]
    json: bool,
}

/// Shortest frame the stepper can still accumulate into a tick
const MIN_FRAME_MS: f32 = 0.01;

fn parse_frame_ms(raw: &str) -> Result<f32, String> {
    let ms: f32 = raw.parse().map_err(|e| format!("`{raw}` is not a number: {e}"))?;
    if !ms.is_finite() || ms < MIN_FRAME_MS {
        return Err(format!("frame time must be at least {MIN_FRAME_MS} ms, got {raw}"));
    }
    Ok(ms)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let selection = if args.class.eq_ignore_ascii_case("none") {
        None
    } else {
        match CharacterClass::from_name(&args.class) {
            Some(class) => Some(class),
            None => bail!("unknown character class `{}`", args.class),
        }
    };

    let tuning = match &args.tuning {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading tuning file {}", path.display()))?;
            let tuning = Tuning::from_json(&json)
                .with_context(|| format!("loading tuning file {}", path.display()))?;
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        None => Tuning::default(),
    };

    let Some(mut state) = GameState::from_selection(selection, tuning, args.seed) else {
        log::info!("No character selected, exiting");
        return Ok(());
    };

    let snapshot = run(&mut state, args.ticks, args.frame_ms)?;
    report(&snapshot, args.json)
}

/// Drive the simulation until it ends or the tick budget runs out
fn run(state: &mut GameState, max_ticks: u64, frame_ms: f32) -> Result<WorldSnapshot> {
    if !frame_ms.is_finite() || frame_ms < MIN_FRAME_MS {
        bail!("frame time must be at least {MIN_FRAME_MS} ms, got {frame_ms}");
    }

    let mut stepper = FixedStepper::default();
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let frame_secs = frame_ms / 1000.0;
    let mut snapshot = state.snapshot();

    while !state.is_over() && state.time_ticks < max_ticks {
        let due = stepper.advance(frame_secs);
        for _ in 0..due {
            if state.is_over() || state.time_ticks >= max_ticks {
                break;
            }
            snapshot = state.advance_one_tick(&input);
            input.consume_one_shots();
        }
    }

    if stepper.dropped_ticks > 0 {
        log::warn!("Dropped {} ticks to frame overruns", stepper.dropped_ticks);
    }
    Ok(snapshot)
}

fn report(snapshot: &WorldSnapshot, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
        println!("{out}");
        return Ok(());
    }

    println!("Class:   {}", snapshot.player.class.name());
    println!("Ticks:   {}", snapshot.tick);
    println!("Score:   {}", snapshot.score);
    println!(
        "Health:  {}/{}",
        snapshot.player.health, snapshot.player.max_health
    );
    println!("Enemies: {}", snapshot.enemies_alive);
    match snapshot.terminal {
        Some(outcome) => println!("Result:  {outcome:?}"),
        None => println!("Result:  still running"),
    }
    Ok(())
}
