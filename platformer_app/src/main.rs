//! Headless platformer demo
//!
//! Loads a level file, drives the player with a scripted input sequence and
//! logs what the controller reports.
//!
//! ```text
//! platformer_demo [LEVEL] [TICKS]
//! ```
//!
//! `LEVEL` defaults to `levels/demo.ron`; `TICKS` defaults to 600. Set
//! `RUST_LOG=debug` to see every landing.

use kinematic2d::foundation::logging;
use kinematic2d::prelude::*;
use thiserror::Error;

const DEFAULT_LEVEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/levels/demo.ron");
const DEFAULT_TICKS: u64 = 600;

/// Ticks spent running in one direction before turning around
const TURN_INTERVAL: u64 = 240;

/// Ticks between jump presses
const JUMP_INTERVAL: u64 = 75;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("invalid tick count: {0}")]
    InvalidTicks(String),
}

/// Run right, then left, jumping every so often
fn scripted_input(tick: u64) -> PlayerInput {
    let horizontal = if (tick / TURN_INTERVAL) % 2 == 0 { 1.0 } else { -1.0 };
    PlayerInput {
        horizontal,
        jump: tick % JUMP_INTERVAL == 0,
    }
}

/// Totals gathered over one scripted run
#[derive(Debug, Default)]
struct RunSummary {
    landings: u32,
    carried_ticks: u32,
}

/// Step `sim` through `ticks` ticks of scripted input
fn run(sim: &mut Simulation, ticks: u64) -> Result<RunSummary, SimulationError> {
    let mut summary = RunSummary::default();
    for tick in 1..=ticks {
        let report = sim.step(scripted_input(tick))?;

        if report.collisions.just_landed() {
            summary.landings += 1;
            log::debug!("Tick {tick}: landed at {:?}", report.player_position);
        }
        let player = sim.player();
        if report
            .platforms
            .iter()
            .any(|p| p.passengers.iter().any(|m| m.body == player))
        {
            summary.carried_ticks += 1;
        }

        if tick % 60 == 0 {
            let state = report.collisions;
            log::info!(
                "Tick {tick}: player at ({:.2}, {:.2}) below={} above={} left={} right={} slope={:.1}",
                report.player_position.x,
                report.player_position.y,
                state.below,
                state.above,
                state.left,
                state.right,
                state.slope_angle
            );
        }
    }
    Ok(summary)
}

fn main() -> Result<(), AppError> {
    logging::init_with_level("info");

    let mut args = std::env::args().skip(1);
    let level = args.next().unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let ticks = match args.next() {
        Some(arg) => arg.parse::<u64>().map_err(|_| AppError::InvalidTicks(arg))?,
        None => DEFAULT_TICKS,
    };

    log::info!("Loading level {level}");
    let mut sim = Simulation::load(&level)?;
    let summary = run(&mut sim, ticks)?;

    log::info!(
        "Finished {} ticks: {} landings, carried by platforms for {} ticks",
        sim.tick_count(),
        summary.landings,
        summary.carried_ticks
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_level_loads() {
        let sim = Simulation::load(DEFAULT_LEVEL).unwrap();
        assert_eq!(sim.platforms().len(), 1);
        assert_eq!(sim.config().controller.collision_mask, LayerMask::SOLID);
        assert_eq!(
            sim.config().level.platforms[0].platform.passenger_mask,
            LayerMask::PASSENGERS
        );
    }

    #[test]
    fn test_scripted_run_rides_the_elevator() {
        let mut sim = Simulation::load(DEFAULT_LEVEL).unwrap();
        let summary = run(&mut sim, DEFAULT_TICKS).unwrap();
        assert_eq!(sim.tick_count(), DEFAULT_TICKS);
        assert!(summary.carried_ticks > 0);
        // Landings are edges, not grounded ticks
        assert!(summary.landings >= 1);
        assert!(u64::from(summary.landings) < DEFAULT_TICKS / 10);
    }
}
