//! Tank Arena headless runner
//!
//! Plays a scripted run against a level layout and prints the final snapshot
//! as JSON. Usage: `tank-arena [layout.json] [seed]`.

use std::process::ExitCode;

use glam::Vec2;
use tank_arena::sim::{GamePhase, GameState, MoveIntent, TickInput, tick};
use tank_arena::{LevelLayout, Tuning};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u64 = 60 * 180;
/// Frames between scripted shots
const FIRE_EVERY: u64 = 20;
const DEFAULT_SEED: u64 = 0x5eed;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> tank_arena::error::Result<()> {
    let mut args = std::env::args().skip(1);
    let layout = match args.next() {
        Some(path) => {
            log::info!("Loading layout from {path}");
            LevelLayout::load(&path)?
        }
        None => LevelLayout::demo(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Seed '{raw}' is not a number, using {DEFAULT_SEED}");
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };

    let mut state = GameState::new(&layout, Tuning::default(), seed)?;
    log::info!("Tank Arena (headless) starting with seed {seed}");

    let mut frame = 0;
    while state.phase == GamePhase::Playing && frame < MAX_FRAMES {
        let input = scripted_input(&state, frame);
        tick(&mut state, &input, FRAME_DT);
        frame += 1;

        if frame % 600 == 0 {
            log::info!(
                "t={}s level={} hostiles={} shells={} health={} score={}",
                frame / 60,
                state.waves.current_level(),
                state.hostiles.len(),
                state.projectiles.len(),
                state.player.health,
                state.score
            );
        }
    }

    log::info!(
        "Run finished after {} ticks: phase={:?}, score={}",
        state.time_ticks,
        state.phase,
        state.score
    );
    let json = serde_json::to_string_pretty(&state.snapshot())?;
    println!("{json}");
    Ok(())
}

/// Drive forward and shoot at the nearest hostile every few frames
fn scripted_input(state: &GameState, frame: u64) -> TickInput {
    let target = state
        .hostiles
        .iter()
        .map(|h| h.center())
        .min_by(|a, b| {
            a.distance_squared(state.player.pos)
                .total_cmp(&b.distance_squared(state.player.pos))
        });

    TickInput {
        keys: MoveIntent {
            up: true,
            ..Default::default()
        },
        fire: target.is_some() && frame % FIRE_EVERY == 0,
        pointer: target.unwrap_or(state.player.pos + Vec2::new(0.0, -200.0)),
        bounds: None,
    }
}
