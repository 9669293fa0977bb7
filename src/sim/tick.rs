//! Frame-locked simulation tick
//!
//! One call per rendered frame. The stage order is fixed:
//! hostile controller → hostile movement → player movement and fire →
//! shell flight → collisions and damage → wave scheduling → spawn promotion.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionWorld, resolve_projectiles};
use super::movement::{MoveIntent, MoveOutcome, move_hostiles, resolve_player_move};
use super::projectile::{Projectile, advance_projectiles};
use super::state::{GameEvent, GamePhase, GameState, Owner, WorldBounds};
use super::waves::level_index;
use crate::{heading_toward, heading_vector};

/// Input for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement keys held
    pub keys: MoveIntent,
    /// Fire pressed this frame
    pub fire: bool,
    /// Pointer position in world coordinates
    pub pointer: Vec2,
    /// New canvas bounds, if they changed
    pub bounds: Option<WorldBounds>,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.events.clear();

    if !dt.is_finite() || dt < 0.0 {
        log::warn!("ignoring tick with invalid dt {dt}");
        return;
    }
    if let Some(bounds) = input.bounds {
        state.bounds = bounds;
    }
    state.time_ticks += 1;

    // Hostile facing and fire
    let shells = state.controller.update(
        &mut state.hostiles,
        state.player.pos.y,
        dt,
        state.tuning.hostile_shot_range,
        &mut state.rng,
    );
    for shell in shells {
        state.events.push(GameEvent::ShellFired {
            owner: Owner::Hostile,
            pos: shell.start(),
        });
        state.projectiles.push(shell);
    }

    // Movement
    let player_rect = state.player.rect();
    move_hostiles(
        &mut state.hostiles,
        &state.obstacles,
        &player_rect,
        state.bounds,
        dt,
    );
    let outcome = resolve_player_move(
        &mut state.player,
        input.keys,
        &state.obstacles,
        &state.hostiles,
        state.bounds,
        dt,
    );
    if !matches!(outcome, MoveOutcome::Committed | MoveOutcome::Idle) {
        log::debug!("player move held: {outcome:?}");
    }
    if input.fire {
        fire_player_shell(state, input.pointer);
    }

    // Shells
    advance_projectiles(&mut state.projectiles, dt);
    let summary = {
        let mut world = CollisionWorld {
            obstacles: &mut state.obstacles,
            hostiles: &mut state.hostiles,
            player: &mut state.player,
            shell_size: state.tuning.projectile_size,
        };
        resolve_projectiles(&mut state.projectiles, &mut world, &mut state.events)
    };
    state.score += summary.hostiles_destroyed as u64;

    if state.player.is_destroyed() {
        log::info!(
            "Player destroyed after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        return;
    }

    // Waves
    let level = level_index(
        state.player.pos.y,
        state.bounds,
        state.tuning.level_band_height,
    );
    if let Some(level) = state.waves.observe_level(level) {
        state.events.push(GameEvent::LevelChanged { level });
    }
    state.waves.update(
        dt,
        &state.spawn_points,
        &state.tuning,
        &mut state.rng,
        &mut state.events,
    );
    let player_rect = state.player.rect();
    state
        .waves
        .promote(&mut state.hostiles, &player_rect, &mut state.events);
}

/// Fire a shell from the turret muzzle toward the pointer
fn fire_player_shell(state: &mut GameState, pointer: Vec2) {
    let angle = heading_toward(state.player.pos, pointer);
    let muzzle = state.player.pos + heading_vector(angle) * state.tuning.muzzle_length;
    let shell = Projectile::fire(muzzle, angle, pointer, Owner::Player);
    state.events.push(GameEvent::ShellFired {
        owner: Owner::Player,
        pos: muzzle,
    });
    state.projectiles.push(shell);
}
