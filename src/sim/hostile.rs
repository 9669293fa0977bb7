//! Hostile direction controller
//!
//! Each hostile carries two countdowns: one that re-picks its facing
//! direction every few seconds, and one that fires a shell along the facing
//! direction on a fixed cadence. The controller never moves a hull; see
//! [`super::movement`] for that.

use rand::Rng;

use super::direction::Direction;
use super::projectile::Projectile;
use super::state::{HostileUnit, Owner};
use crate::consts::{DIRECTION_TICK, SHOT_INTERVAL, SHOT_STEP, TURN_LIMIT_MAX, TURN_LIMIT_MIN};

/// Drives facing and firing for every active hostile
#[derive(Debug, Clone, Default)]
pub struct HostileController {
    /// Real time not yet credited to the direction countdowns
    accumulated: f32,
}

impl HostileController {
    /// Run one controller update; returns the shells fired.
    ///
    /// Order per call: credit direction time, fire on cadence (with last
    /// tick's facing), refresh the guided bias, then re-pick directions.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        hostiles: &mut [HostileUnit],
        player_y: f32,
        dt: f32,
        shot_range: f32,
        rng: &mut R,
    ) -> Vec<Projectile> {
        self.accumulated += dt;
        if hostiles.is_empty() {
            return Vec::new();
        }

        if self.accumulated >= DIRECTION_TICK {
            for unit in hostiles.iter_mut() {
                unit.turn_elapsed += self.accumulated;
            }
            self.accumulated = 0.0;
        }

        let shells: Vec<Projectile> = hostiles
            .iter_mut()
            .filter_map(|unit| fire_on_cadence(unit, shot_range))
            .collect();

        for unit in hostiles.iter_mut() {
            unit.bias = guided_bias(unit.pos.y, player_y);
        }

        for unit in hostiles.iter_mut() {
            repick_direction(unit, rng);
        }

        shells
    }

    /// Time waiting to be credited to direction countdowns
    pub fn pending_time(&self) -> f32 {
        self.accumulated
    }
}

/// Vertical direction toward the player: up when the unit sits below them
#[inline]
pub fn guided_bias(unit_y: f32, player_y: f32) -> Direction {
    if unit_y > player_y {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Re-pick the facing once the countdown expires. Returns true if a re-pick happened.
///
/// The new facing is uniform over {Right, Left, bias}; the new countdown is a
/// whole number of seconds in [2, 5].
pub fn repick_direction<R: Rng + ?Sized>(unit: &mut HostileUnit, rng: &mut R) -> bool {
    if unit.turn_elapsed < unit.turn_limit {
        return false;
    }

    unit.turn_elapsed = 0.0;
    unit.turn_limit = rng.random_range(TURN_LIMIT_MIN..=TURN_LIMIT_MAX) as f32;

    let choices = [Direction::Right, Direction::Left, unit.bias];
    unit.facing = choices[rng.random_range(0..choices.len())];
    true
}

/// Step the shot countdown; fire from the facing edge when it runs out
pub fn fire_on_cadence(unit: &mut HostileUnit, shot_range: f32) -> Option<Projectile> {
    unit.shot_timer -= SHOT_STEP;
    if unit.shot_timer > 0.0 {
        return None;
    }

    unit.shot_timer = SHOT_INTERVAL;
    let muzzle = unit.muzzle();
    let aim_point = muzzle + unit.facing.vector() * shot_range;
    Some(Projectile::fire(
        muzzle,
        unit.facing.angle(),
        aim_point,
        Owner::Hostile,
    ))
}
