//! Movement resolution
//!
//! A unit proposes a displacement, the resolver checks it against the world
//! and either commits it verbatim or rejects it outright. There is no sliding
//! and no partial movement.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::rect::Rect;
use super::state::{HostileUnit, Obstacle, Player, WorldBounds};
use crate::consts::{BOUND_MARGIN, SEPARATION_RADIUS, SEPARATION_SCALE};
use crate::{heading_vector, shortest_rotation};

/// What happened to a proposed move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Position updated
    Committed,
    /// No movement requested
    Idle,
    /// The move would cross the boundary margin
    OutOfBounds,
    BlockedByTerrain,
    BlockedByPlayer,
    /// Blocked by another hull. `separation` is the push-apart impulse for
    /// hulls closer than the separation radius; it is reported, never applied.
    BlockedByHostile { separation: Option<Vec2> },
}

impl MoveOutcome {
    pub fn committed(&self) -> bool {
        matches!(self, MoveOutcome::Committed)
    }
}

/// Movement keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

impl MoveIntent {
    /// Heading (degrees) the hull should turn to, if any key is held.
    /// Diagonals win over single keys.
    pub fn target_heading(&self) -> Option<f32> {
        let heading = match (self.up, self.right, self.down, self.left) {
            (true, true, _, _) => 45.0,
            (true, _, _, true) => 315.0,
            (_, true, true, _) => 135.0,
            (_, _, true, true) => 225.0,
            (true, _, _, _) => 0.0,
            (_, _, _, true) => 270.0,
            (_, _, true, _) => 180.0,
            (_, true, _, _) => 90.0,
            _ => return None,
        };
        Some(heading)
    }
}

/// Origin a hostile would move to this tick, or `None` if its facing edge
/// would end up past the boundary margin
pub fn hostile_candidate(unit: &HostileUnit, bounds: WorldBounds, dt: f32) -> Option<Vec2> {
    let candidate = unit.pos + unit.facing.vector() * unit.speed * dt;
    let moved = unit.rect().with_origin(candidate);
    let allowed = match unit.facing {
        Direction::Up => moved.top() >= BOUND_MARGIN,
        Direction::Down => moved.bottom() <= bounds.height - BOUND_MARGIN,
        Direction::Left => moved.left() >= BOUND_MARGIN,
        Direction::Right => moved.right() <= bounds.width - BOUND_MARGIN,
    };
    allowed.then_some(candidate)
}

/// Resolve the move of `hostiles[index]` against terrain, the player and the
/// other hostiles, committing it when nothing blocks.
pub fn resolve_hostile_move(
    hostiles: &mut [HostileUnit],
    index: usize,
    obstacles: &[Obstacle],
    player_rect: &Rect,
    bounds: WorldBounds,
    dt: f32,
) -> MoveOutcome {
    let Some(unit) = hostiles.get(index) else {
        log::warn!("hostile index {index} out of range ({} active)", hostiles.len());
        return MoveOutcome::Idle;
    };
    let Some(candidate) = hostile_candidate(unit, bounds, dt) else {
        return MoveOutcome::OutOfBounds;
    };
    let moved = unit.rect().with_origin(candidate);

    if blocked_by_terrain(&moved, obstacles) {
        return MoveOutcome::BlockedByTerrain;
    }
    if moved.overlaps(player_rect) {
        return MoveOutcome::BlockedByPlayer;
    }

    let blocker = hostiles
        .iter()
        .enumerate()
        .find(|(other_index, other)| *other_index != index && moved.overlaps(&other.rect()));
    if let Some((_, other)) = blocker {
        let offset = other.pos - unit.pos;
        let separation = (offset.length() < SEPARATION_RADIUS).then(|| -offset * SEPARATION_SCALE);
        return MoveOutcome::BlockedByHostile { separation };
    }

    hostiles[index].pos = candidate;
    MoveOutcome::Committed
}

/// Resolve every hostile in order. Later units see earlier units' committed positions.
pub fn move_hostiles(
    hostiles: &mut [HostileUnit],
    obstacles: &[Obstacle],
    player_rect: &Rect,
    bounds: WorldBounds,
    dt: f32,
) {
    for index in 0..hostiles.len() {
        let outcome = resolve_hostile_move(hostiles, index, obstacles, player_rect, bounds, dt);
        if !outcome.committed() {
            log::debug!("hostile {index} held in place: {outcome:?}");
        }
    }
}

/// Rotate `current` toward `target` by at most `max_step` degrees along the shortest path
pub fn rotate_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = shortest_rotation(current, target);
    if delta.abs() > max_step {
        crate::normalize_degrees(current + max_step.copysign(delta))
    } else {
        crate::normalize_degrees(target)
    }
}

/// Turn the player toward the held direction and drive along its heading
pub fn resolve_player_move(
    player: &mut Player,
    intent: MoveIntent,
    obstacles: &[Obstacle],
    hostiles: &[HostileUnit],
    bounds: WorldBounds,
    dt: f32,
) -> MoveOutcome {
    let Some(target) = intent.target_heading() else {
        return MoveOutcome::Idle;
    };
    player.rotation = rotate_toward(player.rotation, target, player.turn_rate * dt);

    let mut candidate = player.pos + heading_vector(player.rotation) * player.speed * dt;
    let moved = Rect::centered(candidate, player.size);

    if blocked_by_terrain(&moved, obstacles) {
        return MoveOutcome::BlockedByTerrain;
    }
    if hostiles.iter().any(|h| moved.overlaps(&h.rect())) {
        return MoveOutcome::BlockedByHostile { separation: None };
    }

    // Keep the hull fully on the canvas
    let half = player.size / 2.0;
    if moved.left() < 0.0 {
        candidate.x = half.x;
    }
    if moved.top() < 0.0 {
        candidate.y = half.y;
    }
    if moved.right() > bounds.width {
        candidate.x = bounds.width - half.x;
    }
    if moved.bottom() > bounds.height {
        candidate.y = bounds.height - half.y;
    }

    player.pos = candidate;
    MoveOutcome::Committed
}

fn blocked_by_terrain(rect: &Rect, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|obs| obs.kind.blocks_movement() && rect.overlaps(&obs.rect))
}
