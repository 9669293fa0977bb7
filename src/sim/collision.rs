//! Shell collision and damage resolution
//!
//! Each shell resolves at most one outcome per tick, checked in this order:
//! shell-stopping terrain, then hostiles (player shells) or the player
//! (hostile shells). The first match consumes the shell.

use glam::Vec2;

use super::projectile::Projectile;
use super::state::{GameEvent, HostileUnit, Obstacle, Owner, Player};
use crate::consts::{HOSTILE_EXPLOSION_OFFSET, SHELL_DAMAGE};

/// What a single shell hit this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Nothing hit; the shell keeps flying
    Survived,
    /// Hit terrain; `removed` is true when the obstacle was destroyed
    Terrain { obstacle_id: u32, removed: bool },
    HostileDestroyed,
    PlayerHit,
}

impl ShellOutcome {
    pub fn consumed(&self) -> bool {
        !matches!(self, ShellOutcome::Survived)
    }
}

/// Totals for one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    pub shells_consumed: usize,
    pub obstacles_removed: usize,
    pub hostiles_destroyed: usize,
    pub player_hits: usize,
}

/// Mutable world the resolver works against
pub struct CollisionWorld<'a> {
    pub obstacles: &'a mut Vec<Obstacle>,
    pub hostiles: &'a mut Vec<HostileUnit>,
    pub player: &'a mut Player,
    /// Side of the square shell hit box
    pub shell_size: f32,
}

/// Resolve one shell against the world, applying removals and damage
pub fn resolve_shell(
    shell: &Projectile,
    world: &mut CollisionWorld<'_>,
    events: &mut Vec<GameEvent>,
) -> ShellOutcome {
    let hit_box = shell.hit_box(world.shell_size);
    let pos = shell.pos();

    if let Some(index) = world
        .obstacles
        .iter()
        .position(|obs| obs.kind.stops_shells() && hit_box.overlaps(&obs.rect))
    {
        if shell.owner() == Owner::Player {
            events.push(GameEvent::Hit {
                owner: Owner::Player,
                pos,
            });
        }
        events.push(GameEvent::Explosion { pos });

        let obstacle = &world.obstacles[index];
        let obstacle_id = obstacle.id;
        let removed = obstacle.kind.destroyed_by_shells();
        if removed {
            world.obstacles.remove(index);
            events.push(GameEvent::ObstacleRemoved { id: obstacle_id });
        }
        return ShellOutcome::Terrain {
            obstacle_id,
            removed,
        };
    }

    match shell.owner() {
        Owner::Player => {
            let Some(index) = world
                .hostiles
                .iter()
                .position(|unit| hit_box.overlaps(&unit.rect()))
            else {
                return ShellOutcome::Survived;
            };
            let unit = world.hostiles.remove(index);
            let center = unit.center();
            log::debug!("hostile destroyed at ({:.0}, {:.0})", center.x, center.y);
            events.push(GameEvent::HostileDestroyed { pos: center });
            events.push(GameEvent::Explosion {
                pos: center + Vec2::new(0.0, HOSTILE_EXPLOSION_OFFSET),
            });
            ShellOutcome::HostileDestroyed
        }
        Owner::Hostile => {
            if !hit_box.overlaps(&world.player.rect()) {
                return ShellOutcome::Survived;
            }
            world.player.health -= SHELL_DAMAGE;
            log::debug!("player hit, health now {}", world.player.health);
            events.push(GameEvent::Hit {
                owner: Owner::Hostile,
                pos,
            });
            events.push(GameEvent::Explosion { pos });
            events.push(GameEvent::PlayerDamaged {
                health: world.player.health,
            });
            ShellOutcome::PlayerHit
        }
    }
}

/// Resolve every shell in firing order, dropping the consumed ones
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    world: &mut CollisionWorld<'_>,
    events: &mut Vec<GameEvent>,
) -> CollisionSummary {
    let mut summary = CollisionSummary::default();
    projectiles.retain(|shell| {
        let outcome = resolve_shell(shell, world, events);
        match outcome {
            ShellOutcome::Survived => {}
            ShellOutcome::Terrain { removed, .. } => {
                if removed {
                    summary.obstacles_removed += 1;
                }
            }
            ShellOutcome::HostileDestroyed => summary.hostiles_destroyed += 1,
            ShellOutcome::PlayerHit => summary.player_hits += 1,
        }
        if outcome.consumed() {
            summary.shells_consumed += 1;
        }
        !outcome.consumed()
    });
    summary
}
