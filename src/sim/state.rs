//! Game state and core simulation types
//!
//! Everything the orchestrator owns for the duration of a tick lives here.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::hostile::HostileController;
use super::projectile::Projectile;
use super::rect::Rect;
use super::waves::WaveScheduler;
use crate::consts::{SHOT_INTERVAL, TURN_LIMIT_MIN};
use crate::error::Result;
use crate::level::LevelLayout;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player health reached zero; ticks are no-ops from here on
    GameOver,
}

/// Who fired a shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Hostile,
}

/// Canvas dimensions in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Terrain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Brick: blocks hulls, stops shells and is destroyed by them
    Destructible,
    /// Steel barrier: blocks hulls, absorbs shells, never destroyed
    Barrier,
    /// Water: blocks hulls, shells fly over it
    Hazard,
    /// Spawn point marker, purely informational
    SpawnMarker,
}

impl ObstacleKind {
    pub fn blocks_movement(self) -> bool {
        matches!(
            self,
            ObstacleKind::Destructible | ObstacleKind::Barrier | ObstacleKind::Hazard
        )
    }

    pub fn stops_shells(self) -> bool {
        matches!(self, ObstacleKind::Destructible | ObstacleKind::Barrier)
    }

    pub fn destroyed_by_shells(self) -> bool {
        self == ObstacleKind::Destructible
    }
}

/// A terrain tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// An autonomous enemy tank
///
/// `pos` is the top-left corner of the hull; the bounding rectangle is always
/// derived from it, never stored separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostileUnit {
    pub pos: Vec2,
    size: Vec2,
    /// Direction the hull moves and shoots in
    pub facing: Direction,
    /// Vertical direction toward the player, refreshed every tick
    pub bias: Direction,
    /// Seconds credited since the last direction re-pick
    pub turn_elapsed: f32,
    /// Seconds until the next re-pick
    pub turn_limit: f32,
    /// Seconds until the next shot
    pub shot_timer: f32,
    /// Units per second
    pub speed: f32,
}

impl HostileUnit {
    /// Create a hostile at `pos` facing down, with a fresh shot countdown
    pub fn new(pos: Vec2, size: Vec2, speed: f32, turn_limit: f32) -> Self {
        let turn_limit = if turn_limit > 0.0 {
            turn_limit
        } else {
            log::warn!("hostile turn limit {turn_limit} is not positive, using {TURN_LIMIT_MIN}");
            TURN_LIMIT_MIN as f32
        };
        Self {
            pos,
            size: size.abs(),
            facing: Direction::Down,
            bias: Direction::Down,
            turn_elapsed: 0.0,
            turn_limit,
            shot_timer: SHOT_INTERVAL,
            speed,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Midpoint of the edge the hull is facing, where its shells leave
    pub fn muzzle(&self) -> Vec2 {
        self.rect().point_at(self.facing.edge_fraction())
    }
}

/// The player-controlled tank
///
/// Unlike hostiles, `pos` is the hull centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Hull heading in degrees (0 = up)
    pub rotation: f32,
    pub health: i32,
    pub speed: f32,
    /// Degrees per second
    pub turn_rate: f32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: tuning.player_size,
            rotation: 0.0,
            health: tuning.player_health,
            speed: tuning.player_speed,
            turn_rate: tuning.player_turn_rate,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }
}

/// Lifecycle events for the presentation layer, cleared at the start of each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShellFired { owner: Owner, pos: Vec2 },
    /// Explosion animation should start at `pos`
    Explosion { pos: Vec2 },
    /// Hit feedback (sound cue) for a shell that struck something
    Hit { owner: Owner, pos: Vec2 },
    HostileDestroyed { pos: Vec2 },
    ObstacleRemoved { id: u32 },
    PlayerDamaged { health: i32 },
    WaveQueued { level: u32, count: usize },
    HostileSpawned { pos: Vec2 },
    LevelChanged { level: u32 },
    GameOver,
}

/// Pose of the player hull
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPose {
    pub pos: Vec2,
    pub rotation: f32,
    pub rect: Rect,
    pub health: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostilePose {
    pub pos: Vec2,
    pub facing: Direction,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectilePose {
    pub pos: Vec2,
    /// Heading in degrees
    pub angle: f32,
    pub owner: Owner,
}

/// Everything the presentation layer needs after a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub player: PlayerPose,
    pub score: u64,
    pub level: u32,
    pub hostiles: Vec<HostilePose>,
    pub projectiles: Vec<ProjectilePose>,
    pub events: Vec<GameEvent>,
}

/// Complete simulation state, owned by the orchestrator
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed, kept for logging
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub bounds: WorldBounds,
    pub phase: GamePhase,
    /// Hostiles destroyed by the player
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active hostiles, in spawn order
    pub hostiles: Vec<HostileUnit>,
    /// Shells in flight, in firing order
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    /// Registered spawn points per level band
    pub spawn_points: BTreeMap<u32, Vec<Vec2>>,
    pub controller: HostileController,
    pub waves: WaveScheduler,
    /// Events produced by the current tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a fresh run from static level data
    pub fn new(layout: &LevelLayout, tuning: Tuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        layout.validate()?;

        let player = Player::new(layout.player_start, &tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            bounds: layout.bounds,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            player,
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::with_capacity(layout.obstacles.len()),
            spawn_points: layout.spawn_points.clone(),
            controller: HostileController::default(),
            waves: WaveScheduler::new(),
            events: Vec::new(),
            next_id: 1,
        };

        for spec in &layout.obstacles {
            let id = state.next_entity_id();
            state.obstacles.push(Obstacle {
                id,
                kind: spec.kind,
                rect: spec.rect,
            });
        }

        log::info!(
            "New run: seed={}, obstacles={}, spawn bands={}",
            seed,
            state.obstacles.len(),
            state.spawn_points.len()
        );
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Pose and event record for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            player: PlayerPose {
                pos: self.player.pos,
                rotation: self.player.rotation,
                rect: self.player.rect(),
                health: self.player.health,
            },
            score: self.score,
            level: self.waves.current_level(),
            hostiles: self
                .hostiles
                .iter()
                .map(|h| HostilePose {
                    pos: h.pos,
                    facing: h.facing,
                    rect: h.rect(),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectilePose {
                    pos: p.pos(),
                    angle: p.angle(),
                    owner: p.owner(),
                })
                .collect(),
            events: self.events.clone(),
        }
    }
}
