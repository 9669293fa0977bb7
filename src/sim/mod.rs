//! Simulation core
//!
//! All gameplay logic lives here. The rules this module keeps:
//! - One tick per rendered frame, driven by the caller's delta-time
//! - One seeded RNG, owned by `GameState` and passed down explicitly
//! - Stable iteration order (spawn order for hostiles, firing order for shells)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod direction;
pub mod hostile;
pub mod movement;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod waves;

pub use collision::{CollisionSummary, CollisionWorld, ShellOutcome, resolve_projectiles};
pub use direction::Direction;
pub use hostile::HostileController;
pub use movement::{MoveIntent, MoveOutcome};
pub use projectile::{Flight, Projectile};
pub use rect::Rect;
pub use state::{
    GameEvent, GamePhase, GameState, HostilePose, HostileUnit, Obstacle, ObstacleKind, Owner,
    Player, PlayerPose, ProjectilePose, Snapshot, WorldBounds,
};
pub use tick::{TickInput, tick};
pub use waves::{LevelWaveState, WaveScheduler, level_index};
