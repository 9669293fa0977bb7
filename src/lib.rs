//! Tank Arena - simulation core for a top-down tank combat arena
//!
//! Core modules:
//! - `sim`: Frame-locked simulation (hostile AI, movement, ballistics, collisions, waves)
//! - `level`: Static level geometry supplied by the level loader
//! - `tuning`: Data-driven game balance
//! - `error`: Crate error type

pub mod error;
pub mod level;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use level::LevelLayout;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed gameplay constants
pub mod consts {
    /// Shell speed (units/s), identical for every owner
    pub const PROJECTILE_SPEED: f32 = 750.0;
    /// Health removed from the player per hostile shell
    pub const SHELL_DAMAGE: i32 = 5;

    /// Units keep this far away from the canvas edges
    pub const BOUND_MARGIN: f32 = 10.0;
    /// Hostiles closer than this compute a separation impulse
    pub const SEPARATION_RADIUS: f32 = 20.0;
    pub const SEPARATION_SCALE: f32 = 0.1;

    /// Hostile shot countdown (seconds) and its fixed per-update step
    pub const SHOT_INTERVAL: f32 = 1.30;
    pub const SHOT_STEP: f32 = 0.015;
    /// Real time is credited to direction countdowns in chunks of at least this
    pub const DIRECTION_TICK: f32 = 0.1;
    /// Inclusive range (seconds) of a re-picked direction countdown
    pub const TURN_LIMIT_MIN: u32 = 2;
    pub const TURN_LIMIT_MAX: u32 = 5;
    /// Inclusive range (seconds) of a freshly spawned unit's countdown
    pub const SPAWN_TURN_LIMIT_MIN: u32 = 1;
    pub const SPAWN_TURN_LIMIT_MAX: u32 = 5;

    /// Wave scheduling
    pub const INITIAL_WAVE_SIZE: usize = 3;
    pub const INITIAL_WAVE_INTERVAL: f32 = 60.0;
    pub const WAVE_INTERVAL_STEP: f32 = 1.0;
    pub const WAVE_INTERVAL_FLOOR: f32 = 10.0;
    /// Horizontal nudge for spawns placed on the first registered point
    pub const FIRST_SPAWN_OFFSET: f32 = 10.0;

    /// Hostile explosions are drawn this far below the hull centre
    pub const HOSTILE_EXPLOSION_OFFSET: f32 = 20.0;
    /// Frames the presentation layer animates an explosion over
    pub const EXPLOSION_FRAMES: u32 = 16;

    /// Map tiles are square
    pub const TILE_SIZE: f32 = 30.0;
    /// Height of one level band (4 screens of 13 tiles)
    pub const LEVEL_BAND_HEIGHT: f32 = TILE_SIZE * 4.0 * 13.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading in degrees (0° = up, 90° = right, screen y grows downward)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = (degrees - 90.0).to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Heading in degrees from `from` toward `to`, in [0, 360)
#[inline]
pub fn heading_toward(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    normalize_degrees(delta.y.atan2(delta.x).to_degrees() + 90.0)
}

/// Signed shortest rotation (degrees, in [-180, 180]) taking `from` to `to`
#[inline]
pub fn shortest_rotation(from: f32, to: f32) -> f32 {
    let mut delta = normalize_degrees(to) - normalize_degrees(from);
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_vector_cardinals() {
        let up = heading_vector(0.0);
        assert!(up.x.abs() < 1e-5 && (up.y + 1.0).abs() < 1e-5);
        let right = heading_vector(90.0);
        assert!((right.x - 1.0).abs() < 1e-5 && right.y.abs() < 1e-5);
        let down = heading_vector(180.0);
        assert!(down.x.abs() < 1e-5 && (down.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_heading_toward_roundtrips_vector() {
        let from = Vec2::new(10.0, 10.0);
        let angle = heading_toward(from, Vec2::new(10.0, -50.0));
        assert!(angle.abs() < 1e-3 || (angle - 360.0).abs() < 1e-3);
        let angle = heading_toward(from, Vec2::new(-20.0, 10.0));
        assert!((angle - 270.0).abs() < 1e-3);
    }

    #[test]
    fn test_shortest_rotation_wraps() {
        assert!((shortest_rotation(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((shortest_rotation(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((shortest_rotation(0.0, 180.0).abs() - 180.0).abs() < 1e-4);
    }
}
