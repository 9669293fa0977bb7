//! Shell ballistics
//!
//! A shell flies along a fixed ray at constant speed and stops dead once it
//! has covered its max range. The range is fixed when the shell is fired and
//! never recomputed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Owner;
use crate::consts::PROJECTILE_SPEED;
use crate::heading_vector;

/// Result of advancing a shell by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    InFlight,
    /// Max range reached; the caller must remove the shell
    Spent,
}

/// A shell in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    start: Vec2,
    pos: Vec2,
    direction: Vec2,
    angle: f32,
    speed: f32,
    owner: Owner,
    max_range: f32,
    traveled: f32,
}

impl Projectile {
    /// Fire from `origin` at `angle` degrees; the range is the distance to `aim_point`
    pub fn fire(origin: Vec2, angle: f32, aim_point: Vec2, owner: Owner) -> Self {
        Self::with_range(origin, angle, origin.distance(aim_point), owner)
    }

    /// Fire from `origin` at `angle` degrees with an explicit max range
    pub fn with_range(origin: Vec2, angle: f32, max_range: f32, owner: Owner) -> Self {
        let max_range = if max_range.is_finite() {
            max_range.max(0.0)
        } else {
            log::warn!("shell range {max_range} is not finite, firing with zero range");
            0.0
        };
        Self {
            start: origin,
            pos: origin,
            direction: heading_vector(angle),
            angle,
            speed: PROJECTILE_SPEED,
            owner,
            max_range,
            traveled: 0.0,
        }
    }

    pub fn start(&self) -> Vec2 {
        self.start
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Heading in degrees
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    pub fn traveled(&self) -> f32 {
        self.traveled
    }

    pub fn is_spent(&self) -> bool {
        self.traveled >= self.max_range
    }

    /// Square hit box of side `size` centred on the shell
    pub fn hit_box(&self, size: f32) -> Rect {
        Rect::centered(self.pos, Vec2::splat(size))
    }

    /// Move the shell forward by `dt` seconds, clamping it onto its max range
    pub fn advance(&mut self, dt: f32) -> Flight {
        if self.is_spent() {
            return Flight::Spent;
        }

        let candidate = self.pos + self.direction * self.speed * dt;
        let distance = self.start.distance(candidate);

        if distance >= self.max_range {
            // Pull the candidate back along start -> candidate onto the range circle
            self.pos = if distance > f32::EPSILON {
                let factor = self.max_range / distance;
                self.start + (candidate - self.start) * factor
            } else {
                self.start
            };
            self.traveled = self.max_range;
            return Flight::Spent;
        }

        self.pos = candidate;
        self.traveled = distance;
        Flight::InFlight
    }
}

/// Advance every shell and drop the ones that reached their range.
/// Returns how many were dropped.
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, dt: f32) -> usize {
    let before = projectiles.len();
    projectiles.retain_mut(|shell| shell.advance(dt) == Flight::InFlight);
    before - projectiles.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_fixes_range_from_aim_point() {
        let shell = Projectile::fire(
            Vec2::new(0.0, 0.0),
            90.0,
            Vec2::new(30.0, 40.0),
            Owner::Player,
        );
        assert!((shell.max_range() - 50.0).abs() < 1e-5);
        assert_eq!(shell.traveled(), 0.0);
        assert!(!shell.is_spent());
    }

    #[test]
    fn test_advance_moves_along_heading() {
        let mut shell = Projectile::with_range(Vec2::new(100.0, 100.0), 180.0, 1000.0, Owner::Hostile);
        assert_eq!(shell.advance(0.1), Flight::InFlight);
        assert!((shell.pos() - Vec2::new(100.0, 175.0)).length() < 1e-3);
        assert!((shell.traveled() - 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamps_exactly_at_max_range() {
        // 90 degrees from (500,500), range 300; steps add up to 340 units
        let mut shell = Projectile::with_range(Vec2::new(500.0, 500.0), 90.0, 300.0, Owner::Player);
        let step = 85.0 / PROJECTILE_SPEED;
        let mut flights = Vec::new();
        for _ in 0..4 {
            flights.push(shell.advance(step));
        }
        assert_eq!(flights[..3], [Flight::InFlight; 3]);
        assert_eq!(flights[3], Flight::Spent);
        assert_eq!(shell.traveled(), 300.0);
        assert!((shell.pos() - Vec2::new(800.0, 500.0)).length() < 1e-3);
        assert!((shell.start().distance(shell.pos()) - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_spent_shell_stops_moving() {
        let mut shell = Projectile::with_range(Vec2::ZERO, 0.0, 10.0, Owner::Player);
        assert_eq!(shell.advance(1.0), Flight::Spent);
        let resting = shell.pos();
        assert_eq!(shell.advance(1.0), Flight::Spent);
        assert_eq!(shell.pos(), resting);
    }

    #[test]
    fn test_zero_range_shell_is_spent_immediately() {
        let mut shell = Projectile::fire(Vec2::new(5.0, 5.0), 45.0, Vec2::new(5.0, 5.0), Owner::Player);
        assert!(shell.is_spent());
        assert_eq!(shell.advance(0.0), Flight::Spent);
        assert_eq!(shell.pos(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_advance_projectiles_drops_spent() {
        let mut shells = vec![
            Projectile::with_range(Vec2::ZERO, 90.0, 10.0, Owner::Player),
            Projectile::with_range(Vec2::ZERO, 90.0, 1000.0, Owner::Hostile),
        ];
        assert_eq!(advance_projectiles(&mut shells, 0.1), 1);
        assert_eq!(shells.len(), 1);
        assert_eq!(shells[0].owner(), Owner::Hostile);

        let mut empty: Vec<Projectile> = Vec::new();
        assert_eq!(advance_projectiles(&mut empty, 0.1), 0);
    }
}
