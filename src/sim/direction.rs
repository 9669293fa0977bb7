//! Cardinal facing directions
//!
//! Every per-direction quantity (firing angle, movement vector, facing-edge
//! midpoint) comes from one table instead of per-site matches.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four cardinal directions a hostile hull can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

struct DirectionInfo {
    /// Firing angle in degrees (0 = up, clockwise)
    angle: f32,
    /// Unit movement vector (screen y grows downward)
    vector: Vec2,
    /// Midpoint of the facing edge as a fraction of the hull rectangle
    edge: Vec2,
}

static TABLE: [DirectionInfo; 4] = [
    DirectionInfo {
        angle: 0.0,
        vector: Vec2::new(0.0, -1.0),
        edge: Vec2::new(0.5, 0.0),
    },
    DirectionInfo {
        angle: 90.0,
        vector: Vec2::new(1.0, 0.0),
        edge: Vec2::new(1.0, 0.5),
    },
    DirectionInfo {
        angle: 180.0,
        vector: Vec2::new(0.0, 1.0),
        edge: Vec2::new(0.5, 1.0),
    },
    DirectionInfo {
        angle: 270.0,
        vector: Vec2::new(-1.0, 0.0),
        edge: Vec2::new(0.0, 0.5),
    },
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    fn info(self) -> &'static DirectionInfo {
        &TABLE[self as usize]
    }

    /// Firing angle in degrees
    pub fn angle(self) -> f32 {
        self.info().angle
    }

    pub fn vector(self) -> Vec2 {
        self.info().vector
    }

    /// Facing-edge midpoint as a fraction of the hull (see [`super::Rect::point_at`])
    pub fn edge_fraction(self) -> Vec2 {
        self.info().edge
    }
}
