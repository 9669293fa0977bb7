//! Axis-aligned rectangle geometry for hulls, shells and terrain
//!
//! Screen convention: `origin` is the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Point at fractional coordinates inside the rectangle ((0,0) = top-left, (1,1) = bottom-right)
    #[inline]
    pub fn point_at(&self, fraction: Vec2) -> Vec2 {
        self.origin + self.size * fraction
    }

    /// Same rectangle moved so its origin is `origin`
    #[inline]
    pub fn with_origin(&self, origin: Vec2) -> Self {
        Self {
            origin,
            size: self.size,
        }
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.origin, Vec2::new(40.0, 45.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
        assert_eq!(r.point_at(Vec2::new(0.5, 1.0)), Vec2::new(50.0, 55.0));
    }
}
