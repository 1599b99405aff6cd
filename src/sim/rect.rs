//! Integer axis-aligned rectangles in world pixel space
//!
//! `y` grows downward: `top()` is the smallest y, `bottom()` the exclusive
//! far edge.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Simulation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component of a vector along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    /// Center point, rounded toward the top-left
    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// True if the rectangle has no area
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_degenerate()
            && !other.is_degenerate()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Copy of this rectangle shifted by `delta`
    #[inline]
    pub fn translated(&self, delta: IVec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 16, 8);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 26);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 28);
        assert_eq!(r.center(), IVec2::new(18, 24));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let floor = Rect::new(0, 304, 480, 16);
        let body = Rect::new(100, 288, 16, 16);
        assert!(!body.intersects(&floor));
        assert!(body.translated(IVec2::new(0, 1)).intersects(&floor));
    }

    #[test]
    fn test_degenerate_never_intersects() {
        let flat = Rect::new(0, 0, 10, 0);
        let big = Rect::new(-5, -5, 20, 20);
        assert!(flat.is_degenerate());
        assert!(!flat.intersects(&big));
        assert!(!big.intersects(&flat));
    }

    #[test]
    fn test_set_far_edges() {
        let mut r = Rect::new(0, 0, 16, 16);
        r.set_right(40);
        r.set_bottom(100);
        assert_eq!(r, Rect::new(24, 84, 16, 16));
    }
}
