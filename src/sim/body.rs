//! The actor's kinematic state
//!
//! `pos` is the authoritative continuous position; the discrete bounding box
//! is derived from it one axis at a time, so a horizontal move never touches
//! the vertical edge of the box until the vertical pass runs.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::rect::{Axis, Rect};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicBody {
    /// Top-left corner in world pixels
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Set only on the tick a downward move is stopped by a collider below
    pub grounded: bool,
    /// Discrete bounding box, synchronised per axis
    rect: Rect,
}

impl KinematicBody {
    pub fn new(spawn: Vec2, size: IVec2) -> Self {
        let mut body = Self {
            pos: spawn,
            vel: Vec2::ZERO,
            grounded: false,
            rect: Rect::from_pos_size(IVec2::ZERO, size),
        };
        body.sync_axis(Axis::Horizontal);
        body.sync_axis(Axis::Vertical);
        body
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        self.rect.size()
    }

    /// Velocity component along `axis`
    #[inline]
    pub fn vel_on(&self, axis: Axis) -> f32 {
        axis.of(self.vel)
    }

    pub fn set_vel_on(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.vel.x = value,
            Axis::Vertical => self.vel.y = value,
        }
    }

    /// Apply this tick's full displacement on one axis
    pub fn move_axis(&mut self, axis: Axis) {
        match axis {
            Axis::Horizontal => self.pos.x += self.vel.x,
            Axis::Vertical => self.pos.y += self.vel.y,
        }
        self.sync_axis(axis);
    }

    /// Re-derive one edge of the bounding box from the continuous position
    pub fn sync_axis(&mut self, axis: Axis) {
        match axis {
            Axis::Horizontal => self.rect.x = self.pos.x.round() as i32,
            Axis::Vertical => self.rect.y = self.pos.y.round() as i32,
        }
    }

    /// Overwrite the continuous position on `axis` from a corrected box
    pub(crate) fn place_rect(&mut self, axis: Axis, rect: Rect) {
        self.rect = rect;
        match axis {
            Axis::Horizontal => self.pos.x = rect.x as f32,
            Axis::Vertical => self.pos.y = rect.y as f32,
        }
    }

    /// Thin rectangle directly above the head, spanning the body's width
    pub fn head_probe(&self, height: i32) -> Rect {
        Rect::new(self.rect.x, self.rect.y - height, self.rect.w, height)
    }
}
