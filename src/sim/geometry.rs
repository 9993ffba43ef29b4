//! Axis-aligned rectangles and static level geometry
//!
//! Everything in the arena is a rectangle in screen space:
//! - origin at the top-left corner of the arena
//! - `x` grows to the right, `y` grows downward
//! - a rectangle is anchored at its top-left corner

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width (extends to the right)
    pub w: f32,
    /// Height (extends downward)
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square box anchored at `pos` (used for player, ghosts and levers)
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Copy of this rectangle shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect,
    /// and empty rectangles intersect nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Area shared with `other` (zero unless they strictly intersect)
    pub fn overlap_area(&self, other: &Rect) -> f32 {
        if !self.intersects(other) {
            return 0.0;
        }
        let w = (self.x + self.w).min(other.x + other.w) - self.x.max(other.x);
        let h = (self.y + self.h).min(other.y + other.h) - self.y.max(other.y);
        w * h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.w <= self.x + self.w
            && other.y + other.h <= self.y + self.h
    }
}

/// Immutable per-level static data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    /// Arena bounds, always anchored at the origin
    pub arena: Rect,
    /// Static walls, in level order
    pub walls: Vec<Rect>,
    pub goal: Rect,
    /// Player spawn point (top-left of the player box)
    pub start: Vec2,
}

impl Geometry {
    /// First static wall overlapping `rect`, if any
    pub fn blocking_wall(&self, rect: &Rect) -> Option<usize> {
        self.walls.iter().position(|wall| wall.intersects(rect))
    }

    pub fn reaches_goal(&self, rect: &Rect) -> bool {
        self.goal.intersects(rect)
    }
}
