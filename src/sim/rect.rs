//! Integer axis-aligned rectangles for hitboxes and the arena
//!
//! Hitboxes live on the pixel grid: positions are snapped from the float
//! simulation state, and intersection uses the half-open convention
//! (touching edges do not overlap).

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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

    /// Rectangle of the given size whose top-left is the truncated float position
    pub fn snapped(pos: Vec2, size: i32) -> Self {
        Self::new(pos.x as i32, pos.y as i32, size, size)
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

    /// Integer center (rounds toward the top-left for odd sizes)
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Float center, used as a steering target
    pub fn center_f32(&self) -> Vec2 {
        self.center().as_vec2()
    }

    /// Rectangle of the given size centered inside this one
    pub fn centered_square(&self, size: i32) -> Self {
        Self::new(
            self.x + self.w / 2 - size / 2,
            self.y + self.h / 2 - size / 2,
            size,
            size,
        )
    }

    /// Whether two rectangles overlap (empty rectangles never do)
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Push this rectangle back inside `bounds`, edge by edge.
    ///
    /// Right/bottom win over left/top when the rectangle is larger than the bounds.
    pub fn clamp_within(&mut self, bounds: &Rect) {
        if self.left() < bounds.left() {
            self.x = bounds.left();
        }
        if self.right() > bounds.right() {
            self.x = bounds.right() - self.w;
        }
        if self.top() < bounds.top() {
            self.y = bounds.top();
        }
        if self.bottom() > bounds.bottom() {
            self.y = bounds.bottom() - self.h;
        }
    }

    /// True once this rectangle is strictly outside a `width` x `height` viewport
    /// anchored at the origin
    pub fn is_outside_viewport(&self, width: i32, height: i32) -> bool {
        self.right() < 0 || self.left() > width || self.bottom() < 0 || self.top() > height
    }
}
