//! Projectiles fired by enemy attack patterns
//!
//! A bullet keeps its position in float precision and derives an integer
//! hitbox from it every step. Special movement lives in [`BulletBehavior`]
//! and is applied once per tick before integration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{BULLET_DAMAGE, BULLET_SIZE};

/// Zigzag bullets reverse their horizontal velocity this often (in their own ticks)
pub const ZIGZAG_FLIP_TICKS: u32 = 20;
/// Fraction of the way homing velocity moves toward the desired velocity each tick
pub const HOMING_STRENGTH: f32 = 0.1;
/// Speed of the desired homing velocity
pub const HOMING_SPEED: f32 = 2.0;

/// Color tag for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletColor {
    Yellow,
    Blue,
    Orange,
    Purple,
    Red,
    Pink,
}

impl BulletColor {
    /// Display color as RGB
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BulletColor::Yellow => [255, 255, 0],
            BulletColor::Blue => [0, 0, 255],
            BulletColor::Orange => [255, 165, 0],
            BulletColor::Purple => [128, 0, 128],
            BulletColor::Red => [255, 0, 0],
            BulletColor::Pink => [255, 100, 255],
        }
    }
}

/// Per-bullet movement behavior
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum BulletBehavior {
    /// Straight line at constant velocity
    #[default]
    Plain,
    /// Horizontal velocity flips every [`ZIGZAG_FLIP_TICKS`] of the bullet's lifetime
    Zigzag { timer: u32 },
    /// Velocity eases toward the player's current center
    Homing,
}

/// A single projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Top-left corner in float precision
    pub pos: Vec2,
    pub vel: Vec2,
    /// Square hitbox edge length
    pub size: i32,
    pub damage: i32,
    pub color: BulletColor,
    pub behavior: BulletBehavior,
    /// Pixel-snapped hitbox, refreshed after every move
    hitbox: Rect,
}

impl Bullet {
    /// Plain bullet with default size and damage
    pub fn new(pos: Vec2, vel: Vec2, color: BulletColor) -> Self {
        Self {
            pos,
            vel,
            size: BULLET_SIZE,
            damage: BULLET_DAMAGE,
            color,
            behavior: BulletBehavior::Plain,
            hitbox: Rect::snapped(pos, BULLET_SIZE),
        }
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self.hitbox = Rect::snapped(self.pos, size);
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_behavior(mut self, behavior: BulletBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    #[inline]
    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Apply behavior-specific velocity changes for this tick.
    ///
    /// `target` is the player's current center; only homing bullets read it.
    pub fn steer(&mut self, target: Vec2) {
        match &mut self.behavior {
            BulletBehavior::Plain => {}
            BulletBehavior::Zigzag { timer } => {
                *timer += 1;
                if *timer % ZIGZAG_FLIP_TICKS == 0 {
                    self.vel.x = -self.vel.x;
                }
            }
            BulletBehavior::Homing => {
                let delta = target - self.pos;
                let distance = delta.length();
                if distance > 0.0 {
                    let desired = delta / distance * HOMING_SPEED;
                    self.vel += (desired - self.vel) * HOMING_STRENGTH;
                }
            }
        }
    }

    /// Integrate one tick and re-snap the hitbox
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.hitbox = Rect::snapped(self.pos, self.size);
    }
}
