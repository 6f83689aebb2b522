//! Enemy attack patterns
//!
//! Each pattern is a periodic bullet generator driven by the attack timer.
//! A pattern is invoked once per tick and decides for itself, via
//! `elapsed % period`, whether this tick emits anything.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletBehavior, BulletColor};
use super::rect::Rect;
use crate::consts::BULLET_SIZE;
use crate::settings::PatternPool;
use crate::{polar_to_cartesian, wrap_angle};

/// Closed set of attack patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPattern {
    /// Bullets fall from above the arena at random x
    Rain,
    /// Single rotating arm from the center
    Spiral,
    /// Four bullets from the center along the cardinal axes
    Cross,
    /// Bullets from random edge points aimed at the center
    Scatter,
    /// Rows of falling bullets along a sine curve
    Wave,
    /// Rings of bullets expanding from the center
    ExpandingCircle,
    /// Radial line of small bullets along a rotating angle
    LaserSweep,
    /// Bullets alternating sides, swinging horizontally as they fall
    Zigzag,
    /// Slow bullets that steer toward the player
    Homing,
}

impl AttackPattern {
    /// The four patterns every enemy knows
    pub const CORE: [AttackPattern; 4] = [
        AttackPattern::Rain,
        AttackPattern::Spiral,
        AttackPattern::Cross,
        AttackPattern::Scatter,
    ];

    /// Advanced patterns usable as alternates
    pub const EXTENDED: [AttackPattern; 5] = [
        AttackPattern::Wave,
        AttackPattern::ExpandingCircle,
        AttackPattern::LaserSweep,
        AttackPattern::Zigzag,
        AttackPattern::Homing,
    ];

    pub const ALL: [AttackPattern; 9] = [
        AttackPattern::Rain,
        AttackPattern::Spiral,
        AttackPattern::Cross,
        AttackPattern::Scatter,
        AttackPattern::Wave,
        AttackPattern::ExpandingCircle,
        AttackPattern::LaserSweep,
        AttackPattern::Zigzag,
        AttackPattern::Homing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AttackPattern::Rain => "rain",
            AttackPattern::Spiral => "spiral",
            AttackPattern::Cross => "cross",
            AttackPattern::Scatter => "scatter",
            AttackPattern::Wave => "wave",
            AttackPattern::ExpandingCircle => "expanding circle",
            AttackPattern::LaserSweep => "laser sweep",
            AttackPattern::Zigzag => "zigzag",
            AttackPattern::Homing => "homing",
        }
    }

    /// Spawn period in ticks
    pub fn period(self) -> u32 {
        match self {
            AttackPattern::Rain => 15,
            AttackPattern::Spiral => 8,
            AttackPattern::Cross => 20,
            AttackPattern::Scatter => 12,
            AttackPattern::Wave => 10,
            AttackPattern::ExpandingCircle => 30,
            AttackPattern::LaserSweep => 5,
            AttackPattern::Zigzag => 15,
            AttackPattern::Homing => 40,
        }
    }

    /// Uniform draw from a pool (repeats allowed)
    pub fn choose<R: Rng>(pool: PatternPool, rng: &mut R) -> AttackPattern {
        let patterns = pool.patterns();
        patterns[rng.random_range(0..patterns.len())]
    }

    /// Bullets emitted at `elapsed` ticks into the attack (usually none)
    pub fn spawn<R: Rng>(self, elapsed: u32, arena: &Rect, rng: &mut R) -> Vec<Bullet> {
        if elapsed % self.period() != 0 {
            return Vec::new();
        }

        match self {
            AttackPattern::Rain => rain(arena, rng),
            AttackPattern::Spiral => spiral(elapsed, arena),
            AttackPattern::Cross => cross(arena),
            AttackPattern::Scatter => scatter(arena, rng),
            AttackPattern::Wave => wave(elapsed, arena),
            AttackPattern::ExpandingCircle => expanding_circle(arena),
            AttackPattern::LaserSweep => laser_sweep(elapsed, arena),
            AttackPattern::Zigzag => zigzag(elapsed, arena),
            AttackPattern::Homing => homing(arena, rng),
        }
    }
}

/// Arena center on the pixel grid
fn center(arena: &Rect) -> Vec2 {
    arena.center().as_vec2()
}

fn rain<R: Rng>(arena: &Rect, rng: &mut R) -> Vec<Bullet> {
    let x = rng.random_range(arena.left()..=arena.right() - BULLET_SIZE);
    let y = arena.top() - BULLET_SIZE;
    let vy = rng.random_range(2.0..=4.0);
    vec![Bullet::new(
        Vec2::new(x as f32, y as f32),
        Vec2::new(0.0, vy),
        BulletColor::Yellow,
    )]
}

fn spiral(elapsed: u32, arena: &Rect) -> Vec<Bullet> {
    let angle = wrap_angle(elapsed as f32 * 0.2);
    vec![Bullet::new(
        center(arena),
        polar_to_cartesian(3.0, angle),
        BulletColor::Blue,
    )]
}

fn cross(arena: &Rect) -> Vec<Bullet> {
    // Up, right, down, left (screen y grows downward)
    const DIRECTIONS: [Vec2; 4] = [
        Vec2::new(0.0, -1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(-1.0, 0.0),
    ];
    let origin = center(arena);
    DIRECTIONS
        .iter()
        .map(|&dir| Bullet::new(origin, dir * 3.0, BulletColor::Orange))
        .collect()
}

fn scatter<R: Rng>(arena: &Rect, rng: &mut R) -> Vec<Bullet> {
    let (x, y) = match rng.random_range(0..4) {
        0 => (
            rng.random_range(arena.left()..=arena.right()),
            arena.top() - BULLET_SIZE,
        ),
        1 => (
            arena.right(),
            rng.random_range(arena.top()..=arena.bottom()),
        ),
        2 => (
            rng.random_range(arena.left()..=arena.right()),
            arena.bottom(),
        ),
        _ => (
            arena.left() - BULLET_SIZE,
            rng.random_range(arena.top()..=arena.bottom()),
        ),
    };
    let pos = Vec2::new(x as f32, y as f32);
    let vel = (center(arena) - pos).normalize_or_zero() * 2.5;
    vec![Bullet::new(pos, vel, BulletColor::Purple)]
}

fn wave(elapsed: u32, arena: &Rect) -> Vec<Bullet> {
    let c = center(arena);
    (0..5)
        .map(|i| {
            let angle = elapsed as f32 * 0.1 + i as f32 * 0.5;
            let pos = Vec2::new(c.x + angle.sin() * 100.0, c.y - 150.0);
            Bullet::new(pos, Vec2::new(0.0, 3.0), BulletColor::Blue)
        })
        .collect()
}

fn expanding_circle(arena: &Rect) -> Vec<Bullet> {
    const COUNT: u32 = 12;
    const RADIUS: f32 = 30.0;
    let c = center(arena);
    (0..COUNT)
        .map(|i| {
            let angle = TAU * i as f32 / COUNT as f32;
            Bullet::new(
                c + polar_to_cartesian(RADIUS, angle),
                polar_to_cartesian(2.0, angle),
                BulletColor::Orange,
            )
        })
        .collect()
}

fn laser_sweep(elapsed: u32, arena: &Rect) -> Vec<Bullet> {
    const POINTS: u32 = 10;
    const LENGTH: f32 = 200.0;
    let angle = wrap_angle(elapsed as f32 * 0.05);
    let c = center(arena);
    (0..POINTS)
        .map(|i| {
            let t = i as f32 / (POINTS - 1) as f32;
            Bullet::new(
                c + polar_to_cartesian(LENGTH * t, angle),
                polar_to_cartesian(1.0, angle),
                BulletColor::Red,
            )
            .with_size(BULLET_SIZE / 2)
            .with_damage(5)
        })
        .collect()
}

fn zigzag(elapsed: u32, arena: &Rect) -> Vec<Bullet> {
    let side = if (elapsed / 15) % 2 == 0 { 1.0 } else { -1.0 };
    let c = center(arena);
    let bullet = Bullet::new(
        Vec2::new(c.x + side * 150.0, c.y - 100.0),
        Vec2::new(-side * 2.0, 3.0),
        BulletColor::Purple,
    )
    .with_behavior(BulletBehavior::Zigzag { timer: 0 });
    vec![bullet]
}

fn homing<R: Rng>(arena: &Rect, rng: &mut R) -> Vec<Bullet> {
    let c = center(arena);
    let corners = [
        Vec2::new(c.x - 100.0, c.y - 100.0),
        Vec2::new(c.x + 100.0, c.y - 100.0),
        Vec2::new(c.x - 100.0, c.y + 100.0),
        Vec2::new(c.x + 100.0, c.y + 100.0),
    ];
    let start = corners[rng.random_range(0..corners.len())];
    let bullet = Bullet::new(start, Vec2::ZERO, BulletColor::Pink)
        .with_damage(15)
        .with_behavior(BulletBehavior::Homing);
    vec![bullet]
}
