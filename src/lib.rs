//! Dodge Duel - turn-based combat with bullet-hell dodge phases
//!
//! Core modules:
//! - `sim`: Deterministic simulation (turn state machine, bullet patterns, collisions)
//! - `settings`: Data-driven arena geometry and combat tuning

pub mod settings;
pub mod sim;

pub use settings::{HitPolicy, PatternPool, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Screen (viewport) dimensions - bullets despawn once fully outside
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Combat box where the dodging happens
    pub const ARENA_X: i32 = 200;
    pub const ARENA_Y: i32 = 200;
    pub const ARENA_WIDTH: i32 = 400;
    pub const ARENA_HEIGHT: i32 = 300;

    /// Player (soul) defaults
    pub const PLAYER_SIZE: i32 = 20;
    pub const PLAYER_SPEED: i32 = 4;
    pub const PLAYER_HP: i32 = 100;
    /// Ticks of invincibility after an accepted hit (1 second)
    pub const INVINCIBILITY_TICKS: u32 = 60;

    /// Enemy defaults
    pub const ENEMY_NAME: &str = "Test Enemy";
    pub const ENEMY_HP: i32 = 50;

    /// Bullet defaults
    pub const BULLET_SIZE: i32 = 8;
    pub const BULLET_DAMAGE: i32 = 10;

    /// Length of one enemy attack (3 seconds)
    pub const ATTACK_DURATION: u32 = 180;
    /// Pause between the player's action and the enemy attack
    pub const TURN_TRANSITION_TICKS: u32 = 60;
    /// How long "Victory! Enemy defeated!" stays up (3 seconds)
    pub const VICTORY_MESSAGE_TICKS: u32 = 180;

    /// Player action tuning
    pub const FIGHT_DAMAGE: i32 = 15;
    pub const ITEM_HEAL: i32 = 20;
    /// Mercy only works below this percentage of enemy max HP
    pub const MERCY_PERCENT: i32 = 30;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
