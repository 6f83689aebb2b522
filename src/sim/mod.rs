//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bullets in spawn order)
//! - No rendering or platform dependencies

pub mod bullet;
pub mod collision;
pub mod effects;
pub mod patterns;
pub mod rect;
pub mod state;
pub mod tick;

pub use bullet::{Bullet, BulletBehavior, BulletColor};
pub use collision::{BulletPass, update_bullets};
pub use effects::{CombatEvent, EffectKind, EffectQueue, EffectRequest};
pub use patterns::AttackPattern;
pub use rect::Rect;
pub use state::{CombatPhase, CombatState, Enemy, MoveInput, Player, PlayerAction};
pub use tick::{TickInput, execute_action, tick};
