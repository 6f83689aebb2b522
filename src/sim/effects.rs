//! Cosmetic effect requests and gameplay events
//!
//! The simulation never draws anything. It records what happened and what
//! the renderer may want to show; the caller drains both queues each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::patterns::AttackPattern;
use super::state::{CombatPhase, PlayerAction};

/// Particle effect styles the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Twinkling stars
    Stars,
    /// Burst with gravity
    Explosion,
    /// Rising green sparks
    Heal,
    /// Red upward spray
    Damage,
}

/// A request to spawn an effect at a screen position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub pos: Vec2,
}

/// Pending effect requests, owned by the combat state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectQueue {
    pending: Vec<EffectRequest>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: EffectKind, pos: Vec2) {
        self.pending.push(EffectRequest { kind, pos });
    }

    /// Take every pending request, oldest first
    pub fn drain(&mut self) -> Vec<EffectRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    PhaseChanged { from: CombatPhase, to: CombatPhase },
    ActionExecuted(PlayerAction),
    EnemyDamaged { amount: i32, hp: i32 },
    PlayerHealed { amount: i32, hp: i32 },
    AttackStarted(AttackPattern),
    PlayerHit { damage: i32, hp: i32 },
    MercyRefused,
}
