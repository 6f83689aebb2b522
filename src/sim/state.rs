//! Combat state and entity types
//!
//! Everything one combat session needs lives in [`CombatState`]; resetting
//! it puts the player, the enemy and every timer back to their initial values.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::effects::{CombatEvent, EffectQueue};
use super::patterns::AttackPattern;
use super::rect::Rect;
use crate::settings::Settings;

/// Current phase of the combat state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    /// Player picks one action from the menu
    PlayerTurn,
    /// Short pause before the enemy attacks
    TurnTransition,
    /// Enemy attack pattern runs while the player dodges
    EnemyTurn,
    /// Player HP reached zero
    GameOver,
    /// Enemy defeated or spared
    Victory,
}

impl CombatPhase {
    /// GameOver and Victory absorb every later tick until reset
    pub fn is_terminal(self) -> bool {
        matches!(self, CombatPhase::GameOver | CombatPhase::Victory)
    }
}

/// Actions offered on the player's menu, in cursor order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Fight,
    Act,
    Item,
    Mercy,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 4] = [
        PlayerAction::Fight,
        PlayerAction::Act,
        PlayerAction::Item,
        PlayerAction::Mercy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlayerAction::Fight => "FIGHT",
            PlayerAction::Act => "ACT",
            PlayerAction::Item => "ITEM",
            PlayerAction::Mercy => "MERCY",
        }
    }

    /// Cursor position of this action
    pub fn index(self) -> usize {
        match self {
            PlayerAction::Fight => 0,
            PlayerAction::Act => 1,
            PlayerAction::Item => 2,
            PlayerAction::Mercy => 3,
        }
    }
}

/// Held movement directions for one tick of the dodge phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player's soul
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Hitbox; also the drawn square
    pub rect: Rect,
    /// May go negative after a hit; anything <= 0 is dead
    pub hp: i32,
    pub max_hp: i32,
    /// Pixels per tick per held direction
    pub speed: i32,
    /// Menu cursor, always a valid index into [`PlayerAction::ALL`]
    pub selected_action: usize,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub invincible_duration: u32,
}

impl Player {
    pub fn new(settings: &Settings) -> Self {
        Self {
            rect: settings.arena.centered_square(settings.player_size),
            hp: settings.player_max_hp,
            max_hp: settings.player_max_hp,
            speed: settings.player_speed,
            selected_action: 0,
            invincible: false,
            invincible_timer: 0,
            invincible_duration: settings.invincibility_ticks,
        }
    }

    /// Recenter in the arena with full HP and no invincibility
    pub fn reset(&mut self, arena: &Rect) {
        self.max_hp = self.max_hp.max(1);
        self.rect = arena.centered_square(self.rect.w);
        self.hp = self.max_hp;
        self.selected_action = 0;
        self.invincible = false;
        self.invincible_timer = 0;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn selected(&self) -> PlayerAction {
        PlayerAction::ALL[self.selected_action.min(PlayerAction::ALL.len() - 1)]
    }

    /// Move the menu cursor one slot left (stops at the first action)
    pub fn cursor_left(&mut self) {
        self.selected_action = self.selected_action.saturating_sub(1);
    }

    /// Move the menu cursor one slot right (stops at the last action)
    pub fn cursor_right(&mut self) {
        self.selected_action = (self.selected_action + 1).min(PlayerAction::ALL.len() - 1);
    }

    /// Apply held movement, then clamp back inside the arena
    pub fn move_within(&mut self, input: &MoveInput, arena: &Rect) {
        if input.up {
            self.rect.y -= self.speed;
        }
        if input.down {
            self.rect.y += self.speed;
        }
        if input.left {
            self.rect.x -= self.speed;
        }
        if input.right {
            self.rect.x += self.speed;
        }
        self.rect.clamp_within(arena);
    }

    /// Count down the invincibility window (once per tick, in every phase)
    pub fn update(&mut self) {
        if self.invincible {
            self.invincible_timer = self.invincible_timer.saturating_sub(1);
            if self.invincible_timer == 0 {
                self.invincible = false;
            }
        }
    }

    /// Take a hit unless invincible. Returns whether damage was applied.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.invincible {
            return false;
        }
        self.hp -= amount;
        self.invincible = true;
        self.invincible_timer = self.invincible_duration;
        true
    }

    /// Heal up to max HP, returning the amount actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.max_hp.min(self.hp + amount);
        self.hp - before
    }

    /// Renderer hides the soul on alternating 5-tick slices while invincible
    pub fn is_flicker_hidden(&self) -> bool {
        self.invincible && self.invincible_timer % 10 < 5
    }
}

/// The enemy and the bullets of its current attack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    /// May go negative after a hit; anything <= 0 is defeated
    pub hp: i32,
    pub max_hp: i32,
    pub pattern: AttackPattern,
    /// Ticks since the current attack started
    pub attack_timer: u32,
    pub attack_finished: bool,
    pub bullets: Vec<Bullet>,
}

impl Enemy {
    pub fn new(settings: &Settings) -> Self {
        Self {
            name: settings.enemy_name.clone(),
            hp: settings.enemy_max_hp,
            max_hp: settings.enemy_max_hp,
            pattern: AttackPattern::Rain,
            attack_timer: 0,
            attack_finished: false,
            bullets: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.max_hp = self.max_hp.max(1);
        self.hp = self.max_hp;
        self.pattern = AttackPattern::Rain;
        self.attack_timer = 0;
        self.attack_finished = false;
        self.bullets.clear();
    }

    /// Begin a fresh attack with an empty field
    pub fn start_attack(&mut self, pattern: AttackPattern) {
        self.pattern = pattern;
        self.bullets.clear();
        self.attack_timer = 0;
        self.attack_finished = false;
    }

    /// Unconditional damage. Returns true if this leaves the enemy defeated.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.is_defeated()
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Mercy works only while HP is strictly below `percent`% of max
    pub fn can_be_spared(&self, percent: i32) -> bool {
        (self.hp as i64) * 100 < (self.max_hp as i64) * percent as i64
    }
}

/// Complete combat session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatState {
    /// Geometry and tuning this session was created with
    pub settings: Settings,
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: CombatPhase,
    pub player: Player,
    pub enemy: Enemy,
    /// Last message shown to the player
    pub message: String,
    /// Ticks the message stays visible
    pub message_timer: u32,
    /// Ticks left before the enemy attack starts
    pub transition_timer: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Enemy attacks started this session
    pub attacks: u32,
    /// Effect requests for the renderer
    #[serde(skip)]
    pub effects: EffectQueue,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<CombatEvent>,
}

impl CombatState {
    /// Create a new session with the given settings and seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: CombatPhase::PlayerTurn,
            player: Player::new(&settings),
            enemy: Enemy::new(&settings),
            message: String::new(),
            message_timer: 0,
            transition_timer: 0,
            time_ticks: 0,
            attacks: 0,
            effects: EffectQueue::new(),
            events: Vec::new(),
            settings,
        }
    }

    /// Start a new fight: full HP for both sides, empty field, player's turn.
    ///
    /// The RNG keeps its stream so consecutive fights differ.
    pub fn reset(&mut self) {
        self.phase = CombatPhase::PlayerTurn;
        self.player.reset(&self.settings.arena);
        self.enemy.reset();
        self.message.clear();
        self.message_timer = 0;
        self.transition_timer = 0;
        self.time_ticks = 0;
        self.attacks = 0;
        self.effects.clear();
        self.events.clear();
        log::info!("Combat reset");
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Show a message for `ticks` ticks, replacing the current one
    pub fn show_message(&mut self, text: impl Into<String>, ticks: u32) {
        self.message = text.into();
        self.message_timer = ticks;
    }

    /// The message the renderer should display this frame, if any
    pub fn current_message(&self) -> Option<&str> {
        (self.message_timer > 0 && !self.message.is_empty()).then_some(self.message.as_str())
    }

    /// Move to a new phase, recording the change
    pub fn set_phase(&mut self, to: CombatPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::debug!("Phase {:?} -> {:?} at tick {}", from, to, self.time_ticks);
        self.phase = to;
        self.events.push(CombatEvent::PhaseChanged { from, to });
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Screen-space anchor for effects on the enemy's HUD
    pub fn enemy_anchor(&self) -> Vec2 {
        Vec2::new((self.settings.screen_width - 150) as f32, 80.0)
    }

    /// Screen center
    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(
            (self.settings.screen_width / 2) as f32,
            (self.settings.screen_height / 2) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::BulletColor;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&Settings::default())
    }

    #[test]
    fn test_player_starts_centered() {
        let p = player();
        assert_eq!(p.rect, Rect::new(390, 340, PLAYER_SIZE, PLAYER_SIZE));
        assert_eq!(p.hp, PLAYER_HP);
        assert_eq!(p.selected(), PlayerAction::Fight);
    }

    #[test]
    fn test_damage_ignored_while_invincible() {
        let mut p = player();
        assert!(p.take_damage(10));
        assert_eq!(p.hp, 90);
        assert!(p.invincible);
        assert_eq!(p.invincible_timer, INVINCIBILITY_TICKS);

        assert!(!p.take_damage(10));
        assert_eq!(p.hp, 90);
        // A blocked hit does not restart the window
        assert_eq!(p.invincible_timer, INVINCIBILITY_TICKS);
    }

    #[test]
    fn test_invincibility_window_length() {
        let mut p = player();
        p.take_damage(10);
        for _ in 0..INVINCIBILITY_TICKS - 1 {
            p.update();
            assert!(p.invincible);
            assert!(!p.take_damage(10));
        }
        p.update();
        assert!(!p.invincible);
        assert!(p.take_damage(10));
        assert_eq!(p.hp, 80);
    }

    #[test]
    fn test_hp_may_go_negative() {
        let mut p = player();
        p.hp = 5;
        p.take_damage(15);
        assert_eq!(p.hp, -10);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = player();
        p.hp = 90;
        assert_eq!(p.heal(ITEM_HEAL), 10);
        assert_eq!(p.hp, PLAYER_HP);
    }

    #[test]
    fn test_cursor_clamps() {
        let mut p = player();
        p.cursor_left();
        assert_eq!(p.selected_action, 0);
        for _ in 0..10 {
            p.cursor_right();
        }
        assert_eq!(p.selected(), PlayerAction::Mercy);
    }

    #[test]
    fn test_flicker() {
        let mut p = player();
        assert!(!p.is_flicker_hidden());
        p.take_damage(1);
        // 60 % 10 == 0 -> hidden
        assert!(p.is_flicker_hidden());
        for _ in 0..5 {
            p.update();
        }
        // 55 % 10 == 5 -> visible
        assert!(!p.is_flicker_hidden());
    }

    #[test]
    fn test_enemy_damage_and_mercy_boundary() {
        let mut e = Enemy::new(&Settings::default());
        assert!(!e.take_damage(15));
        assert_eq!(e.hp, 35);

        e.hp = 14; // 0.3 * 50 - 1
        assert!(e.can_be_spared(MERCY_PERCENT));
        e.hp = 15; // exactly 0.3 * 50
        assert!(!e.can_be_spared(MERCY_PERCENT));

        e.hp = 12;
        assert!(e.take_damage(15));
        assert_eq!(e.hp, -3);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = CombatState::new(Settings::default(), 1);
        state.player.hp = 3;
        state.player.rect.x = 200;
        state.player.take_damage(0);
        state.enemy.hp = 0;
        state.enemy.bullets.push(Bullet::new(
            Vec2::new(300.0, 300.0),
            Vec2::ZERO,
            BulletColor::Red,
        ));
        state.phase = CombatPhase::Victory;
        state.transition_timer = 12;
        state.show_message("Victory!", 100);

        state.reset();

        assert_eq!(state.phase, CombatPhase::PlayerTurn);
        assert_eq!(state.player.hp, state.player.max_hp);
        assert_eq!(state.enemy.hp, state.enemy.max_hp);
        assert!(state.enemy.bullets.is_empty());
        assert!(!state.player.invincible);
        assert_eq!(state.player.rect, Rect::new(390, 340, 20, 20));
        assert_eq!(state.transition_timer, 0);
        assert_eq!(state.current_message(), None);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_arena(
            moves in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                0..400,
            ),
        ) {
            let settings = Settings::default();
            let mut p = Player::new(&settings);
            for (up, down, left, right) in moves {
                p.move_within(&MoveInput { up, down, left, right }, &settings.arena);
                prop_assert!(settings.arena.contains_rect(&p.rect));
            }
        }

        #[test]
        fn prop_invincible_hits_are_noops(hp in 1i32..=100, dmg in 0i32..50, ticks in 0u32..59) {
            let mut p = player();
            p.hp = hp;
            p.take_damage(1);
            for _ in 0..ticks {
                p.update();
            }
            let before = p.hp;
            prop_assert!(!p.take_damage(dmg));
            prop_assert_eq!(p.hp, before);
        }

        #[test]
        fn prop_heal_never_exceeds_max(hp in -50i32..=100, amount in 0i32..200) {
            let mut p = player();
            p.hp = hp;
            p.heal(amount);
            prop_assert!(p.hp <= p.max_hp);
        }
    }
}
