//! Combat settings and tuning
//!
//! Loaded from JSON; every field falls back to the compile-time default in
//! [`crate::consts`] when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{AttackPattern, Rect};

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`Settings`]
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parse but cannot describe a playable combat
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// What happens to a bullet after it damages the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HitPolicy {
    /// Bullet is destroyed when its damage is applied
    #[default]
    Consume,
    /// Bullet keeps flying; invincibility frames absorb repeat contact
    PassThrough,
}

impl HitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitPolicy::Consume => "consume",
            HitPolicy::PassThrough => "pass-through",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "consume" => Some(HitPolicy::Consume),
            "pass-through" | "passthrough" | "pass" => Some(HitPolicy::PassThrough),
            _ => None,
        }
    }
}

/// Which attack patterns an enemy draws from at the start of its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PatternPool {
    /// Rain, spiral, cross, scatter
    Core,
    /// Wave, expanding circle, laser sweep, zigzag, homing
    Extended,
    /// Every implemented pattern
    #[default]
    All,
}

impl PatternPool {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternPool::Core => "core",
            PatternPool::Extended => "extended",
            PatternPool::All => "all",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "core" => Some(PatternPool::Core),
            "extended" | "ext" => Some(PatternPool::Extended),
            "all" => Some(PatternPool::All),
            _ => None,
        }
    }

    pub fn patterns(&self) -> &'static [AttackPattern] {
        match self {
            PatternPool::Core => &AttackPattern::CORE,
            PatternPool::Extended => &AttackPattern::EXTENDED,
            PatternPool::All => &AttackPattern::ALL,
        }
    }
}

/// Arena geometry and combat tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Viewport width; bullets despawn once fully past it
    pub screen_width: i32,
    /// Viewport height
    pub screen_height: i32,
    /// Combat box the player is confined to while dodging
    pub arena: Rect,

    // === Player ===
    pub player_size: i32,
    /// Pixels per tick per held direction
    pub player_speed: i32,
    pub player_max_hp: i32,
    pub invincibility_ticks: u32,

    // === Enemy ===
    pub enemy_name: String,
    pub enemy_max_hp: i32,
    pub pattern_pool: PatternPool,
    pub hit_policy: HitPolicy,

    // === Turn pacing ===
    pub attack_duration: u32,
    pub transition_ticks: u32,
    /// How long action results stay on screen
    pub message_ticks: u32,
    /// How long short prompts ("Your turn!") stay on screen
    pub prompt_ticks: u32,
    /// How long the victory banner message stays on screen
    pub victory_message_ticks: u32,

    // === Actions ===
    pub fight_damage: i32,
    pub item_heal: i32,
    /// Mercy succeeds when enemy HP is strictly below this percentage of max
    pub mercy_percent: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            arena: Rect::new(ARENA_X, ARENA_Y, ARENA_WIDTH, ARENA_HEIGHT),

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_max_hp: PLAYER_HP,
            invincibility_ticks: INVINCIBILITY_TICKS,

            enemy_name: ENEMY_NAME.to_string(),
            enemy_max_hp: ENEMY_HP,
            pattern_pool: PatternPool::default(),
            hit_policy: HitPolicy::default(),

            attack_duration: ATTACK_DURATION,
            transition_ticks: TURN_TRANSITION_TICKS,
            message_ticks: 2 * TICKS_PER_SECOND,
            prompt_ticks: TICKS_PER_SECOND,
            victory_message_ticks: VICTORY_MESSAGE_TICKS,

            fight_damage: FIGHT_DAMAGE,
            item_heal: ITEM_HEAL,
            mercy_percent: MERCY_PERCENT,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_path(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} ({}), using default settings", e, path.as_ref().display());
                Self::default()
            }
        }
    }

    /// Reject values that would make the arena or turn loop degenerate
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if self.screen_width <= 0 || self.screen_height <= 0 {
            return invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        let screen = Rect::new(0, 0, self.screen_width, self.screen_height);
        if self.arena.w <= 0 || self.arena.h <= 0 || !screen.contains_rect(&self.arena) {
            return invalid(format!("arena {:?} must fit inside the screen", self.arena));
        }
        // Rain samples x from left..=right - bullet size
        if self.arena.w < BULLET_SIZE || self.arena.h < BULLET_SIZE {
            return invalid(format!(
                "arena {}x{} is smaller than a bullet ({} px)",
                self.arena.w, self.arena.h, BULLET_SIZE
            ));
        }
        if self.player_size <= 0
            || self.player_size > self.arena.w
            || self.player_size > self.arena.h
        {
            return invalid(format!(
                "player size {} must fit inside the arena",
                self.player_size
            ));
        }
        if self.player_speed < 0 {
            return invalid(format!("player speed {} is negative", self.player_speed));
        }
        if self.player_max_hp <= 0 || self.enemy_max_hp <= 0 {
            return invalid("max HP values must be positive".to_string());
        }
        if self.attack_duration == 0 {
            return invalid("attack duration must be at least one tick".to_string());
        }
        if self.transition_ticks == 0 {
            return invalid("turn transition must be at least one tick".to_string());
        }
        if self.invincibility_ticks == 0 {
            return invalid("invincibility must last at least one tick".to_string());
        }
        if self.fight_damage < 0 {
            return invalid(format!("fight damage {} is negative", self.fight_damage));
        }
        if self.item_heal < 0 {
            return invalid(format!("item heal {} is negative", self.item_heal));
        }
        if !(1..=100).contains(&self.mercy_percent) {
            return invalid(format!(
                "mercy percent {} must be in 1..=100",
                self.mercy_percent
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arena, Rect::new(200, 200, 400, 300));
        assert_eq!(settings.enemy_name, "Test Enemy");
        assert_eq!(settings.pattern_pool, PatternPool::All);
        assert_eq!(settings.hit_policy, HitPolicy::Consume);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json(r#"{ "enemy_max_hp": 80, "pattern_pool": "Core" }"#).unwrap();
        assert_eq!(settings.enemy_max_hp, 80);
        assert_eq!(settings.pattern_pool, PatternPool::Core);
        assert_eq!(settings.player_max_hp, PLAYER_HP);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.hit_policy = HitPolicy::PassThrough;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_arena_outside_screen() {
        let err = Settings::from_json(r#"{ "arena": { "x": 700, "y": 200, "w": 400, "h": 300 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_mercy_percent() {
        let err = Settings::from_json(r#"{ "mercy_percent": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_arena_narrower_than_bullet() {
        let err = Settings::from_json(
            r#"{ "arena": { "x": 200, "y": 200, "w": 6, "h": 300 }, "player_size": 5 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(
            r#"{ "arena": { "x": 200, "y": 200, "w": 300, "h": 7 }, "player_size": 5 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_smallest_arena_can_rain() {
        use crate::sim::AttackPattern;
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let settings = Settings::from_json(
            r#"{ "arena": { "x": 200, "y": 200, "w": 8, "h": 8 }, "player_size": 5 }"#,
        )
        .unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let bullets = AttackPattern::Rain.spawn(15, &settings.arena, &mut rng);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].pos.x, 200.0);
    }

    #[test]
    fn test_rejects_zero_transition() {
        let err = Settings::from_json(r#"{ "transition_ticks": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_invincibility() {
        let err = Settings::from_json(r#"{ "invincibility_ticks": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_negative_fight_damage() {
        let err = Settings::from_json(r#"{ "fight_damage": -1 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(Settings::from_json(r#"{ "fight_damage": 0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_negative_item_heal() {
        let err = Settings::from_json(r#"{ "item_heal": -5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(Settings::from_json(r#"{ "item_heal": 0 }"#).is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
        assert!(matches!(
            Settings::load_from_path("/definitely/not/here/settings.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(HitPolicy::from_str("Pass"), Some(HitPolicy::PassThrough));
        assert_eq!(PatternPool::from_str("ext"), Some(PatternPool::Extended));
        assert_eq!(PatternPool::from_str("nope"), None);
        assert_eq!(PatternPool::Core.patterns().len(), 4);
        assert_eq!(PatternPool::All.patterns().len(), 9);
        assert_eq!(HitPolicy::Consume.as_str(), "consume");
    }
}
