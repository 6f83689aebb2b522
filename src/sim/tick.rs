//! Fixed timestep simulation tick
//!
//! Core combat loop that advances the turn state machine deterministically.

use glam::Vec2;

use super::collision::update_bullets;
use super::effects::{CombatEvent, EffectKind};
use super::patterns::AttackPattern;
use super::state::{CombatPhase, CombatState, MoveInput, PlayerAction};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Menu cursor one slot left (edge-triggered, player turn only)
    pub cursor_left: bool,
    /// Menu cursor one slot right (edge-triggered, player turn only)
    pub cursor_right: bool,
    /// Confirm the highlighted action
    pub confirm: bool,
    /// Held directions (enemy turn only)
    pub movement: MoveInput,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the combat by one fixed timestep
pub fn tick(state: &mut CombatState, input: &TickInput) {
    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    // Discrete menu events are handled before the update pass
    if state.phase == CombatPhase::PlayerTurn {
        handle_menu_input(state, &input);
    }

    state.time_ticks += 1;

    state.message_timer = state.message_timer.saturating_sub(1);
    state.transition_timer = state.transition_timer.saturating_sub(1);

    // Runs in every phase, including the terminal ones
    state.player.update();

    match state.phase {
        CombatPhase::TurnTransition => {
            if state.transition_timer == 0 {
                start_enemy_attack(state);
            }
        }
        CombatPhase::EnemyTurn => update_enemy_turn(state, &input.movement),
        CombatPhase::PlayerTurn | CombatPhase::GameOver | CombatPhase::Victory => {}
    }

    check_outcome(state);
}

/// Cursor moves, then confirm. Executing an action ends menu handling for the turn.
fn handle_menu_input(state: &mut CombatState, input: &TickInput) {
    if input.cursor_left {
        state.player.cursor_left();
    }
    if input.cursor_right {
        state.player.cursor_right();
    }
    if input.confirm {
        let action = state.player.selected();
        execute_action(state, action);
    }
}

/// Resolve one menu action. Only meaningful during the player's turn.
pub fn execute_action(state: &mut CombatState, action: PlayerAction) {
    if state.phase != CombatPhase::PlayerTurn {
        log::warn!("Ignoring {:?} outside the player's turn", action);
        return;
    }

    log::info!("Player chose {}", action.label());
    state.events.push(CombatEvent::ActionExecuted(action));
    let message_ticks = state.settings.message_ticks;

    match action {
        PlayerAction::Fight => {
            let damage = state.settings.fight_damage;
            let anchor = state.enemy_anchor();
            state.effects.add(EffectKind::Explosion, anchor);

            let defeated = state.enemy.take_damage(damage);
            state.events.push(CombatEvent::EnemyDamaged {
                amount: damage,
                hp: state.enemy.hp,
            });

            if defeated {
                state.show_message(
                    format!("You dealt {} damage! Enemy defeated!", damage),
                    message_ticks,
                );
                state.set_phase(CombatPhase::Victory);
                log::info!("{} defeated", state.enemy.name);
            } else {
                state.show_message(format!("You dealt {} damage!", damage), message_ticks);
                begin_transition(state);
            }
        }

        PlayerAction::Act => {
            let center = state.screen_center();
            state.effects.add(EffectKind::Stars, center);
            state.show_message("You try to reason with the enemy...", message_ticks);
            begin_transition(state);
        }

        PlayerAction::Item => {
            let heal = state.settings.item_heal;
            let restored = state.player.heal(heal);
            let center = state.player.rect.center_f32();
            state.effects.add(EffectKind::Heal, center);
            state.events.push(CombatEvent::PlayerHealed {
                amount: restored,
                hp: state.player.hp,
            });
            state.show_message(format!("You healed {} HP!", heal), message_ticks);
            begin_transition(state);
        }

        PlayerAction::Mercy => {
            if state.enemy.can_be_spared(state.settings.mercy_percent) {
                state.show_message("Enemy spared! Victory!", message_ticks);
                state.set_phase(CombatPhase::Victory);
                log::info!("{} spared", state.enemy.name);
            } else {
                state.events.push(CombatEvent::MercyRefused);
                state.show_message("Enemy doesn't want mercy yet...", message_ticks);
                begin_transition(state);
            }
        }
    }
}

/// Hand the turn to the enemy after a short countdown
fn begin_transition(state: &mut CombatState) {
    state.set_phase(CombatPhase::TurnTransition);
    state.transition_timer = state.settings.transition_ticks;
    let ticks = state.settings.prompt_ticks;
    state.show_message("Enemy attacks!", ticks);
}

/// Draw a pattern and clear the field for a new attack
fn start_enemy_attack(state: &mut CombatState) {
    let pool = state.settings.pattern_pool;
    let pattern = AttackPattern::choose(pool, state.rng_mut());
    state.enemy.start_attack(pattern);
    state.attacks += 1;
    state.events.push(CombatEvent::AttackStarted(pattern));
    state.set_phase(CombatPhase::EnemyTurn);
    log::info!("Attack {}: {}", state.attacks, pattern.name());
}

/// Dodge phase: move, spawn, advance bullets, then check the attack clock
fn update_enemy_turn(state: &mut CombatState, movement: &MoveInput) {
    let arena = state.settings.arena;
    state.player.move_within(movement, &arena);

    if !state.enemy.attack_finished {
        state.enemy.attack_timer += 1;
        let elapsed = state.enemy.attack_timer;
        let pattern = state.enemy.pattern;
        let spawned = pattern.spawn(elapsed, &arena, state.rng_mut());
        state.enemy.bullets.extend(spawned);

        let viewport = (state.settings.screen_width, state.settings.screen_height);
        let pass = update_bullets(
            &mut state.enemy.bullets,
            &mut state.player,
            viewport,
            state.settings.hit_policy,
        );

        for damage in pass.hits {
            state.events.push(CombatEvent::PlayerHit {
                damage,
                hp: state.player.hp,
            });
            let center = state.player.rect.center_f32();
            state.effects.add(EffectKind::Damage, center);
        }

        if state.enemy.attack_timer >= state.settings.attack_duration {
            state.enemy.attack_finished = true;
        }
    }

    if state.enemy.attack_finished {
        state.set_phase(CombatPhase::PlayerTurn);
        let ticks = state.settings.prompt_ticks;
        state.show_message("Your turn!", ticks);
    }
}

/// Fatal checks, every tick: a dead player overrides everything
fn check_outcome(state: &mut CombatState) {
    if !state.player.is_alive() {
        if state.phase != CombatPhase::GameOver {
            state.set_phase(CombatPhase::GameOver);
            log::info!("Game over after {} ticks", state.time_ticks);
        }
    } else if state.enemy.is_defeated() {
        if state.phase != CombatPhase::Victory {
            log::info!("Victory after {} ticks", state.time_ticks);
        }
        state.set_phase(CombatPhase::Victory);
        // Replaces the killing blow's message and stays up while defeated
        let ticks = state.settings.victory_message_ticks;
        state.show_message("Victory! Enemy defeated!", ticks);
    }
}

/// How close (in px, center to center) a bullet must be before the AI dodges it
const DODGE_RADIUS: f32 = 60.0;
/// How many ticks ahead the AI projects bullet positions
const DODGE_LOOKAHEAD: f32 = 8.0;

/// Built-in player for idle/demo mode
fn autopilot(state: &CombatState) -> TickInput {
    let mut input = TickInput::default();

    match state.phase {
        CombatPhase::PlayerTurn => {
            let wanted = choose_action(state).index();
            let current = state.player.selected_action;
            if current > wanted {
                input.cursor_left = true;
            } else if current < wanted {
                input.cursor_right = true;
            } else {
                input.confirm = true;
            }
        }

        CombatPhase::EnemyTurn => {
            let me = state.player.rect.center_f32();

            // Most threatening bullet: nearest projected position within the radius
            let threat = state
                .enemy
                .bullets
                .iter()
                .map(|b| {
                    let half = b.size as f32 / 2.0;
                    b.pos + Vec2::splat(half) + b.vel * DODGE_LOOKAHEAD
                })
                .filter(|p| p.distance(me) < DODGE_RADIUS)
                .min_by(|a, b| {
                    a.distance(me)
                        .partial_cmp(&b.distance(me))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            let steer = match threat {
                Some(p) => me - p,
                None => {
                    // Drift back toward the middle of the box
                    let home = state.settings.arena.center_f32();
                    let to_home = home - me;
                    if to_home.length() > state.player.speed as f32 {
                        to_home
                    } else {
                        Vec2::ZERO
                    }
                }
            };

            input.movement = MoveInput {
                up: steer.y < -0.5,
                down: steer.y > 0.5,
                left: steer.x < -0.5,
                right: steer.x > 0.5,
            };
        }

        _ => {}
    }

    input
}

/// Spare when possible, heal when hurt, otherwise fight
fn choose_action(state: &CombatState) -> PlayerAction {
    let player = &state.player;
    if state.enemy.can_be_spared(state.settings.mercy_percent) {
        PlayerAction::Mercy
    } else if player.hp * 2 <= player.max_hp {
        PlayerAction::Item
    } else {
        PlayerAction::Fight
    }
}
