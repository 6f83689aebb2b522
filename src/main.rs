//! Dodge Duel entry point
//!
//! Headless runner: plays one combat with the built-in autopilot and prints
//! a JSON summary.
//!
//! Usage: `dodge-duel [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use dodge_duel::Settings;
#[cfg(not(target_arch = "wasm32"))]
use dodge_duel::consts::TICKS_PER_SECOND;
#[cfg(not(target_arch = "wasm32"))]
use dodge_duel::sim::{CombatEvent, CombatPhase, CombatState, TickInput, tick};

/// Give up after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 10 * 60 * TICKS_PER_SECOND as u64;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, serde::Serialize)]
struct Summary {
    seed: u64,
    outcome: CombatPhase,
    ticks: u64,
    seconds: f32,
    attacks: u32,
    hits_taken: u32,
    player_hp: i32,
    enemy_hp: i32,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dodge Duel (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| match s.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!("Ignoring seed {:?}: {}", s, e);
                None
            }
        })
        .unwrap_or_else(clock_seed);

    let mut state = CombatState::new(settings, seed);
    log::info!("Combat initialized with seed: {}", seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut hits_taken = 0;

    while !state.phase.is_terminal() && state.time_ticks < MAX_TICKS {
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                CombatEvent::PlayerHit { .. } => hits_taken += 1,
                CombatEvent::PhaseChanged { to, .. } => log::debug!("-> {:?}", to),
                _ => {}
            }
        }
        // Nobody draws the effects here
        state.effects.clear();

        if state.time_ticks % (60 * TICKS_PER_SECOND as u64) == 0 {
            log::info!(
                "{}s: player {} hp, {} {} hp",
                state.time_ticks / TICKS_PER_SECOND as u64,
                state.player.hp,
                state.enemy.name,
                state.enemy.hp
            );
        }
    }

    if !state.phase.is_terminal() {
        log::warn!("Stopped after {} ticks without a winner", MAX_TICKS);
    }

    let summary = Summary {
        seed,
        outcome: state.phase,
        ticks: state.time_ticks,
        seconds: state.time_ticks as f32 / TICKS_PER_SECOND as f32,
        attacks: state.attacks,
        hits_taken,
        player_hp: state.player.hp,
        enemy_hp: state.enemy.hp,
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize summary: {}", e);
            std::process::exit(1);
        }
    }
}

/// Seed from the wall clock when none is given
#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the only wasm artifact
}
