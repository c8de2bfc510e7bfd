//! Text formatting for the status bar, stats panel and combat log.

use app::app_loop::AppMode;
use app::{format_seed, format_snapshot_hash};
use skirmish_core::{CombatLogEntry, CombatLogOutcome, PlayerSnapshot};

pub fn status_text(mode: AppMode, turn: u64) -> String {
    match mode {
        AppMode::Playing => format!("Turn {turn} - arrows/WASD move, R restart"),
        AppMode::GameOver => "Game Over - press R to restart".to_string(),
    }
}

pub fn stats_panel_lines(player: &PlayerSnapshot) -> Vec<String> {
    vec![
        "Player Stats:".to_string(),
        format!("Health: {}/{}", player.hp.max(0), player.max_hp),
        format!("Level: {}", player.level),
        format!("XP: {}/{}", player.experience, player.experience_to_next),
        format!("Gold: {}", player.gold),
        format!("Attack: {}  Defense: {}", player.attack, player.defense),
    ]
}

pub fn session_lines(seed: u64, snapshot_hash: u64) -> Vec<String> {
    vec![
        format!("Seed: {}", format_seed(seed)),
        format!("Hash: {}", format_snapshot_hash(snapshot_hash)),
    ]
}

/// A hit renders as two lines: the blow and the defender's remaining health.
pub fn combat_log_lines(entry: &CombatLogEntry) -> Vec<String> {
    let attacker = capitalized(entry.attacker.label());
    let defender = entry.defender.label();
    match entry.outcome {
        CombatLogOutcome::Hit { damage, defender_hp, defender_max_hp } => vec![
            format!("{attacker} hits {defender} for {damage} damage!"),
            format!("{defender}: {}/{defender_max_hp} HP", defender_hp.max(0)),
        ],
        CombatLogOutcome::Killed => vec![format!("{attacker} killed {defender}!")],
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
