use std::fs;

use skirmish_core::{
    Direction, Game, GameConfig, InputJournal, Offset, TurnPhase, replay_to_end,
};

/// Walks toward the nearest enemy, attacking when adjacent.
fn hunting_step(game: &Game) -> Direction {
    let state = game.state();
    let player = state.player().pos;
    let target = state
        .roster
        .iter()
        .map(|id| state.units[*id].pos)
        .min_by_key(|pos| pos.distance_squared(player));
    let Some(target) = target else {
        return Direction::UP;
    };
    let toward = Offset::toward(player, target);
    // Prefer the horizontal axis so every step is orthogonal.
    Direction::new(toward.dx(), 0)
        .or_else(|| Direction::new(0, toward.dy()))
        .unwrap_or(Direction::UP)
}

#[test]
fn test_file_journal_replay_equivalence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let journal_path = dir.path().join("skirmish_journal.json");
    let seed = 2024;
    let config = GameConfig::default();

    let mut game = Game::new(seed, &config).expect("setup");
    let mut journal = InputJournal::new(seed, config);
    for _ in 0..200 {
        if game.phase() == TurnPhase::GameOver {
            game.restart();
            journal.append_restart();
            continue;
        }
        let direction = hunting_step(&game);
        let report = game.submit_direction(direction).expect("player turn");
        journal.append_direction(direction, report.clock_ms);
    }
    let original_hash = game.snapshot_hash();

    let raw = serde_json::to_string_pretty(&journal).expect("serialize journal");
    fs::write(&journal_path, raw).expect("write journal");
    let loaded: InputJournal =
        serde_json::from_str(&fs::read_to_string(&journal_path).expect("read journal"))
            .expect("parse journal");
    assert_eq!(loaded, journal);

    let result = replay_to_end(&loaded).expect("replay");
    assert_eq!(result.final_snapshot_hash, original_hash, "replayed hash must match live play");
}
