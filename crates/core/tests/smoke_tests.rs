use skirmish_core::{
    Direction, EnemySpawn, Game, GameConfig, GameEvent, ManualClock, Reward, TurnPhase, UnitKind,
};

#[test]
fn test_smoke_duel_on_the_road_ends_with_a_kill() {
    let config = GameConfig {
        enemies: vec![EnemySpawn { kind: UnitKind::Warrior, x: 7, y: 5 }],
        ..GameConfig::default()
    };
    let mut game = Game::new(99, &config).expect("setup");
    let mut died = Vec::new();

    for _ in 0..20 {
        if game.state().roster.is_empty() {
            break;
        }
        game.submit_direction(Direction::UP).expect("player turn");
        died.extend(game.drain_events().into_iter().filter_map(|event| match event {
            GameEvent::UnitDied { kind, reward, .. } => Some((kind, reward)),
            _ => None,
        }));
    }

    assert_eq!(died, vec![(UnitKind::Warrior, Some(Reward { experience: 20, gold: 10 }))]);
    let player = game.player_snapshot();
    assert_eq!((player.experience, player.gold), (20, 10));
    assert!(player.hp < 100, "the warrior should land at least one blow");
    assert_eq!(game.phase(), TurnPhase::PlayerTurn);
}

#[test]
fn test_smoke_restart_after_defeat() {
    // Four archers box the player in; each turn of the logical clock lets all of them fire.
    let enemies = [(7, 6), (7, 8), (6, 7), (8, 7)]
        .into_iter()
        .map(|(x, y)| EnemySpawn { kind: UnitKind::Archer, x, y })
        .collect();
    let config = GameConfig { enemies, ..GameConfig::default() };
    let mut game = Game::new(5, &config).expect("setup");
    let initial = game.unit_snapshots();

    let first = game.submit_direction(Direction::UP).expect("player turn");
    assert_eq!(first.enemies_acted, 4);
    assert_eq!(game.player_snapshot().hp, 100 - 4 * 16);

    let second = game.submit_direction(Direction::UP).expect("player turn");
    assert_eq!(second.phase, TurnPhase::GameOver);
    assert_eq!(game.phase(), TurnPhase::GameOver);
    assert_eq!(game.player_snapshot().hp, 0);
    assert!(game.events().contains(&GameEvent::GameOver));

    game.restart();

    assert_eq!(game.phase(), TurnPhase::PlayerTurn);
    assert_eq!(game.turn(), 0);
    assert_eq!(game.player_snapshot().hp, 100);
    assert_eq!(game.unit_snapshots(), initial);
}

#[test]
fn test_smoke_wall_clock_cooldowns_hold_enemies_between_rapid_turns() {
    let clock = ManualClock::new();
    let mut game =
        Game::with_clock(8, &GameConfig::default(), Box::new(clock.clone())).expect("setup");

    let first = game.submit_direction(Direction::LEFT).expect("player turn");
    assert_eq!(first.enemies_acted, 4, "fresh enemies act immediately");

    let second = game.submit_direction(Direction::RIGHT).expect("player turn");
    assert_eq!(second.enemies_acted, 0, "no time has passed");

    clock.advance(1000);
    let third = game.submit_direction(Direction::LEFT).expect("player turn");
    assert_eq!(third.enemies_acted, 2, "only archers are ready after one second");

    clock.advance(200);
    let fourth = game.submit_direction(Direction::RIGHT).expect("player turn");
    assert_eq!(fourth.enemies_acted, 2, "warriors follow after 1.2 seconds");
}

#[test]
fn test_smoke_kill_rewards_follow_unit_died_events() {
    let mut game = Game::new(31, &GameConfig::default()).expect("setup");
    let mut expected_gold = 0;

    for turn in 0..3000 {
        if game.phase() == TurnPhase::GameOver || game.state().roster.is_empty() {
            break;
        }
        let direction = if turn % 2 == 0 { Direction::LEFT } else { Direction::RIGHT };
        game.submit_direction(direction).expect("player turn");
        for event in game.drain_events() {
            if let GameEvent::UnitDied { kind, reward: Some(Reward { gold, .. }), .. } = event {
                assert_ne!(kind, UnitKind::Player);
                expected_gold += gold;
            }
        }
    }

    assert_eq!(game.player_snapshot().gold, expected_gold);
}
