//! Integration tests for the engine through the public API

use srs_tetris::core::{
    EngineConfig, GameOverReason, GameState, PieceBag, Phase,
};
use srs_tetris::types::{GameAction, PieceKind, Rotation};

#[test]
fn test_game_lifecycle() {
    let state = GameState::new(12345);

    assert_eq!(state.phase(), Phase::Falling);
    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.active().rotation, Rotation::North);
    assert_eq!((state.active().x, state.active().y), (3, -1));
}

#[test]
fn test_hard_drop_awards_two_per_row() {
    let mut state = GameState::new(777);
    let dy = state.ghost_dy();
    assert!(dy >= 18);

    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(state.score(), 2 * dy as u32);
    assert_eq!(state.phase(), Phase::Falling);
    // Locked without any lock-delay ticks.
    assert!(state.board().cells().iter().filter(|c| c.is_some()).count() == 4);
}

#[test]
fn test_actions_move_piece() {
    let mut state = GameState::new(12345);
    let start = state.active();

    assert!(state.apply_action(GameAction::MoveLeft));
    assert_eq!(state.active().x, start.x - 1);
    assert!(state.apply_action(GameAction::MoveRight));
    assert!(state.apply_action(GameAction::MoveRight));
    assert_eq!(state.active().x, start.x + 1);

    assert!(state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.active().y, start.y + 1);
    assert_eq!(state.score(), 1);
}

#[test]
fn test_hold_twice_is_noop_until_next_spawn() {
    let mut state = GameState::new(31);
    let first = state.active().kind();

    assert!(state.apply_action(GameAction::Hold));
    let swapped_in = state.active().kind();
    assert!(!state.apply_action(GameAction::Hold));
    assert_eq!(state.active().kind(), swapped_in);
    assert_eq!(state.hold_piece(), Some(first));

    state.apply_action(GameAction::HardDrop);
    assert!(!state.hold_used());
    assert!(state.apply_action(GameAction::Hold));
    assert_eq!(state.active().kind(), first);
}

#[test]
fn test_first_pieces_follow_the_bag() {
    let mut bag = PieceBag::new(4242);
    let state = GameState::new(4242);

    assert_eq!(state.active().kind(), bag.draw());
    assert_eq!(state.next_piece(), bag.draw());
}

#[test]
fn test_stacking_ends_in_game_over() {
    let mut state = GameState::new(8);
    let mut drops = 0;
    while !state.game_over() {
        state.apply_action(GameAction::HardDrop);
        drops += 1;
        assert!(drops < 200, "stack never topped out");
    }

    assert_eq!(state.phase(), Phase::GameOver);
    assert!(matches!(
        state.game_over_reason(),
        Some(GameOverReason::BlockOut | GameOverReason::LockOut)
    ));
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.tick(10_000));

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.phase(), Phase::Falling);
    assert_eq!(state.score(), 0);
    assert!(state.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_gravity_and_lock_delay() {
    let mut state = GameState::new(5);
    let ghost = state.ghost_dy() as u32;

    // One gravity step per full interval.
    for _ in 0..ghost {
        assert!(state.tick(800));
    }
    assert_eq!(state.ghost_dy(), 0);
    let kind = state.active().kind();

    // Touchdown starts the grace period, the next failed step locks.
    state.tick(800);
    assert!(state.on_ground());
    state.tick(800);
    assert!(state.board().cells().iter().any(|c| *c == Some(kind)));
    assert_eq!(state.active().y, -1);
}

#[test]
fn test_custom_board_size() {
    let config = EngineConfig {
        width: 6,
        height: 12,
        ..EngineConfig::seeded(3)
    };
    let mut state = GameState::with_config(config).unwrap();
    assert_eq!(state.board().width(), 6);
    assert_eq!(state.active().x, 1);

    state.apply_action(GameAction::HardDrop);
    let snap = state.snapshot();
    assert_eq!(snap.board.len(), 72);
}

#[test]
fn test_invalid_config_rejected() {
    let config = EngineConfig {
        width: 2,
        ..EngineConfig::default()
    };
    let err = GameState::with_config(config).unwrap_err();
    assert_eq!(err.code(), "invalid_board");
}

#[test]
fn test_snapshot_serializes() {
    let mut state = GameState::new(11);
    state.apply_action(GameAction::Hold);

    let json = serde_json::to_value(state.snapshot()).unwrap();
    assert_eq!(json["score"], 0);
    assert_eq!(json["hold_used"], true);
    assert!(json["hold"].is_string());
    assert_eq!(json["game_over_reason"], serde_json::Value::Null);
    assert_eq!(json["active"]["rotation"], "north");
    let kinds: Vec<&str> = PieceKind::ALL.iter().map(|k| k.as_str()).collect();
    assert!(kinds.contains(&json["next"].as_str().unwrap()));
}
