//! Controller tests - lifecycle, timing and locking through the public API

use blockfall::core::{Game, GameConfig, GameStatus, Piece, RandomizerKind};
use blockfall::types::{Control, GridCoordinate, InputEvent, PieceKind};

fn game_with(config: GameConfig) -> Game {
    let mut game = Game::new(config).unwrap();
    game.start(0);
    game
}

fn hard_drop(game: &mut Game) {
    game.handle_input(InputEvent::Press(Control::HardDrop));
    game.update(16);
}

#[test]
fn stacking_in_the_middle_tops_out() {
    let mut game = game_with(GameConfig::default().with_seed(9));
    let mut locks = 0;
    while !game.is_game_over() && locks < 100 {
        hard_drop(&mut game);
        if let Some(event) = game.take_last_event() {
            if !event.topped_out {
                locks += 1;
            }
            assert_eq!(event.lines_cleared, 0);
        }
        assert_eq!(game.grid().filled_count(), locks * 4);
    }
    assert!(game.is_game_over());
    assert!(locks < 60);
    assert_eq!(game.lines(), 0);

    let snap = game.snapshot();
    assert!(snap.game_over());
    assert!(snap.ghost.is_none());
    assert!(snap.active.is_some());
}

#[test]
fn long_frame_advances_gravity_once() {
    let mut game = game_with(GameConfig::default());
    game.update(10_000);
    let lowest = game
        .current()
        .unwrap()
        .cells()
        .iter()
        .map(|c| c.row)
        .max();
    assert_eq!(lowest, Some(0));
}

#[test]
fn custom_width_spawns_centered() {
    let config = GameConfig {
        cols: 16,
        rows: 30,
        ..GameConfig::default()
    };
    let mut game = game_with(config);
    game.replace_current(Piece::spawn_for_width(PieceKind::O, 16));
    let cols: Vec<i32> = game.current().unwrap().cells().iter().map(|c| c.col).collect();
    assert!(cols.iter().all(|&c| c == 7 || c == 8));

    hard_drop(&mut game);
    assert_eq!(
        game.grid().get(GridCoordinate::new(29, 7)),
        Some(Some(PieceKind::O))
    );
}

#[test]
fn two_lines_clear_in_one_lock() {
    let mut game = game_with(GameConfig::default());
    for row in [18, 19] {
        for col in 0..10 {
            if col != 4 && col != 5 {
                game.grid_mut()
                    .set(GridCoordinate::new(row, col), Some(PieceKind::L));
            }
        }
    }
    game.replace_current(Piece::spawn(PieceKind::O));
    hard_drop(&mut game);

    let event = game.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 2);
    assert_eq!(event.rows, vec![19, 18]);
    assert_eq!(game.lines(), 2);
    assert_eq!(game.grid().filled_count(), 0);
}

#[test]
fn uniform_randomizer_game_runs() {
    let config = GameConfig {
        randomizer: RandomizerKind::Uniform,
        queue_size: 3,
        ..GameConfig::default()
    };
    let mut game = game_with(config);
    assert_eq!(game.snapshot().next_queue.len(), 3);
    for _ in 0..5 {
        hard_drop(&mut game);
    }
    assert_eq!(game.status(), GameStatus::Running);
}

#[test]
fn stop_then_update_is_inert() {
    let mut game = game_with(GameConfig::default());
    game.handle_input(InputEvent::Press(Control::Left));
    game.stop();
    game.stop();
    let before = *game.current().unwrap();
    game.update(500);
    assert_eq!(*game.current().unwrap(), before);
    assert!(!game.input().left);
}
