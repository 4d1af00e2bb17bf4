use blockfall::core::{Game, GameConfig, GameSnapshot, GameStatus, Piece};
use blockfall::term::{AnchorY, GameView, Viewport};
use blockfall::types::{Control, InputEvent, PieceKind};

fn started() -> Game {
    let mut game = Game::new(GameConfig::default()).unwrap();
    game.start(0);
    game
}

fn find_text(fb: &blockfall::term::FrameBuffer, text: &str) -> Option<(u16, u16)> {
    (0..fb.height()).find_map(|y| {
        fb.row_text(y)
            .chars()
            .collect::<String>()
            .find(text)
            .map(|byte_x| (fb.row_text(y)[..byte_x].chars().count() as u16, y))
    })
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSnapshot::default();
    // 10 cells x 2 columns + border = 22 wide, 20 rows + border = 22 tall.
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19 * 10] = Some(PieceKind::I);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let mut game = started();
    game.replace_current(Piece::spawn(PieceKind::O).shifted(5, 0));
    let snap = game.snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // O occupies rows 3..=4, cols 4..=5; ghost rows 18..=19.
    assert_eq!(fb.get(1 + 4 * 2, 1 + 3).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 5 * 2 + 1, 1 + 4).unwrap().ch, '█');
    assert_eq!(fb.get(1 + 4 * 2, 1 + 19).unwrap().ch, '░');
    assert_eq!(fb.get(1 + 4 * 2, 1 + 10).unwrap().ch, '·');
}

#[test]
fn cells_above_field_are_not_drawn() {
    let game = started();
    let snap = game.snapshot();
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(9, 0).unwrap().ch, '─');
}

#[test]
fn side_panel_shows_hold_next_level_lines() {
    let mut game = started();
    let first = game.current().unwrap().kind();
    game.handle_input(InputEvent::Press(Control::Hold));
    game.update(16);
    let snap = game.snapshot();

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(40, 24));

    let (hx, hy) = find_text(&fb, "HOLD").unwrap();
    assert_eq!(fb.get(hx, hy + 1).unwrap().ch, first.letter().chars().next().unwrap());
    assert!(fb.get(hx, hy + 1).unwrap().style.dim);

    let (nx, ny) = find_text(&fb, "NEXT").unwrap();
    for (i, kind) in snap.next_queue.iter().enumerate() {
        let ch = fb.get(nx, ny + 1 + i as u16).unwrap().ch;
        assert_eq!(ch, kind.letter().chars().next().unwrap());
    }

    let (lx, ly) = find_text(&fb, "LEVEL").unwrap();
    assert_eq!(fb.get(lx, ly + 1).unwrap().ch, '1');
    assert!(find_text(&fb, "LINES").is_some());
}

#[test]
fn game_over_overlay_replaces_nothing_else() {
    let mut snap = GameSnapshot::default();
    snap.status = GameStatus::GameOver;
    snap.board[0] = Some(PieceKind::T);
    let fb = GameView::default().render(&snap, Viewport::new(40, 24));
    assert!(find_text(&fb, "GAME OVER").is_some());
    assert!(find_text(&fb, "STOPPED").is_none());

    snap.status = GameStatus::Running;
    let fb = GameView::default().render(&snap, Viewport::new(40, 24));
    assert!(find_text(&fb, "GAME OVER").is_none());
}
