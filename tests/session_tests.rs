//! Session tests - the run step, scoring, speed-up and game over

use std::time::Duration;

use tlol_tetris::core::{PieceState, Tetromino};
use tlol_tetris::engine::{
    tokio_ticker, GameSession, GameView, ManualTicker, RunOutcome, SessionPhase, Ticker,
};
use tlol_tetris::types::{ConfigError, Direction, GameSettings, ShapeKind, Square};

/// View that only counts what it was asked to do
#[derive(Debug, Default)]
struct CountingView {
    score: u32,
    score_updates: u32,
    previews_shown: u32,
    previews_removed: u32,
    splash_on: u32,
    splash_off: u32,
}

impl GameView for CountingView {
    fn show_next_tetromino(&mut self, _next: &Tetromino) {
        self.previews_shown += 1;
    }

    fn remove_next_tetromino(&mut self) {
        self.previews_removed += 1;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
        self.score_updates += 1;
    }

    fn set_game_over_splash(&mut self, visible: bool) {
        if visible {
            self.splash_on += 1;
        } else {
            self.splash_off += 1;
        }
    }
}

fn settings() -> GameSettings {
    GameSettings::from_json_str(r#"{ "board": { "prefilled_rows": 0 }, "seed": 4242 }"#).unwrap()
}

fn started_session() -> GameSession<CountingView, ManualTicker> {
    let mut session = GameSession::new(settings(), ManualTicker::new()).unwrap();
    session.initialize(Some(CountingView::default())).unwrap();
    assert!(session.start());
    session
}

fn fill_row_except(session: &mut GameSession<CountingView, ManualTicker>, row: i32, holes: &[i32]) {
    let board = session.board_mut();
    for col in 0..board.columns() as i32 {
        if !holes.contains(&col) {
            board.set(col, row, Some(Square::Mushroom));
        }
    }
}

/// Drop the current piece and lock it with one plain step
fn drop_and_lock(session: &mut GameSession<CountingView, ManualTicker>) -> RunOutcome {
    session.run(Some(Direction::Drop));
    session.run(None)
}

#[test]
fn test_run_before_initialize_is_ignored() {
    let mut session: GameSession<CountingView, ManualTicker> =
        GameSession::new(settings(), ManualTicker::new()).unwrap();
    assert_eq!(session.run(None), RunOutcome::Ignored);
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[test]
fn test_initialize_requires_a_view() {
    let mut session: GameSession<CountingView, ManualTicker> =
        GameSession::new(settings(), ManualTicker::new()).unwrap();
    assert_eq!(session.restart(), Err(ConfigError::MissingView));
    assert!(!session.game_loop().is_running());

    // The view is remembered for later initializations.
    session.initialize(Some(CountingView::default())).unwrap();
    session.initialize(None).unwrap();
    assert_eq!(session.view().unwrap().splash_off, 2);
}

#[test]
fn test_locks_without_clears_score_flat_points() {
    let mut session = started_session();
    for n in 1..=6u32 {
        assert_eq!(drop_and_lock(&mut session), RunOutcome::Locked { rows_cleared: 0 });
        assert_eq!(session.score().score(), n * 10);
    }
    assert_eq!(session.score().pieces_locked(), 6);
    assert_eq!(session.score().rows_cleared(), 0);
    assert_eq!(session.view().unwrap().score, 60);
    // One reset on initialize, one update per lock
    assert_eq!(session.view().unwrap().score_updates, 7);
}

#[test]
fn test_double_clear_earns_bonus() {
    let mut session = started_session();
    fill_row_except(&mut session, 18, &[4, 5]);
    fill_row_except(&mut session, 19, &[4, 5]);
    assert!(session.board_mut().spawn_tetromino(ShapeKind::Square));

    assert_eq!(drop_and_lock(&mut session), RunOutcome::Locked { rows_cleared: 2 });
    assert_eq!(session.score().score(), 10 + 40 * 4);
    assert_eq!(session.board().occupied_count(), 0);
}

#[test]
fn test_bonus_beats_separate_clears() {
    let single = {
        let mut session = started_session();
        fill_row_except(&mut session, 19, &[3, 4, 5, 6]);
        session.board_mut().spawn_tetromino(ShapeKind::Line);
        drop_and_lock(&mut session);
        session.score().score() - 10
    };

    let mut session = started_session();
    for row in 16..20 {
        fill_row_except(&mut session, row, &[0]);
    }
    // Vertical line down column 0: step clear of the top, rotate, then slide
    // to the wall.
    session.board_mut().spawn_tetromino(ShapeKind::Line);
    session.run(None);
    session.run(None);
    assert_eq!(session.run(Some(Direction::Up)), RunOutcome::Moved);
    while session.run(Some(Direction::Left)) == RunOutcome::Moved {}
    assert_eq!(drop_and_lock(&mut session), RunOutcome::Locked { rows_cleared: 4 });

    let quad = session.score().score() - 10;
    assert!(quad >= 4 * single);
    assert_eq!(quad, 640);
}

#[test]
fn test_drop_locks_only_on_next_step() {
    let mut session = started_session();
    assert_eq!(session.run(Some(Direction::Drop)), RunOutcome::Moved);
    assert_eq!(session.board().piece_state(), PieceState::Falling);
    assert_eq!(session.score().score(), 0);

    assert_eq!(session.run(Some(Direction::Drop)), RunOutcome::Rejected);
    assert_eq!(session.run(Some(Direction::Left)), RunOutcome::Moved);
    assert!(matches!(session.tick(), RunOutcome::Locked { .. }));
    assert_eq!(session.score().score(), 10);
}

#[test]
fn test_preview_is_shown_once_per_piece() {
    let mut session = started_session();
    for _ in 0..6 {
        session.run(None);
    }
    assert_eq!(session.view().unwrap().previews_shown, 1);

    drop_and_lock(&mut session);
    let removed = session.view().unwrap().previews_removed;
    for _ in 0..6 {
        session.run(None);
    }
    assert_eq!(session.view().unwrap().previews_shown, 2);
    assert_eq!(session.view().unwrap().previews_removed, removed);
}

#[test]
fn test_sideways_moves_never_show_preview() {
    let mut session = started_session();
    session.run(Some(Direction::Left));
    session.run(Some(Direction::Right));
    session.run(Some(Direction::Up));
    assert_eq!(session.view().unwrap().previews_shown, 0);
}

#[test]
fn test_blocked_spawn_ends_game_once() {
    let mut session = started_session();
    session.board_mut().spawn_tetromino(ShapeKind::Square);
    fill_row_except(&mut session, 0, &[0]);
    fill_row_except(&mut session, 1, &[0]);

    assert_eq!(session.run(None), RunOutcome::GameOver);
    assert_eq!(session.phase(), SessionPhase::GameOver);
    assert!(!session.game_loop().is_running());
    assert!(!session.game_loop().ticker().is_running());

    let cells = session.board().cells().to_vec();
    let score = session.score().score();
    for direction in [None, Some(Direction::Drop), Some(Direction::Left), Some(Direction::Up)] {
        assert_eq!(session.run(direction), RunOutcome::Ignored);
    }
    assert_eq!(session.tick(), RunOutcome::Ignored);

    assert_eq!(session.board().cells(), cells.as_slice());
    assert_eq!(session.score().score(), score);
    assert_eq!(session.view().unwrap().splash_on, 1);
    assert_eq!(session.game_loop().ticker().stops(), 1);
}

#[test]
fn test_speed_follows_elapsed_ticks() {
    let mut session = started_session();
    let mut intervals = Vec::new();
    for _ in 0..40 {
        if session.tick() == RunOutcome::GameOver {
            break;
        }
        intervals.push(session.game_loop().interval());
    }
    assert!(intervals.windows(2).all(|w| w[1] <= w[0]));
    assert!(*intervals.last().unwrap() < Duration::from_millis(1000));
    assert_eq!(
        session.game_loop().ticker().interval(),
        session.game_loop().interval()
    );

    session.restart().unwrap();
    assert_eq!(session.game_loop().interval(), Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_ticks_drive_the_session() {
    let (ticker, mut ticks) = tokio_ticker();
    let mut session = GameSession::new(settings(), ticker).unwrap();
    session.initialize(Some(CountingView::default())).unwrap();
    session.start();

    let start_row = session.board().current_tetromino().offset().1;
    for step in 1..=3 {
        ticks.recv().await.unwrap();
        assert_eq!(session.tick(), RunOutcome::Moved);
        assert_eq!(session.board().current_tetromino().offset().1, start_row + step);
    }
    assert_eq!(session.score().elapsed(), Duration::from_secs(3));

    // Force a game over: nothing may tick afterwards.
    let board = session.board_mut();
    board.spawn_tetromino(ShapeKind::Square);
    for row in 0..2 {
        for col in 1..board.columns() as i32 {
            board.set(col, row, Some(Square::Mushroom));
        }
    }
    assert_eq!(session.run(None), RunOutcome::GameOver);

    let waited = tokio::time::timeout(Duration::from_secs(10), ticks.recv()).await;
    assert!(waited.is_err(), "tick delivered after game over");
}
