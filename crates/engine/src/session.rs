//! Game session - ties board, score and loop together.
//!
//! `run` is the single entry point for both timer ticks and player input. It
//! runs to completion before the next call can start, so board and score are
//! only ever touched by one invocation at a time.
//!
//! Lifecycle: `new` -> `initialize(view)` -> `start` -> (`run`/`tick`)* ->
//! game over -> `restart`.

use crate::core::{Board, GameSnapshot, ScoreSummary, ScoreTracker, Tetromino};
use crate::game_loop::GameLoopService;
use crate::ticker::Ticker;
use crate::types::{ConfigError, Direction, GameSettings};

/// What the session needs from the rendering layer
pub trait GameView {
    /// Verify every render target is usable. Called on each initialize.
    fn check_targets(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    fn show_next_tetromino(&mut self, next: &Tetromino);

    fn remove_next_tetromino(&mut self);

    fn update_score(&mut self, score: u32);

    fn set_game_over_splash(&mut self, visible: bool);
}

/// Result of one `run` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Player actions are not allowed right now
    Ignored,
    Moved,
    /// Blocked sideways move or rotation, nothing changed
    Rejected,
    /// The piece landed and a new one spawned
    Locked { rows_cleared: usize },
    /// The piece landed and no new piece fits
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Initialized (or not yet), loop not started
    Idle,
    Running,
    GameOver,
}

pub struct GameSession<V, T> {
    settings: GameSettings,
    board: Board,
    score: ScoreTracker,
    game_loop: GameLoopService<T>,
    view: Option<V>,
    actions_allowed: bool,
    phase: SessionPhase,
    preview_shown: bool,
    /// Bumped on every initialize so each new game gets its own seed
    episode: u32,
}

impl<V: GameView, T: Ticker> GameSession<V, T> {
    pub fn new(settings: GameSettings, ticker: T) -> Result<Self, ConfigError> {
        settings.validate()?;

        let board = Board::new(&settings.board, settings.seed);
        let score = ScoreTracker::new(settings.scoring.clone(), settings.speed.clone());
        let game_loop = GameLoopService::new(ticker, score.tick_interval());

        Ok(Self {
            settings,
            board,
            score,
            game_loop,
            view: None,
            actions_allowed: false,
            phase: SessionPhase::Idle,
            preview_shown: false,
            episode: 0,
        })
    }

    /// Prepare a fresh game.
    ///
    /// Any game in progress is halted first. `view` replaces the remembered
    /// view when given; with neither a new nor a remembered view this fails
    /// with [`ConfigError::MissingView`] and the session stays halted.
    pub fn initialize(&mut self, view: Option<V>) -> Result<(), ConfigError> {
        self.halt();

        if let Some(view) = view {
            self.view = Some(view);
        }
        match self.view.as_ref() {
            Some(view) => view.check_targets()?,
            None => return Err(ConfigError::MissingView),
        }

        let seed = self.settings.seed.wrapping_add(self.episode);
        self.episode = self.episode.wrapping_add(1);

        self.board = Board::new(&self.settings.board, seed);
        self.score.reset();
        self.game_loop.set_interval(self.score.tick_interval());
        self.preview_shown = false;
        self.actions_allowed = true;
        self.phase = SessionPhase::Idle;

        if let Some(view) = self.view.as_mut() {
            view.set_game_over_splash(false);
            view.update_score(0);
        }

        log::info!(
            "game initialized: {}x{} board, seed {}",
            self.board.columns(),
            self.board.rows(),
            seed
        );

        // Pre-filled rows can already cover the spawn area.
        if self.board.is_topped_out() {
            self.end_game();
        }
        Ok(())
    }

    /// Start the loop. Returns false if the session is not ready to play.
    pub fn start(&mut self) -> bool {
        if !self.actions_allowed {
            return false;
        }
        self.game_loop.start();
        self.phase = SessionPhase::Running;
        log::info!("game started, tick interval {:?}", self.game_loop.interval());
        true
    }

    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.initialize(None)?;
        self.start();
        Ok(())
    }

    /// Timer entry point: account for the elapsed interval, then step down.
    pub fn tick(&mut self) -> RunOutcome {
        if !self.actions_allowed {
            return RunOutcome::Ignored;
        }
        log::trace!("tick");
        self.score.advance(self.game_loop.interval());
        let outcome = self.run(None);
        self.sync_speed();
        outcome
    }

    /// Apply one movement. `None` means a plain downward step.
    pub fn run(&mut self, direction: Option<Direction>) -> RunOutcome {
        if !self.actions_allowed {
            return RunOutcome::Ignored;
        }

        let direction = direction.unwrap_or_default();

        if self.board.move_tetromino(direction) {
            if direction.is_downward() {
                self.refresh_preview();
            }
            return RunOutcome::Moved;
        }

        if direction != Direction::Down {
            return RunOutcome::Rejected;
        }

        // The piece could not descend any further: lock it in.
        self.board.insert_falling_tetromino();
        self.score.increase_score();

        let candidate_rows = self.board.current_tetromino().rows();
        let rows_cleared = self.board.delete_completed_rows(&candidate_rows);
        self.score.add_deleted_rows_score_points(rows_cleared);
        if rows_cleared > 0 {
            log::debug!(
                "cleared {} row(s), score {}",
                rows_cleared,
                self.score.score()
            );
        }

        if let Some(view) = self.view.as_mut() {
            view.update_score(self.score.score());
        }

        if !self.board.use_next_tetromino() {
            self.end_game();
            return RunOutcome::GameOver;
        }

        self.hide_preview();
        RunOutcome::Locked { rows_cleared }
    }

    /// Show the upcoming piece once the falling one has cleared the spawn area
    fn refresh_preview(&mut self) {
        if self.preview_shown {
            return;
        }
        let top_row = self
            .board
            .current_tetromino()
            .rows()
            .first()
            .copied()
            .unwrap_or(0);
        if top_row <= self.settings.next_preview_row_delay {
            return;
        }
        if let Some(view) = self.view.as_mut() {
            view.show_next_tetromino(self.board.next_tetromino());
        }
        self.preview_shown = true;
    }

    fn hide_preview(&mut self) {
        if !self.preview_shown {
            return;
        }
        if let Some(view) = self.view.as_mut() {
            view.remove_next_tetromino();
        }
        self.preview_shown = false;
    }

    /// Re-arm the loop if the speed curve moved
    fn sync_speed(&mut self) {
        let interval = self.score.tick_interval();
        if self.game_loop.set_interval(interval) {
            log::debug!("tick interval now {:?}", interval);
        }
    }

    /// Stop the loop and refuse further actions
    fn halt(&mut self) {
        self.actions_allowed = false;
        self.phase = SessionPhase::Idle;
        if let Some(view) = self.view.as_mut() {
            view.remove_next_tetromino();
        }
        self.preview_shown = false;
        self.game_loop.stop();
    }

    fn end_game(&mut self) {
        self.halt();
        self.phase = SessionPhase::GameOver;
        if let Some(view) = self.view.as_mut() {
            view.set_game_over_splash(true);
        }
        log::info!(
            "game over: score {}, {} pieces, {} rows",
            self.score.score(),
            self.score.pieces_locked(),
            self.score.rows_cleared()
        );
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    pub fn summary(&self) -> ScoreSummary {
        self.score.summary()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut V> {
        self.view.as_mut()
    }

    pub fn game_loop(&self) -> &GameLoopService<T> {
        &self.game_loop
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn actions_allowed(&self) -> bool {
        self.actions_allowed
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.board.snapshot()
    }
}
