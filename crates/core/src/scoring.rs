//! Scoring module - score keeping and the speed curve
//!
//! Every locked piece is worth a flat amount; clearing `n` rows with one piece
//! adds `single_row_points * n * n`, so bigger clears pay disproportionately.
//!
//! The tick interval starts at `base_interval_ms` and drops by
//! `speed_increment_ms` in equal time steps, reaching `min_interval_ms` after
//! `time_to_max_speed_ms` of play. It never goes below the minimum.

use std::time::Duration;

use serde::Serialize;

use crate::types::{ScoringSettings, SpeedSettings};

/// End-of-game totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreSummary {
    pub score: u32,
    pub elapsed_ms: u64,
    pub pieces_locked: u32,
    pub rows_cleared: u32,
    pub tick_interval_ms: u64,
}

/// Bonus for clearing `rows` rows with a single piece
pub fn row_clear_bonus(rows: usize, single_row_points: u32) -> u32 {
    let rows = rows as u32;
    single_row_points
        .saturating_mul(rows)
        .saturating_mul(rows)
}

/// Tick interval after `elapsed` play time
pub fn tick_interval(speed: &SpeedSettings, elapsed: Duration) -> Duration {
    let base = speed.base_interval_ms;
    let min = speed.min_interval_ms.min(base);
    if speed.speed_increment_ms == 0 || base == min {
        return Duration::from_millis(base as u64);
    }

    let steps_to_max = (base - min).div_ceil(speed.speed_increment_ms);
    let step_ms = (speed.time_to_max_speed_ms / steps_to_max).max(1) as u128;
    let steps_taken = elapsed.as_millis() / step_ms;

    let reduction = (speed.speed_increment_ms as u128).saturating_mul(steps_taken);
    let interval = (base as u128).saturating_sub(reduction).max(min as u128);
    Duration::from_millis(interval as u64)
}

#[derive(Debug, Clone)]
pub struct ScoreTracker {
    scoring: ScoringSettings,
    speed: SpeedSettings,
    score: u32,
    elapsed: Duration,
    pieces_locked: u32,
    rows_cleared: u32,
}

impl ScoreTracker {
    pub fn new(scoring: ScoringSettings, speed: SpeedSettings) -> Self {
        Self {
            scoring,
            speed,
            score: 0,
            elapsed: Duration::ZERO,
            pieces_locked: 0,
            rows_cleared: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// A piece locked into the board
    pub fn increase_score(&mut self) {
        self.score = self.score.saturating_add(self.scoring.piece_lock_points);
        self.pieces_locked = self.pieces_locked.saturating_add(1);
    }

    /// Bonus for rows removed by the last lock; zero rows adds nothing
    pub fn add_deleted_rows_score_points(&mut self, rows: usize) {
        let bonus = row_clear_bonus(rows, self.scoring.single_row_points);
        self.score = self.score.saturating_add(bonus);
        self.rows_cleared = self.rows_cleared.saturating_add(rows as u32);
    }

    /// Account for play time
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Current tick interval on the speed curve
    pub fn tick_interval(&self) -> Duration {
        tick_interval(&self.speed, self.elapsed)
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.elapsed = Duration::ZERO;
        self.pieces_locked = 0;
        self.rows_cleared = 0;
    }

    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            score: self.score,
            elapsed_ms: self.elapsed.as_millis() as u64,
            pieces_locked: self.pieces_locked,
            rows_cleared: self.rows_cleared,
            tick_interval_ms: self.tick_interval().as_millis() as u64,
        }
    }
}
