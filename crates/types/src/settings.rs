//! Game settings.
//!
//! One immutable value handed to the board and the session at construction.
//! Defaults reproduce the classic browser build: a 10x20 board, two
//! half-filled rows at the bottom, and a tick interval that speeds up from one
//! second to a third of a second over three minutes of play.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub total_columns: u16,
    pub total_rows: u16,
    /// Bottom rows seeded with random squares on a new board
    pub prefilled_rows: u16,
    /// Fill density of each seeded row, 0.0..=1.0
    pub prefill_ratio: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            total_columns: DEFAULT_COLUMNS,
            total_rows: DEFAULT_ROWS,
            prefilled_rows: DEFAULT_PREFILLED_ROWS,
            prefill_ratio: DEFAULT_PREFILL_RATIO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedSettings {
    pub base_interval_ms: u32,
    pub min_interval_ms: u32,
    pub speed_increment_ms: u32,
    pub time_to_max_speed_ms: u32,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self {
            base_interval_ms: BASE_INTERVAL_MS,
            min_interval_ms: MIN_INTERVAL_MS,
            speed_increment_ms: SPEED_INCREMENT_MS,
            time_to_max_speed_ms: TIME_TO_MAX_SPEED_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub piece_lock_points: u32,
    pub single_row_points: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            piece_lock_points: PIECE_LOCK_POINTS,
            single_row_points: SINGLE_ROW_POINTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub board: BoardSettings,
    pub speed: SpeedSettings,
    pub scoring: ScoringSettings,
    pub next_preview_row_delay: i32,
    /// Seed for piece order and pre-filled rows
    pub seed: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board: BoardSettings::default(),
            speed: SpeedSettings::default(),
            scoring: ScoringSettings::default(),
            next_preview_row_delay: NEXT_PREVIEW_ROW_DELAY,
            seed: 1,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build settings from the environment.
    ///
    /// `TLOL_SETTINGS` names a JSON file used as the base; `TLOL_COLUMNS`,
    /// `TLOL_ROWS` and `TLOL_SEED` override single fields. Unparseable
    /// overrides are ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let mut settings = match env::var("TLOL_SETTINGS") {
            Ok(path) if !path.trim().is_empty() => {
                let text = std::fs::read_to_string(path.trim())
                    .map_err(|e| ConfigError::Parse(format!("{}: {}", path.trim(), e)))?;
                Self::from_json_str(&text)?
            }
            _ => Self::default(),
        };

        if let Some(columns) = env::var("TLOL_COLUMNS").ok().and_then(|s| s.parse().ok()) {
            settings.board.total_columns = columns;
        }
        if let Some(rows) = env::var("TLOL_ROWS").ok().and_then(|s| s.parse().ok()) {
            settings.board.total_rows = rows;
        }
        if let Some(seed) = env::var("TLOL_SEED").ok().and_then(|s| s.parse().ok()) {
            settings.seed = seed;
        }

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        if board.total_columns < 4 {
            return Err(ConfigError::InvalidSettings(format!(
                "total_columns must be at least 4, got {}",
                board.total_columns
            )));
        }
        if board.total_rows < 2 {
            return Err(ConfigError::InvalidSettings(format!(
                "total_rows must be at least 2, got {}",
                board.total_rows
            )));
        }
        if board.prefilled_rows >= board.total_rows {
            return Err(ConfigError::InvalidSettings(format!(
                "prefilled_rows ({}) must be below total_rows ({})",
                board.prefilled_rows, board.total_rows
            )));
        }
        if !(0.0..=1.0).contains(&board.prefill_ratio) {
            return Err(ConfigError::InvalidSettings(format!(
                "prefill_ratio must be within 0..=1, got {}",
                board.prefill_ratio
            )));
        }

        let speed = &self.speed;
        if speed.min_interval_ms == 0 || speed.min_interval_ms > speed.base_interval_ms {
            return Err(ConfigError::InvalidSettings(format!(
                "min_interval_ms ({}) must be in 1..=base_interval_ms ({})",
                speed.min_interval_ms, speed.base_interval_ms
            )));
        }

        Ok(())
    }
}
