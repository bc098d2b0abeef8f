//! Configuration errors.
//!
//! Invalid moves and game over are ordinary return values; only a session
//! that cannot be set up reports an error.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No view was supplied and none is remembered from an earlier initialize.
    MissingView,
    /// The view exists but one of its required render targets is unusable.
    MissingTarget(&'static str),
    /// Settings failed validation.
    InvalidSettings(String),
    /// Settings could not be read or parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingView => write!(f, "no game view configured"),
            ConfigError::MissingTarget(target) => {
                write!(f, "render target is missing: {}", target)
            }
            ConfigError::InvalidSettings(reason) => write!(f, "invalid settings: {}", reason),
            ConfigError::Parse(reason) => write!(f, "could not parse settings: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}
