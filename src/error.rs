//! Error types
//!
//! Game outcomes (a failed run) are not errors; these cover bad input and
//! missing collaborators only.

use crate::sim::Target;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("tile count must be a whole number (got {0:?})")]
    InvalidTileCount(String),
    #[error("tile count must be between 1 and {max} (got {count})")]
    TileCountOutOfRange { count: i64, max: u32 },
    #[error("duration range invalid: min {min:.2}s, max {max:.2}s")]
    InvalidDurationRange { min: f32, max: f32 },
    #[error("learn duration must be positive (got {0:.2}s)")]
    InvalidLearnDuration(f32),
    #[error("could not measure {0}")]
    MissingElement(Target),
}
