//! Error types for progress-core.

use thiserror::Error;

use crate::types::WordId;

/// Result type alias using ProgressError.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors raised by the engine for invalid input.
///
/// Degenerate numeric cases (zero attempts) and empty collections are not
/// errors; they produce zeroed values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("review event for word {actual} applied to progress of word {expected}")]
    WordMismatch { expected: WordId, actual: WordId },

    #[error("correct attempts {correct} exceed total attempts {total}")]
    CorrectExceedsTotal { correct: u64, total: u64 },

    #[error("mastery level {0} is outside 0..=5")]
    InvalidMasteryLevel(u8),

    #[error("next review date for level {level} is out of range")]
    ScheduleOverflow { level: u8 },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
