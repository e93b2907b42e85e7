//! Core types for progress tracking.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::accuracy;
use crate::error::{ProgressError, Result};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier of a vocabulary word.
    WordId
);
id_type!(
    /// Identifier of a study session.
    SessionId
);
id_type!(
    /// Identifier of a word group.
    GroupId
);

/// Discrete mastery level, 0 (unseen or struggling) to 5 (mastered).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(5);
    /// Lowest level that counts a word as learned in group progress.
    pub const LEARNED: Self = Self(3);

    /// Create a level, rejecting values above 5.
    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX.0 {
            return Err(ProgressError::InvalidMasteryLevel(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All levels in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

impl TryFrom<u8> for MasteryLevel {
    type Error = ProgressError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded outcome of a word shown during a study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub word_id: WordId,
    #[serde(rename = "study_session_id")]
    pub session_id: SessionId,
    pub correct: bool,
    pub timestamp: DateTime<Utc>,
}

impl ReviewEvent {
    pub fn new(
        word_id: WordId,
        session_id: SessionId,
        correct: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            word_id,
            session_id,
            correct,
            timestamp,
        }
    }
}

/// Learning progress for one word.
///
/// The mastery level is never set by callers directly; it is recomputed by
/// [`ProgressTracker::apply`](crate::ProgressTracker::apply) on every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordProgress {
    pub word_id: WordId,
    pub mastery_level: MasteryLevel,
    pub next_review_due: DateTime<Utc>,
    pub total_attempts: u64,
    pub correct_attempts: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WordProgress {
    /// Zero-valued record for a word seen for the first time: level 0, due at `at`.
    pub fn new(word_id: WordId, at: DateTime<Utc>) -> Self {
        Self {
            word_id,
            mastery_level: MasteryLevel::MIN,
            next_review_due: at,
            total_attempts: 0,
            correct_attempts: 0,
            created_at: at,
            updated_at: at,
        }
    }

    /// Check the counter invariant on a record loaded from storage.
    pub fn validate(&self) -> Result<()> {
        if self.correct_attempts > self.total_attempts {
            return Err(ProgressError::CorrectExceedsTotal {
                correct: self.correct_attempts,
                total: self.total_attempts,
            });
        }
        Ok(())
    }

    /// Accuracy percentage over all attempts.
    pub fn accuracy(&self) -> Result<f64> {
        accuracy::accuracy(self.total_attempts, self.correct_attempts)
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_due <= now
    }

    /// Outbound summary handed back to the caller after a review.
    pub fn outcome(&self) -> Result<ReviewOutcome> {
        Ok(ReviewOutcome {
            accuracy: self.accuracy()?,
            mastery_level: self.mastery_level,
            next_review_due: self.next_review_due,
        })
    }
}

/// Summary of a word's state after a review was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub accuracy: f64,
    pub mastery_level: MasteryLevel,
    pub next_review_due: DateTime<Utc>,
}

/// A study session as known to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: SessionId,
    pub group_id: GroupId,
    pub started_at: DateTime<Utc>,
}

/// Words belonging to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub group_id: GroupId,
    pub word_ids: BTreeSet<WordId>,
}

impl GroupMembership {
    pub fn new(group_id: GroupId, word_ids: impl IntoIterator<Item = WordId>) -> Self {
        Self {
            group_id,
            word_ids: word_ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, word_id: WordId) -> bool {
        self.word_ids.contains(&word_id)
    }

    pub fn len(&self) -> usize {
        self.word_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_ids.is_empty()
    }
}
