//! Per-word progress updates.
//!
//! [`ProgressTracker::apply`] is side-effect free: it returns a new record and
//! leaves persisting it to the caller. Callers must not run two applies for
//! the same word concurrently against the same stored record, or one update
//! is lost.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{ProgressError, Result};
use crate::mastery::MasteryClassifier;
use crate::scheduler::ReviewScheduler;
use crate::types::{ReviewEvent, WordId, WordProgress};

/// Applies review events to word progress records.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    classifier: MasteryClassifier,
    scheduler: ReviewScheduler,
}

impl ProgressTracker {
    pub fn new(classifier: MasteryClassifier, scheduler: ReviewScheduler) -> Self {
        Self {
            classifier,
            scheduler,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            MasteryClassifier::new(config.mastery.clone()),
            ReviewScheduler::new(config.schedule.clone()),
        )
    }

    /// Apply one event to the current progress of the same word.
    pub fn apply(&self, progress: &WordProgress, event: &ReviewEvent) -> Result<WordProgress> {
        if progress.word_id != event.word_id {
            warn!(
                expected = %progress.word_id,
                actual = %event.word_id,
                "rejecting review event for a different word"
            );
            return Err(ProgressError::WordMismatch {
                expected: progress.word_id,
                actual: event.word_id,
            });
        }
        progress.validate()?;

        let total_attempts = progress.total_attempts + 1;
        let correct_attempts = progress.correct_attempts + u64::from(event.correct);

        let mastery_level =
            self.classifier
                .classify(progress.mastery_level, total_attempts, correct_attempts)?;
        let next_review_due = self
            .scheduler
            .next_review_due(mastery_level, event.timestamp)?;

        debug!(
            word = %event.word_id,
            session = %event.session_id,
            correct = event.correct,
            total_attempts,
            correct_attempts,
            from = %progress.mastery_level,
            to = %mastery_level,
            "applied review event"
        );

        Ok(WordProgress {
            word_id: progress.word_id,
            mastery_level,
            next_review_due,
            total_attempts,
            correct_attempts,
            created_at: progress.created_at,
            updated_at: event.timestamp,
        })
    }

    /// Fold an ordered event log onto a fresh record for `word_id`.
    ///
    /// The record is created at the first event's timestamp. Returns `None`
    /// for an empty log, since a word without events has no progress.
    pub fn replay<'a>(
        &self,
        word_id: WordId,
        events: impl IntoIterator<Item = &'a ReviewEvent>,
    ) -> Result<Option<WordProgress>> {
        let mut progress: Option<WordProgress> = None;
        for event in events {
            let current = progress
                .take()
                .unwrap_or_else(|| WordProgress::new(word_id, event.timestamp));
            progress = Some(self.apply(&current, event)?);
        }
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MasteryLevel, SessionId};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap()
    }

    fn event(word: i64, correct: bool, minutes: i64) -> ReviewEvent {
        ReviewEvent::new(
            WordId(word),
            SessionId(1),
            correct,
            start() + Duration::minutes(minutes),
        )
    }

    #[test]
    fn first_event_counts_attempt_without_reclassifying() {
        let tracker = ProgressTracker::default();
        let progress = WordProgress::new(WordId(1), start());
        let updated = tracker.apply(&progress, &event(1, true, 5)).unwrap();

        assert_eq!(updated.total_attempts, 1);
        assert_eq!(updated.correct_attempts, 1);
        assert_eq!(updated.mastery_level, MasteryLevel::MIN);
        assert_eq!(updated.next_review_due, start() + Duration::minutes(5));
        assert_eq!(updated.created_at, start());
        assert_eq!(updated.updated_at, start() + Duration::minutes(5));
    }

    #[test]
    fn incorrect_event_only_counts_total() {
        let tracker = ProgressTracker::default();
        let progress = WordProgress::new(WordId(1), start());
        let updated = tracker.apply(&progress, &event(1, false, 0)).unwrap();
        assert_eq!(updated.total_attempts, 1);
        assert_eq!(updated.correct_attempts, 0);
    }

    #[test]
    fn fifth_correct_answer_jumps_to_mastered() {
        let tracker = ProgressTracker::default();
        let progress = WordProgress {
            total_attempts: 4,
            correct_attempts: 4,
            ..WordProgress::new(WordId(1), start())
        };
        let review = ReviewEvent::new(
            WordId(1),
            SessionId(2),
            true,
            Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap(),
        );
        let updated = tracker.apply(&progress, &review).unwrap();

        assert_eq!(updated.total_attempts, 5);
        assert_eq!(updated.correct_attempts, 5);
        assert_eq!(updated.accuracy(), Ok(100.0));
        assert_eq!(updated.mastery_level, MasteryLevel::MAX);
        assert_eq!(
            updated.next_review_due,
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn apply_does_not_touch_input() {
        let tracker = ProgressTracker::default();
        let progress = WordProgress::new(WordId(1), start());
        let before = progress.clone();
        let _ = tracker.apply(&progress, &event(1, true, 1)).unwrap();
        assert_eq!(progress, before);
    }

    #[test]
    fn mismatched_word_is_rejected() {
        let tracker = ProgressTracker::default();
        let progress = WordProgress::new(WordId(1), start());
        assert_eq!(
            tracker.apply(&progress, &event(2, true, 0)),
            Err(ProgressError::WordMismatch {
                expected: WordId(1),
                actual: WordId(2),
            })
        );
    }

    #[test]
    fn corrupt_progress_is_rejected() {
        let tracker = ProgressTracker::default();
        let progress = WordProgress {
            total_attempts: 1,
            correct_attempts: 2,
            ..WordProgress::new(WordId(1), start())
        };
        assert!(matches!(
            tracker.apply(&progress, &event(1, true, 0)),
            Err(ProgressError::CorrectExceedsTotal { .. })
        ));
    }

    #[test]
    fn replay_is_deterministic() {
        let tracker = ProgressTracker::default();
        let log: Vec<_> = (0..12).map(|i| event(3, i % 4 != 0, i * 60)).collect();

        let first = tracker.replay(WordId(3), &log).unwrap();
        let second = tracker.replay(WordId(3), &log).unwrap();

        assert_eq!(first, second);
        let progress = first.unwrap();
        assert_eq!(progress.total_attempts, 12);
        assert_eq!(progress.correct_attempts, 9);
        assert_eq!(progress.mastery_level, MasteryLevel::new(3).unwrap());
        assert_eq!(progress.created_at, start());
    }

    #[test]
    fn replay_of_empty_log_has_no_progress() {
        let tracker = ProgressTracker::default();
        assert_eq!(tracker.replay(WordId(3), std::iter::empty()), Ok(None));
    }

    #[test]
    fn level_drops_after_gate_as_accuracy_falls() {
        let tracker = ProgressTracker::default();
        let mut log: Vec<_> = (0..5).map(|i| event(4, true, i)).collect();
        let mastered = tracker.replay(WordId(4), &log).unwrap().unwrap();
        assert_eq!(mastered.mastery_level, MasteryLevel::MAX);

        log.extend((5..10).map(|i| event(4, false, i)));
        let slipped = tracker.replay(WordId(4), &log).unwrap().unwrap();
        assert_eq!(slipped.accuracy(), Ok(50.0));
        assert_eq!(slipped.mastery_level, MasteryLevel::new(1).unwrap());
        assert_eq!(slipped.next_review_due, start() + Duration::minutes(9) + Duration::days(1));
    }
}
