//! Review scheduling from a fixed interval table.
//!
//! Day intervals are fixed 24-hour adds. Month intervals are calendar adds:
//! the day of month is kept and clamped to the last day of the target month,
//! so Jan 31 + 1 month is Feb 29 in a leap year and Feb 28 otherwise (never
//! early March). Time of day is preserved.

use chrono::{DateTime, Duration, Months, Utc};

use crate::config::{ReviewInterval, ScheduleConfig};
use crate::error::{ProgressError, Result};
use crate::types::MasteryLevel;

/// Maps a mastery level to the next review due date.
#[derive(Debug, Clone, Default)]
pub struct ReviewScheduler {
    config: ScheduleConfig,
}

impl ReviewScheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Next review due for `level`, counted from `now`.
    pub fn next_review_due(
        &self,
        level: MasteryLevel,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let due = match self.config.interval_for(level) {
            ReviewInterval::Immediate => Some(now),
            ReviewInterval::Days(days) => now.checked_add_signed(Duration::days(i64::from(days))),
            ReviewInterval::Months(months) => now.checked_add_months(Months::new(months)),
        };
        due.ok_or(ProgressError::ScheduleOverflow {
            level: level.value(),
        })
    }
}
