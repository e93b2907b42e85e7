//! Tunable engine parameters.
//!
//! Every threshold and interval lives here rather than inline in the
//! algorithms. Callers build an [`EngineConfig`] (usually `Default`) and hand
//! it to the classifier, scheduler, and aggregator.

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};
use crate::types::MasteryLevel;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mastery: MasteryConfig,
    pub schedule: ScheduleConfig,
    pub stats: StatsConfig,
}

impl EngineConfig {
    /// Check that thresholds and intervals are well-formed.
    pub fn validate(&self) -> Result<()> {
        self.mastery.validate()?;
        self.schedule.validate()?;
        self.stats.validate()
    }
}

/// Mastery classification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryConfig {
    /// Below this many attempts the level is left unchanged.
    pub min_attempts: u64,
    /// Minimum accuracy (percent) for levels 1 through 5, ascending.
    pub level_thresholds: [f64; 5],
}

impl Default for MasteryConfig {
    fn default() -> Self {
        Self {
            min_attempts: 5,
            level_thresholds: [50.0, 60.0, 70.0, 80.0, 90.0],
        }
    }
}

impl MasteryConfig {
    fn validate(&self) -> Result<()> {
        if self.min_attempts == 0 {
            return Err(invalid("min_attempts must be at least 1"));
        }
        for threshold in self.level_thresholds {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(invalid(format!(
                    "level threshold {threshold} is outside 0..=100"
                )));
            }
        }
        if self.level_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("level thresholds must be strictly increasing"));
        }
        Ok(())
    }
}

/// Time until the next review for a mastery level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewInterval {
    /// Due at the moment of review.
    Immediate,
    /// Fixed number of 24-hour days.
    Days(u32),
    /// Calendar months, clamped to the last day of shorter months.
    Months(u32),
}

impl ReviewInterval {
    /// Shortest length this interval can have, in days.
    fn min_days(self) -> u64 {
        match self {
            Self::Immediate => 0,
            Self::Days(days) => u64::from(days),
            Self::Months(months) => u64::from(months) * 28,
        }
    }
}

/// Review interval per mastery level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Indexed by mastery level 0..=5.
    pub intervals: [ReviewInterval; 6],
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            intervals: [
                ReviewInterval::Immediate,
                ReviewInterval::Days(1),
                ReviewInterval::Days(3),
                ReviewInterval::Days(7),
                ReviewInterval::Days(14),
                ReviewInterval::Months(1),
            ],
        }
    }
}

impl ScheduleConfig {
    pub fn interval_for(&self, level: MasteryLevel) -> ReviewInterval {
        self.intervals[usize::from(level.value())]
    }

    fn validate(&self) -> Result<()> {
        if self
            .intervals
            .windows(2)
            .any(|w| w[0].min_days() >= w[1].min_days())
        {
            return Err(invalid("review intervals must be strictly increasing by level"));
        }
        Ok(())
    }
}

/// How the study streak is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakMode {
    /// Number of distinct UTC days with activity inside the look-back window.
    #[default]
    DistinctDays,
    /// Run of consecutive active UTC days ending today (or yesterday).
    Consecutive,
}

/// Reporting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Rolling window for dashboard stats and streaks, `[now - lookback_days, now]`.
    ///
    /// The window is measured in time, not dates, so it touches
    /// `lookback_days + 1` UTC dates and a distinct-day streak can reach that
    /// count. The activity calendar shows the last `lookback_days` dates.
    pub lookback_days: u32,
    /// Words at or above this level count as mastered in group progress.
    pub mastered_level: MasteryLevel,
    pub streak_mode: StreakMode,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            lookback_days: 30,
            mastered_level: MasteryLevel::LEARNED,
            streak_mode: StreakMode::default(),
        }
    }
}

impl StatsConfig {
    fn validate(&self) -> Result<()> {
        if self.lookback_days == 0 {
            return Err(invalid("lookback_days must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ProgressError {
    ProgressError::InvalidConfig(message.into())
}
