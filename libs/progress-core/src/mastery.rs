//! Mastery classification.
//!
//! The level is a pure reclassification of (attempts, accuracy). Below the
//! minimum-attempts gate the stored level is kept as-is; past it the level
//! follows accuracy in both directions.

use crate::accuracy::accuracy;
use crate::config::MasteryConfig;
use crate::error::Result;
use crate::types::MasteryLevel;

/// Maps attempt counts to a mastery level.
#[derive(Debug, Clone, Default)]
pub struct MasteryClassifier {
    config: MasteryConfig,
}

impl MasteryClassifier {
    pub fn new(config: MasteryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MasteryConfig {
        &self.config
    }

    /// Level for the given totals, keeping `current` while attempts are
    /// below the minimum.
    pub fn classify(
        &self,
        current: MasteryLevel,
        total: u64,
        correct: u64,
    ) -> Result<MasteryLevel> {
        let accuracy = accuracy(total, correct)?;
        if total < self.config.min_attempts {
            return Ok(current);
        }
        Ok(self.level_for_accuracy(accuracy))
    }

    /// Highest level whose threshold is met, checked from level 5 down.
    pub fn level_for_accuracy(&self, accuracy: f64) -> MasteryLevel {
        let thresholds = &self.config.level_thresholds;
        MasteryLevel::all()
            .rev()
            .take_while(|level| *level > MasteryLevel::MIN)
            .find(|level| accuracy >= thresholds[usize::from(level.value()) - 1])
            .unwrap_or(MasteryLevel::MIN)
    }
}
