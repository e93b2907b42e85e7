//! Accuracy percentage shared by every report.
//!
//! All scopes (word, session, group, dashboard) go through [`percentage`] so
//! their numbers agree for the same input.

use serde::{Deserialize, Serialize};

use crate::error::{ProgressError, Result};
use crate::types::ReviewEvent;

/// Accuracy as a percentage in `[0, 100]`.
///
/// Zero attempts yield exactly `0.0`. The value is not rounded; use
/// [`round_percent`] when formatting for display.
pub fn accuracy(total: u64, correct: u64) -> Result<f64> {
    if correct > total {
        return Err(ProgressError::CorrectExceedsTotal { correct, total });
    }
    Ok(percentage(total, correct))
}

/// Round a percentage to two decimal places.
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole` as a percentage, zero when `whole` is zero.
pub(crate) fn percentage(whole: u64, part: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Running count of attempts and correct attempts.
///
/// A tally built through [`Tally::record`] always satisfies
/// `correct <= total`, so its accuracy never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total: u64,
    pub correct: u64,
}

impl Tally {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a ReviewEvent>) -> Self {
        let mut tally = Self::default();
        for event in events {
            tally.record(event.correct);
        }
        tally
    }

    pub fn accuracy(&self) -> f64 {
        percentage(self.total, self.correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attempts_is_zero() {
        assert_eq!(accuracy(0, 0), Ok(0.0));
    }

    #[test]
    fn known_values() {
        assert_eq!(accuracy(10, 10), Ok(100.0));
        assert_eq!(accuracy(10, 7), Ok(70.0));
        assert_eq!(accuracy(4, 1), Ok(25.0));
    }

    #[test]
    fn always_within_bounds() {
        for total in 0..50u64 {
            for correct in 0..=total {
                let value = accuracy(total, correct).unwrap();
                assert!((0.0..=100.0).contains(&value), "{correct}/{total} -> {value}");
            }
        }
    }

    #[test]
    fn rejects_correct_above_total() {
        assert_eq!(
            accuracy(3, 4),
            Err(ProgressError::CorrectExceedsTotal {
                correct: 4,
                total: 3
            })
        );
    }

    #[test]
    fn rounding_is_for_display_only() {
        let raw = accuracy(3, 2).unwrap();
        assert!(raw > 66.666 && raw < 66.667);
        assert_eq!(round_percent(raw), 66.67);
    }

    #[test]
    fn tally_counts_correct_answers() {
        let mut tally = Tally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);
        assert_eq!(tally, Tally { total: 3, correct: 2 });
        assert_eq!(tally.accuracy(), accuracy(3, 2).unwrap());
    }
}
