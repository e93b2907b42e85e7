//! Active-day computations over event timestamps (UTC calendar days).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::StreakMode;
use crate::types::ReviewEvent;

/// Review count for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub reviews: u64,
}

/// Distinct UTC days with at least one event.
pub(crate) fn active_days<'a>(
    events: impl IntoIterator<Item = &'a ReviewEvent>,
) -> BTreeSet<NaiveDate> {
    events
        .into_iter()
        .map(|event| event.timestamp.date_naive())
        .collect()
}

/// Streak over events already restricted to the look-back window.
pub(crate) fn streak(days: &BTreeSet<NaiveDate>, mode: StreakMode, now: DateTime<Utc>) -> u32 {
    match mode {
        StreakMode::DistinctDays => days.len() as u32,
        StreakMode::Consecutive => consecutive_run(days, now.date_naive()),
    }
}

/// Consecutive active days ending today, or ending yesterday when today has
/// no activity yet.
fn consecutive_run(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut current = if days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    let mut run = 0;
    while let Some(day) = current {
        if !days.contains(&day) {
            break;
        }
        run += 1;
        current = day.pred_opt();
    }
    run
}

/// Per-day review counts for the `days` days ending at `now`, oldest first.
pub(crate) fn activity<'a>(
    events: impl IntoIterator<Item = &'a ReviewEvent>,
    now: DateTime<Utc>,
    days: u32,
) -> Vec<ActivityDay> {
    if days == 0 {
        return Vec::new();
    }
    let today = now.date_naive();
    let Some(first) = today.checked_sub_signed(Duration::days(i64::from(days - 1))) else {
        return Vec::new();
    };

    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for event in events {
        let date = event.timestamp.date_naive();
        if date >= first && date <= today {
            *counts.entry(date).or_default() += 1;
        }
    }

    first
        .iter_days()
        .take(days as usize)
        .map(|date| ActivityDay {
            date,
            reviews: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
