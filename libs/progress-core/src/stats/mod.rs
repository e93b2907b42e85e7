//! Read-only statistics over review events and progress records.
//!
//! Every function takes the collections it needs from the caller and returns
//! a value object. Empty input yields zeroed stats, never an error. Results
//! depend only on the input set, not its order, so every endpoint that asks
//! the same question gets bit-identical answers.

mod streak;

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub use streak::ActivityDay;

use crate::accuracy::{percentage, Tally};
use crate::config::StatsConfig;
use crate::error::{ProgressError, Result};
use crate::types::{
    GroupId, GroupMembership, MasteryLevel, ReviewEvent, SessionId, StudySession, WordId,
    WordProgress,
};

/// Stats for a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub word_id: WordId,
    pub total_attempts: u64,
    pub correct_attempts: u64,
    pub accuracy: f64,
    pub mastery_level: MasteryLevel,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub next_review_due: Option<DateTime<Utc>>,
}

/// Stats for one study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: SessionId,
    pub total: u64,
    pub correct: u64,
    pub accuracy: f64,
}

/// Progress of a word group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub group_id: GroupId,
    pub total_words: u64,
    pub studied_words: u64,
    pub total: u64,
    pub correct: u64,
    pub success_rate: f64,
    /// Share of the group's words at or above the mastered level.
    pub mastery_percentage: f64,
    pub last_studied_at: Option<DateTime<Utc>>,
    pub streak_days: u32,
}

/// Quick stats over the rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: u64,
    pub correct: u64,
    pub success_rate: f64,
    pub session_count: u64,
    pub active_groups: u64,
    pub streak_days: u32,
}

/// The most recent study session with its stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastSession {
    pub session: StudySession,
    pub stats: SessionStats,
}

/// Number of words at each mastery level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryDistribution {
    /// Indexed by level 0..=5.
    pub counts: [u64; 6],
}

impl MasteryDistribution {
    pub fn count(&self, level: MasteryLevel) -> u64 {
        self.counts[usize::from(level.value())]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn add(&mut self, level: MasteryLevel) {
        self.counts[usize::from(level.value())] += 1;
    }
}

/// Computes statistics at word, session, group, and dashboard scope.
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    config: StatsConfig,
}

impl StatsAggregator {
    pub fn new(config: StatsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Stats for one word from its events and (optional) progress record.
    ///
    /// Events for other words are ignored. A progress record for another
    /// word is rejected.
    pub fn word_stats(
        &self,
        word_id: WordId,
        events: &[ReviewEvent],
        progress: Option<&WordProgress>,
    ) -> Result<WordStats> {
        if let Some(progress) = progress {
            if progress.word_id != word_id {
                return Err(ProgressError::WordMismatch {
                    expected: word_id,
                    actual: progress.word_id,
                });
            }
        }

        let word_events = move || events.iter().filter(move |e| e.word_id == word_id);
        let tally = Tally::from_events(word_events());

        Ok(WordStats {
            word_id,
            total_attempts: tally.total,
            correct_attempts: tally.correct,
            accuracy: tally.accuracy(),
            mastery_level: progress.map_or(MasteryLevel::MIN, |p| p.mastery_level),
            last_reviewed_at: word_events().map(|e| e.timestamp).max(),
            next_review_due: progress.map(|p| p.next_review_due),
        })
    }

    /// Stats over the events of one session only.
    pub fn session_stats(&self, session_id: SessionId, events: &[ReviewEvent]) -> SessionStats {
        let tally = Tally::from_events(events.iter().filter(|e| e.session_id == session_id));
        SessionStats {
            session_id,
            total: tally.total,
            correct: tally.correct,
            accuracy: tally.accuracy(),
        }
    }

    /// Progress of a group, scoped to events and progress of its member words.
    ///
    /// Members without a progress record count as level 0.
    pub fn group_stats(
        &self,
        group: &GroupMembership,
        events: &[ReviewEvent],
        progress: &[WordProgress],
        now: DateTime<Utc>,
    ) -> GroupStats {
        let group_events: Vec<&ReviewEvent> =
            events.iter().filter(|e| group.contains(e.word_id)).collect();
        let tally = Tally::from_events(group_events.iter().copied());

        let studied: BTreeSet<WordId> = group_events.iter().map(|e| e.word_id).collect();
        let mastered: BTreeSet<WordId> = progress
            .iter()
            .filter(|p| group.contains(p.word_id) && p.mastery_level >= self.config.mastered_level)
            .map(|p| p.word_id)
            .collect();
        let total_words = group.len() as u64;

        GroupStats {
            group_id: group.group_id,
            total_words,
            studied_words: studied.len() as u64,
            total: tally.total,
            correct: tally.correct,
            success_rate: tally.accuracy(),
            mastery_percentage: percentage(total_words, mastered.len() as u64),
            last_studied_at: group_events.iter().map(|e| e.timestamp).max(),
            streak_days: self.streak(group_events.iter().copied(), now),
        }
    }

    /// Quick stats over the rolling window ending at `now`.
    pub fn dashboard_stats(
        &self,
        events: &[ReviewEvent],
        sessions: &[StudySession],
        now: DateTime<Utc>,
    ) -> DashboardStats {
        let window = self.window(now);
        let tally = Tally::from_events(events.iter().filter(|e| window.contains(e.timestamp)));

        let recent_sessions: Vec<&StudySession> = sessions
            .iter()
            .filter(|s| window.contains(s.started_at))
            .collect();
        let session_ids: BTreeSet<SessionId> = recent_sessions.iter().map(|s| s.id).collect();
        let groups: BTreeSet<GroupId> = recent_sessions.iter().map(|s| s.group_id).collect();

        DashboardStats {
            total: tally.total,
            correct: tally.correct,
            success_rate: tally.accuracy(),
            session_count: session_ids.len() as u64,
            active_groups: groups.len() as u64,
            streak_days: self.streak(events, now),
        }
    }

    /// Streak over the given events, restricted to the look-back window.
    pub fn streak<'a>(
        &self,
        events: impl IntoIterator<Item = &'a ReviewEvent>,
        now: DateTime<Utc>,
    ) -> u32 {
        let window = self.window(now);
        let days =
            streak::active_days(events.into_iter().filter(|e| window.contains(e.timestamp)));
        streak::streak(&days, self.config.streak_mode, now)
    }

    /// Most recent session (latest start, then highest id) with its stats.
    pub fn last_session(
        &self,
        sessions: &[StudySession],
        events: &[ReviewEvent],
    ) -> Option<LastSession> {
        let session = sessions.iter().max_by_key(|s| (s.started_at, s.id))?;
        Some(LastSession {
            session: session.clone(),
            stats: self.session_stats(session.id, events),
        })
    }

    /// Words per mastery level.
    ///
    /// With a group, only its members are counted and members without
    /// progress count as level 0. Without one, every record is counted.
    pub fn mastery_distribution(
        &self,
        progress: &[WordProgress],
        group: Option<&GroupMembership>,
    ) -> MasteryDistribution {
        let mut distribution = MasteryDistribution::default();
        match group {
            Some(group) => {
                let mut seen = BTreeSet::new();
                for record in progress.iter().filter(|p| group.contains(p.word_id)) {
                    if seen.insert(record.word_id) {
                        distribution.add(record.mastery_level);
                    }
                }
                for _ in group.word_ids.iter().filter(|id| !seen.contains(id)) {
                    distribution.add(MasteryLevel::MIN);
                }
            }
            None => {
                for record in progress {
                    distribution.add(record.mastery_level);
                }
            }
        }
        distribution
    }

    /// Words whose next review is due at or before `now`, soonest first.
    pub fn due_words(&self, progress: &[WordProgress], now: DateTime<Utc>) -> Vec<WordId> {
        let mut due: Vec<&WordProgress> = progress.iter().filter(|p| p.is_due(now)).collect();
        due.sort_by_key(|p| (p.next_review_due, p.word_id));
        due.into_iter().map(|p| p.word_id).collect()
    }

    /// Daily review counts for the look-back window ending today.
    pub fn activity(&self, events: &[ReviewEvent], now: DateTime<Utc>) -> Vec<ActivityDay> {
        streak::activity(events, now, self.config.lookback_days)
    }

    fn window(&self, now: DateTime<Utc>) -> Window {
        let start = now
            .checked_sub_signed(Duration::days(i64::from(self.config.lookback_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Window { start, end: now }
    }
}

/// Inclusive time range `[start, end]`.
#[derive(Debug, Clone, Copy)]
struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}
