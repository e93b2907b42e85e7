//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, Duration, TimeZone, Utc};

use progress_core::{GroupId, GroupMembership, ReviewEvent, SessionId, StudySession, WordId};

/// Fixed reference time so results do not depend on the wall clock.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 20, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

/// Create a review event for a word in a session.
pub fn review(word_id: i64, session_id: i64, correct: bool, at: DateTime<Utc>) -> ReviewEvent {
    ReviewEvent::new(WordId(word_id), SessionId(session_id), correct, at)
}

/// Create a study session for a group.
pub fn session(id: i64, group_id: i64, started_at: DateTime<Utc>) -> StudySession {
    StudySession {
        id: SessionId(id),
        group_id: GroupId(group_id),
        started_at,
    }
}

/// Create a group with the given member words.
pub fn group(id: i64, word_ids: &[i64]) -> GroupMembership {
    GroupMembership::new(GroupId(id), word_ids.iter().copied().map(WordId))
}
