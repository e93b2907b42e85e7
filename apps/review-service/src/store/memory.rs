//! In-memory store for tests and prototyping.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use progress_core::{
    GroupId, GroupMembership, ReviewEvent, SessionId, StudySession, WordId, WordProgress,
};

use super::ProgressStore;
use crate::error::{Result, ServiceError};

#[derive(Default)]
struct State {
    events: Vec<ReviewEvent>,
    progress: HashMap<WordId, WordProgress>,
    sessions: BTreeMap<SessionId, StudySession>,
    groups: BTreeMap<GroupId, GroupMembership>,
}

/// Store backed by a single mutex-guarded state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group and its member words.
    pub fn insert_group(&self, group: GroupMembership) -> Result<()> {
        self.lock()?.groups.insert(group.group_id, group);
        Ok(())
    }

    /// Register a study session.
    pub fn insert_session(&self, session: StudySession) -> Result<()> {
        self.lock()?.sessions.insert(session.id, session);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

#[async_trait]
impl ProgressStore for InMemoryStore {
    async fn get_progress(&self, word_id: WordId) -> Result<Option<WordProgress>> {
        Ok(self.lock()?.progress.get(&word_id).cloned())
    }

    async fn save_review(&self, event: &ReviewEvent, progress: &WordProgress) -> Result<()> {
        let mut state = self.lock()?;
        state.events.push(event.clone());
        state.progress.insert(progress.word_id, progress.clone());
        Ok(())
    }

    async fn all_progress(&self) -> Result<Vec<WordProgress>> {
        let mut records: Vec<_> = self.lock()?.progress.values().cloned().collect();
        records.sort_by_key(|p| p.word_id);
        Ok(records)
    }

    async fn events(&self) -> Result<Vec<ReviewEvent>> {
        Ok(self.lock()?.events.clone())
    }

    async fn events_for_word(&self, word_id: WordId) -> Result<Vec<ReviewEvent>> {
        Ok(self
            .lock()?
            .events
            .iter()
            .filter(|e| e.word_id == word_id)
            .cloned()
            .collect())
    }

    async fn events_for_session(&self, session_id: SessionId) -> Result<Vec<ReviewEvent>> {
        Ok(self
            .lock()?
            .events
            .iter()
            .filter(|e| e.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn session(&self, session_id: SessionId) -> Result<Option<StudySession>> {
        Ok(self.lock()?.sessions.get(&session_id).cloned())
    }

    async fn sessions(&self) -> Result<Vec<StudySession>> {
        Ok(self.lock()?.sessions.values().cloned().collect())
    }

    async fn group(&self, group_id: GroupId) -> Result<Option<GroupMembership>> {
        Ok(self.lock()?.groups.get(&group_id).cloned())
    }

    async fn word_exists(&self, word_id: WordId) -> Result<bool> {
        Ok(self.lock()?.groups.values().any(|g| g.contains(word_id)))
    }

    async fn reset_history(&self) -> Result<()> {
        let mut state = self.lock()?;
        state.events.clear();
        state.progress.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn save_review_appends_and_replaces() {
        let store = InMemoryStore::new();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
        let event = ReviewEvent::new(WordId(1), SessionId(1), true, at);
        let mut progress = WordProgress::new(WordId(1), at);
        progress.total_attempts = 1;
        progress.correct_attempts = 1;

        store.save_review(&event, &progress).await.unwrap();
        store.save_review(&event, &progress).await.unwrap();

        assert_eq!(store.events().await.unwrap().len(), 2);
        assert_eq!(store.all_progress().await.unwrap().len(), 1);
        assert_eq!(store.get_progress(WordId(1)).await.unwrap(), Some(progress));
    }

    #[tokio::test]
    async fn reset_keeps_groups_and_sessions() {
        let store = InMemoryStore::new();
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
        store
            .insert_group(GroupMembership::new(GroupId(1), [WordId(1)]))
            .unwrap();
        store
            .insert_session(StudySession {
                id: SessionId(1),
                group_id: GroupId(1),
                started_at: at,
            })
            .unwrap();
        let event = ReviewEvent::new(WordId(1), SessionId(1), false, at);
        store
            .save_review(&event, &WordProgress::new(WordId(1), at))
            .await
            .unwrap();

        store.reset_history().await.unwrap();

        assert!(store.events().await.unwrap().is_empty());
        assert_eq!(store.get_progress(WordId(1)).await.unwrap(), None);
        assert!(store.word_exists(WordId(1)).await.unwrap());
        assert_eq!(store.sessions().await.unwrap().len(), 1);
    }
}
