//! Review recording and progress reporting.
//!
//! Writes for the same word are serialized with a per-word async lock held
//! across read, apply, and save. Different words proceed in parallel. Every
//! write also holds the shared side of a reset gate, so a history reset never
//! interleaves with a review. Reports read a snapshot from the store and hand
//! it to the aggregator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use progress_core::{
    ActivityDay, DashboardStats, EngineConfig, GroupId, GroupStats, LastSession,
    MasteryDistribution, ProgressTracker, ReviewEvent, ReviewOutcome, SessionId, SessionStats,
    StatsAggregator, WordId, WordProgress, WordStats,
};
use tokio::sync::{Mutex as AsyncMutex, RwLock};

use crate::error::{Result, ServiceError};
use crate::store::ProgressStore;

/// Records reviews and answers progress queries over a [`ProgressStore`].
pub struct ReviewService {
    store: Arc<dyn ProgressStore>,
    tracker: ProgressTracker,
    stats: StatsAggregator,
    word_locks: Mutex<HashMap<WordId, Arc<AsyncMutex<()>>>>,
    reset_gate: RwLock<()>,
}

impl ReviewService {
    /// Service with the default engine configuration.
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self::build(store, &EngineConfig::default())
    }

    /// Service with a custom configuration, rejected if invalid.
    pub fn with_config(store: Arc<dyn ProgressStore>, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    fn build(store: Arc<dyn ProgressStore>, config: &EngineConfig) -> Self {
        Self {
            store,
            tracker: ProgressTracker::from_config(config),
            stats: StatsAggregator::new(config.stats.clone()),
            word_locks: Mutex::new(HashMap::new()),
            reset_gate: RwLock::new(()),
        }
    }

    /// Record one review outcome and return the word's updated state.
    pub async fn record_review(&self, event: ReviewEvent) -> Result<ReviewOutcome> {
        if !self.store.word_exists(event.word_id).await? {
            return Err(ServiceError::WordNotFound(event.word_id));
        }
        if self.store.session(event.session_id).await?.is_none() {
            return Err(ServiceError::SessionNotFound(event.session_id));
        }

        let _gate = self.reset_gate.read().await;
        let lock = self.word_lock(event.word_id)?;
        let result = {
            let _guard = match lock.try_lock() {
                Ok(guard) => guard,
                Err(_) => {
                    tracing::debug!(
                        word = %event.word_id,
                        "waiting for in-flight review of same word"
                    );
                    lock.lock().await
                }
            };
            self.apply_review(&event).await
        };
        self.release_word_lock(event.word_id, &lock)?;
        result
    }

    async fn apply_review(&self, event: &ReviewEvent) -> Result<ReviewOutcome> {
        let current = self
            .store
            .get_progress(event.word_id)
            .await?
            .unwrap_or_else(|| WordProgress::new(event.word_id, event.timestamp));
        let updated = self.tracker.apply(&current, event)?;
        self.store.save_review(event, &updated).await?;

        Ok(updated.outcome()?)
    }

    /// Stats for a word that belongs to some group.
    pub async fn word_stats(&self, word_id: WordId) -> Result<WordStats> {
        if !self.store.word_exists(word_id).await? {
            return Err(ServiceError::WordNotFound(word_id));
        }
        let events = self.store.events_for_word(word_id).await?;
        let progress = self.store.get_progress(word_id).await?;
        Ok(self.stats.word_stats(word_id, &events, progress.as_ref())?)
    }

    pub async fn session_stats(&self, session_id: SessionId) -> Result<SessionStats> {
        if self.store.session(session_id).await?.is_none() {
            return Err(ServiceError::SessionNotFound(session_id));
        }
        let events = self.store.events_for_session(session_id).await?;
        Ok(self.stats.session_stats(session_id, &events))
    }

    pub async fn group_stats(&self, group_id: GroupId, now: DateTime<Utc>) -> Result<GroupStats> {
        let group = self
            .store
            .group(group_id)
            .await?
            .ok_or(ServiceError::GroupNotFound(group_id))?;
        let events = self.store.events().await?;
        let progress = self.store.all_progress().await?;
        Ok(self.stats.group_stats(&group, &events, &progress, now))
    }

    pub async fn dashboard_stats(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let events = self.store.events().await?;
        let sessions = self.store.sessions().await?;
        Ok(self.stats.dashboard_stats(&events, &sessions, now))
    }

    pub async fn last_session(&self) -> Result<Option<LastSession>> {
        let sessions = self.store.sessions().await?;
        let events = self.store.events().await?;
        Ok(self.stats.last_session(&sessions, &events))
    }

    /// Words per mastery level, for one group or for every reviewed word.
    pub async fn mastery_distribution(
        &self,
        group_id: Option<GroupId>,
    ) -> Result<MasteryDistribution> {
        let group = match group_id {
            Some(id) => Some(
                self.store
                    .group(id)
                    .await?
                    .ok_or(ServiceError::GroupNotFound(id))?,
            ),
            None => None,
        };
        let progress = self.store.all_progress().await?;
        Ok(self.stats.mastery_distribution(&progress, group.as_ref()))
    }

    pub async fn due_words(&self, now: DateTime<Utc>) -> Result<Vec<WordId>> {
        let progress = self.store.all_progress().await?;
        Ok(self.stats.due_words(&progress, now))
    }

    pub async fn activity(&self, now: DateTime<Utc>) -> Result<Vec<ActivityDay>> {
        let events = self.store.events().await?;
        Ok(self.stats.activity(&events, now))
    }

    /// Delete all review events and progress.
    ///
    /// Waits for in-flight reviews to finish and holds off new ones until the
    /// store is cleared.
    pub async fn reset_history(&self) -> Result<()> {
        let _gate = self.reset_gate.write().await;
        self.store.reset_history().await?;
        tracing::info!("review history reset");
        Ok(())
    }

    fn word_lock(&self, word_id: WordId) -> Result<Arc<AsyncMutex<()>>> {
        Ok(self.locks()?.entry(word_id).or_default().clone())
    }

    /// Drop the map entry once no other review holds or waits on it.
    fn release_word_lock(&self, word_id: WordId, lock: &Arc<AsyncMutex<()>>) -> Result<()> {
        let mut locks = self.locks()?;
        let unused = locks
            .get(&word_id)
            .is_some_and(|entry| Arc::ptr_eq(entry, lock) && Arc::strong_count(lock) == 2);
        if unused {
            locks.remove(&word_id);
        }
        Ok(())
    }

    fn locks(&self) -> Result<std::sync::MutexGuard<'_, HashMap<WordId, Arc<AsyncMutex<()>>>>> {
        self.word_locks
            .lock()
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}
