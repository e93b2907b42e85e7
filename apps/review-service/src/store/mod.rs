//! Persistence boundary for review events and word progress.

pub mod memory;

use async_trait::async_trait;
use progress_core::{
    GroupId, GroupMembership, ReviewEvent, SessionId, StudySession, WordId, WordProgress,
};

use crate::error::Result;

pub use memory::InMemoryStore;

/// Storage contract used by [`ReviewService`](crate::services::review::ReviewService).
///
/// Events are append-only. The only deletion path is [`reset_history`],
/// which drops all events and progress together.
///
/// [`reset_history`]: ProgressStore::reset_history
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Current progress of a word, `None` if it was never reviewed.
    async fn get_progress(&self, word_id: WordId) -> Result<Option<WordProgress>>;

    /// Append `event` and replace the word's progress in one step.
    async fn save_review(&self, event: &ReviewEvent, progress: &WordProgress) -> Result<()>;

    async fn all_progress(&self) -> Result<Vec<WordProgress>>;

    async fn events(&self) -> Result<Vec<ReviewEvent>>;

    async fn events_for_word(&self, word_id: WordId) -> Result<Vec<ReviewEvent>>;

    async fn events_for_session(&self, session_id: SessionId) -> Result<Vec<ReviewEvent>>;

    async fn session(&self, session_id: SessionId) -> Result<Option<StudySession>>;

    async fn sessions(&self) -> Result<Vec<StudySession>>;

    async fn group(&self, group_id: GroupId) -> Result<Option<GroupMembership>>;

    /// Whether the word belongs to any group.
    async fn word_exists(&self, word_id: WordId) -> Result<bool>;

    /// Delete every review event and progress record.
    async fn reset_history(&self) -> Result<()>;
}
