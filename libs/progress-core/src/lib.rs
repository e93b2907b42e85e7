//! Progress tracking and spaced-repetition engine for vocabulary review.
//!
//! Provides:
//! - Accuracy calculation shared by every report
//! - Mastery classification (levels 0-5) with a minimum-attempts gate
//! - Review scheduling from a fixed interval table
//! - Pure per-word progress updates from review events
//! - Read-only statistics at word, session, group, and dashboard scope

pub mod accuracy;
pub mod config;
pub mod error;
pub mod mastery;
pub mod scheduler;
pub mod stats;
pub mod tracker;
pub mod types;

pub use accuracy::{accuracy, round_percent, Tally};
pub use config::{
    EngineConfig, MasteryConfig, ReviewInterval, ScheduleConfig, StatsConfig, StreakMode,
};
pub use error::{ProgressError, Result};
pub use mastery::MasteryClassifier;
pub use scheduler::ReviewScheduler;
pub use stats::{
    ActivityDay, DashboardStats, GroupStats, LastSession, MasteryDistribution, SessionStats,
    StatsAggregator, WordStats,
};
pub use tracker::ProgressTracker;
pub use types::{
    GroupId, GroupMembership, MasteryLevel, ReviewEvent, ReviewOutcome, SessionId, StudySession,
    WordId, WordProgress,
};
