//! Reference collaborator around the progress engine.
//!
//! Owns the persistence boundary ([`store::ProgressStore`]), serializes
//! writes per word, and serves the progress reports.

pub mod config;
pub mod error;
pub mod services;
pub mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::parse_engine_config;
pub use error::{Result, ServiceError};
pub use services::review::ReviewService;
pub use store::{InMemoryStore, ProgressStore};

/// Install the global tracing subscriber.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. Calling this more than
/// once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
