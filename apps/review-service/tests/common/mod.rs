//! Common test utilities and fixtures for integration tests.
//!
//! The default context has two groups:
//! - group 1 with words 1 and 2, studied in session 10
//! - group 2 with words 3, 4 and 5, studied in sessions 20 and 21

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use progress_core::EngineConfig;
use review_service::{InMemoryStore, ReviewService};

/// Test context containing a seeded store and a service over it.
pub struct TestContext {
    pub store: InMemoryStore,
    pub service: Arc<ReviewService>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        let store = InMemoryStore::new();
        store.insert_group(fixtures::group(1, &[1, 2])).unwrap();
        store.insert_group(fixtures::group(2, &[3, 4, 5])).unwrap();
        store
            .insert_session(fixtures::session(10, 1, fixtures::days_ago(3)))
            .unwrap();
        store
            .insert_session(fixtures::session(20, 2, fixtures::days_ago(2)))
            .unwrap();
        store
            .insert_session(fixtures::session(21, 2, fixtures::days_ago(1)))
            .unwrap();

        let service = ReviewService::with_config(Arc::new(store.clone()), config)
            .expect("valid test config");

        Self {
            store,
            service: Arc::new(service),
        }
    }
}
