//! Shared setup for store integration tests.

use std::sync::Arc;

use roster_core::builder::StudentBuilder;
use roster_core::config::{DbConfig, LiveConfig};
use roster_core::Database;

/// Creates a store with the given enrollment limit.
pub fn database_with_limit(max_students_per_course: usize) -> Database {
    Database::with_config(Arc::new(LiveConfig::new(DbConfig {
        max_students_per_course,
        ..Default::default()
    })))
}

/// Inserts students with ids `1..=count` named `TestStudent{id}`.
pub fn seed_students(db: &Database, count: u64) {
    for id in 1..=count {
        StudentBuilder::new()
            .id(id)
            .name(format!("TestStudent{}", id))
            .insert(db)
            .unwrap();
    }
}
