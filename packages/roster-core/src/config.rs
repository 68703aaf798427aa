//! Store configuration.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Enrollment limit used when none is configured.
pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Maximum number of students a single course may hold
    pub max_students_per_course: usize,
    /// Treat an `id` list filter that names no course as not found
    pub strict_id_filter: bool,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            max_students_per_course: DEFAULT_MAX_STUDENTS_PER_COURSE,
            strict_id_filter: true,
            request_timeout_ms: 5000, // 5 seconds default
        }
    }
}

/// Shared configuration that can be swapped while the store is running.
///
/// Readers take a snapshot with [`LiveConfig::load`]; a write made through
/// [`LiveConfig::store`] or [`LiveConfig::update`] is seen by the next load.
pub struct LiveConfig {
    inner: ArcSwap<DbConfig>,
}

impl LiveConfig {
    /// Creates a live configuration holding `config`.
    pub fn new(config: DbConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(config),
        }
    }

    /// Returns the current configuration snapshot.
    pub fn load(&self) -> Arc<DbConfig> {
        self.inner.load_full()
    }

    /// Replaces the whole configuration.
    pub fn store(&self, config: DbConfig) {
        tracing::info!(?config, "Configuration replaced");
        self.inner.store(Arc::new(config));
    }

    /// Applies `f` to a copy of the current configuration and publishes it.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut DbConfig),
    {
        let mut next = DbConfig::clone(&self.inner.load());
        f(&mut next);
        self.store(next);
    }

    /// Shorthand for the current enrollment limit.
    pub fn max_students_per_course(&self) -> usize {
        self.inner.load().max_students_per_course
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self::new(DbConfig::default())
    }
}

impl std::fmt::Debug for LiveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveConfig")
            .field("current", &*self.inner.load())
            .finish()
    }
}
