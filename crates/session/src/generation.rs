//! Request generations for stale-response discarding.
//!
//! Every in-flight request carries the generation it was issued under; a
//! response only commits if its generation is still the latest, so a slow
//! answer can never overwrite data requested after it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing request generation counter.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: AtomicU64,
}

impl GenerationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation, superseding all earlier ones, and returns it.
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The latest generation issued.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Whether a response from `generation` is still allowed to commit.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}
