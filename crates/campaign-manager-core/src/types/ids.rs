//! Synthetic ID generation
//!
//! IDs are millisecond timestamps, bumped so that every ID handed out by one
//! generator is strictly greater than the previous one.

use std::sync::atomic::{AtomicI64, Ordering};

/// Monotonic timestamp-shaped ID generator
#[derive(Debug, Default)]
pub struct IdGenerator {
    /// Last ID handed out
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next ID, based on the wall clock
    pub fn next_id(&self) -> i64 {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Next ID given the current time in milliseconds
    fn next_at(&self, now_ms: i64) -> i64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => current = observed,
            }
        }
    }
}
