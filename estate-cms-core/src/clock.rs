//! Timestamp source for `created_at` / `updated_at`.

use bson::DateTime;
use chrono::Utc;
use std::{
    fmt::Debug,
    sync::atomic::{AtomicI64, Ordering},
};

/// Source of the instants stamped on documents.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime;
}

/// Wall-clock UTC time at millisecond resolution.
///
/// Successive readings from one `SystemClock` are strictly increasing: two
/// readings inside the same millisecond (or across a backwards wall-clock step)
/// come back one millisecond apart, so an update is always stamped later than
/// whatever the same process stamped before it.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_millis: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        let wall = Utc::now().timestamp_millis();
        let mut last = self.last_millis.load(Ordering::Relaxed);

        loop {
            let next = wall.max(last.saturating_add(1));
            match self.last_millis.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return DateTime::from_millis(next),
                Err(seen) => last = seen,
            }
        }
    }
}
