// Item ids are the creation time in Unix milliseconds, rendered as a decimal
// string. Within one process ids are strictly increasing: if the clock has
// not moved past the last issued value the next id is `last + 1`.
// Two processes creating items in the same millisecond can still collide.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// Issues time-derived item ids.
#[derive(Debug, Default)]
pub struct RecordIdGenerator {
    last: AtomicU64,
}

impl RecordIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for an item created at `now`.
    pub fn next_at(&self, now: DateTime<Utc>) -> String {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next.to_string(),
                Err(observed) => last = observed,
            }
        }
    }

    /// Next id for an item created now.
    pub fn next_id(&self) -> String {
        self.next_at(Utc::now())
    }
}
