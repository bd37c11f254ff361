/*!
 * Statistics Engine
 * Running counters over every operation of one tracking session
 */

use crate::core::types::{Category, Size};
use serde::{Deserialize, Serialize};

/// Per-operation and per-category counters plus the live/peak accumulators.
/// Pure bookkeeping; reset wholesale when a session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub alloc_count: u64,
    pub alloc_bytes: u64,
    pub free_count: u64,
    pub free_bytes: u64,
    pub realloc_count: u64,
    /// Signed: reallocations accumulate `new_size - old_size`, so shrinking
    /// drives this negative.
    pub realloc_delta_bytes: i64,
    /// Allocation counts per category. Bumped on allocate only; realloc and
    /// free never change them.
    pub category_counts: [u64; Category::COUNT],
    /// Signed accumulator of currently live bytes.
    pub live_bytes: i64,
    /// Running maximum of `live_bytes`; never decreases within a session.
    pub peak_bytes: i64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, category: Category) -> u64 {
        self.category_counts[category.index()]
    }

    pub(crate) fn record_alloc(&mut self, size: Size, category: Category) {
        self.alloc_count += 1;
        self.alloc_bytes += size as u64;
        self.category_counts[category.index()] += 1;
        self.bump_live(size as i64);
    }

    pub(crate) fn record_free(&mut self, size: Size) {
        self.free_count += 1;
        self.free_bytes += size as u64;
        self.live_bytes -= size as i64;
    }

    pub(crate) fn record_realloc(&mut self, delta: i64) {
        self.realloc_count += 1;
        self.realloc_delta_bytes += delta;
        self.bump_live(delta);
    }

    fn bump_live(&mut self, delta: i64) {
        self.live_bytes += delta;
        if self.live_bytes > self.peak_bytes {
            self.peak_bytes = self.live_bytes;
        }
    }
}
