/*!
 * Tracking Session
 * Hook classification and dispatch for one start..stop window
 */

use super::report::Report;
use super::stats::Stats;
use crate::core::errors::{TrackError, TrackResult};
use crate::core::types::{Address, Category, RawCall, SessionConfig, Size};
use crate::index::{Block, BlockIndex, ListBlocks};
use crate::monitoring::{MemOp, MemoryView};
use crate::sys::SystemAllocator;
use log::trace;

/// Operation kind, derived purely from the raw call shape.
#[derive(Debug)]
enum Op {
    Free {
        ptr: Option<Address>,
        old_size: Size,
    },
    Allocate {
        category: Category,
        size: Size,
    },
    Reallocate {
        ptr: Address,
        old_size: Size,
        new_size: Size,
    },
}

impl From<RawCall> for Op {
    fn from(raw: RawCall) -> Self {
        if raw.new_size == 0 {
            Op::Free {
                ptr: raw.ptr,
                old_size: raw.old_size,
            }
        } else {
            match raw.ptr {
                None => Op::Allocate {
                    category: raw.category,
                    size: raw.new_size,
                },
                Some(ptr) => Op::Reallocate {
                    ptr,
                    old_size: raw.old_size,
                    new_size: raw.new_size,
                },
            }
        }
    }
}

/// All state of one tracking session. Created by `start`, consumed by
/// `stop`; the profiler holds at most one, so two concurrent sessions
/// cannot exist.
pub(super) struct Session {
    config: SessionConfig,
    index: BlockIndex,
    stats: Stats,
    view: Option<Box<dyn MemoryView>>,
    /// Highest address an allocate returned; feeds the report's span
    /// estimate together with `config.base_address`.
    highest_address: Address,
}

impl Session {
    pub fn new(config: SessionConfig, mut view: Option<Box<dyn MemoryView>>) -> Self {
        if let Some(view) = view.as_mut() {
            view.begin(config.base_address, config.expected_usage_mb);
        }
        let with_lists = view.is_some();
        Self {
            config,
            index: BlockIndex::new(with_lists),
            stats: Stats::new(),
            view,
            highest_address: 0,
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn index(&self) -> &BlockIndex {
        &self.index
    }

    pub fn live_blocks(&self) -> ListBlocks<'_> {
        self.index.live_blocks()
    }

    pub fn blocks_in(&self, category: Category) -> ListBlocks<'_> {
        self.index.blocks_in(category)
    }

    /// Dispatch one hook call: perform the real memory operation through
    /// `sys`, then bring index, lists, and counters up to date, then forward
    /// the normalized event. Bookkeeping always commits before forwarding.
    pub fn handle<A: SystemAllocator>(
        &mut self,
        sys: &mut A,
        raw: RawCall,
    ) -> TrackResult<Option<Address>> {
        match Op::from(raw) {
            Op::Free { ptr, old_size } => Ok(self.on_free(sys, ptr, old_size)),
            Op::Allocate { category, size } => {
                self.on_allocate(sys, category, size).map(Some)
            }
            Op::Reallocate {
                ptr,
                old_size,
                new_size,
            } => self.on_reallocate(sys, ptr, old_size, new_size).map(Some),
        }
    }

    fn on_free<A: SystemAllocator>(
        &mut self,
        sys: &mut A,
        ptr: Option<Address>,
        old_size: Size,
    ) -> Option<Address> {
        let Some(address) = ptr else {
            // Freeing null is a host-side no-op.
            return None;
        };
        if let Some(block) = self.index.remove(address) {
            self.stats.record_free(block.size);
            trace!("free {:#x} ({} bytes, {})", address, block.size, block.category);
            self.forward(MemOp::Free {
                address,
                category: block.category,
                size: block.size,
            });
        } else {
            // Memory from before tracking started; release it all the same.
            trace!("free {:#x} (untracked)", address);
        }
        sys.free(address, old_size);
        None
    }

    fn on_allocate<A: SystemAllocator>(
        &mut self,
        sys: &mut A,
        category: Category,
        size: Size,
    ) -> TrackResult<Address> {
        let address = sys
            .alloc(size)
            .ok_or(TrackError::AllocationFailed { requested: size })?;
        self.index.insert(Block::new(address, size, category));
        self.stats.record_alloc(size, category);
        if address > self.highest_address {
            self.highest_address = address;
        }
        trace!("alloc {:#x} ({} bytes, {})", address, size, category);
        self.forward(MemOp::Allocate {
            address,
            category,
            size,
        });
        Ok(address)
    }

    fn on_reallocate<A: SystemAllocator>(
        &mut self,
        sys: &mut A,
        ptr: Address,
        old_size: Size,
        new_size: Size,
    ) -> TrackResult<Address> {
        let address = sys
            .realloc(ptr, old_size, new_size)
            .ok_or(TrackError::AllocationFailed {
                requested: new_size,
            })?;

        // The block identity is always destroyed and recreated, even when
        // the region did not move; views compare old and new addresses when
        // they need the distinction.
        let (tracked_old_size, category) = match self.index.remove(ptr) {
            Some(old) => (old.size, old.category),
            // Reallocating memory from before tracking began: treated as a
            // fresh arrival of the whole new size.
            None => (0, Category::Other),
        };
        self.index.insert(Block::new(address, new_size, category));
        let delta = new_size as i64 - tracked_old_size as i64;
        self.stats.record_realloc(delta);
        trace!(
            "realloc {:#x} -> {:#x} ({} -> {} bytes)",
            ptr,
            address,
            tracked_old_size,
            new_size
        );
        self.forward(MemOp::Reallocate {
            old_address: ptr,
            old_size: tracked_old_size,
            address,
            category,
            size: new_size,
        });
        Ok(address)
    }

    fn forward(&mut self, op: MemOp) {
        if let Some(view) = self.view.as_mut() {
            view.on_op(&op);
        }
    }

    /// Close the session: let the view tear down and build the final report.
    pub fn finish(mut self) -> Report {
        if let Some(view) = self.view.as_mut() {
            view.end();
        }
        let view_enabled = self.view.is_some();
        Report::new(
            self.stats,
            self.config.base_address,
            self.highest_address,
            view_enabled,
        )
    }
}
