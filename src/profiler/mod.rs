/*!
 * Profiler
 * Public entry points: start, stop, and the allocation hook
 */

mod report;
mod session;
mod stats;

pub use report::Report;
pub use stats::Stats;

use crate::core::errors::{TrackError, TrackResult};
use crate::core::types::{Address, Category, RawCall, SessionConfig};
use crate::index::ListBlocks;
use crate::monitoring::MemoryView;
use crate::sys::{NativeAllocator, SystemAllocator};
use log::{info, warn};
use session::Session;

/// The allocation tracker. Owns the underlying system allocator and at most
/// one live session; every host hook invocation lands in [`handle`].
///
/// Single-threaded by contract: the host runtime drives the hook from one
/// thread of execution and every method takes `&mut self`.
///
/// [`handle`]: Profiler::handle
pub struct Profiler<A: SystemAllocator> {
    sys: A,
    session: Option<Session>,
}

impl Profiler<NativeAllocator> {
    /// Profiler over the native C heap.
    pub fn native() -> Self {
        Self::new(NativeAllocator)
    }
}

impl<A: SystemAllocator> Profiler<A> {
    pub fn new(sys: A) -> Self {
        Self { sys, session: None }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a tracking session: fresh index, zeroed counters, and, when a
    /// view is attached, category/all lists plus event forwarding.
    ///
    /// Fails with [`TrackError::AlreadyActive`] if a session is running;
    /// the running session is left untouched.
    pub fn start(
        &mut self,
        config: SessionConfig,
        view: Option<Box<dyn MemoryView>>,
    ) -> TrackResult<()> {
        if self.session.is_some() {
            warn!("start requested while a tracking session is active");
            return Err(TrackError::AlreadyActive);
        }
        info!(
            "tracking session started: base={:#x} expected={}MB view={}",
            config.base_address,
            config.expected_usage_mb,
            view.is_some()
        );
        self.session = Some(Session::new(config, view));
        Ok(())
    }

    /// End the session: writes the final report to standard output, releases
    /// all bookkeeping, and returns the report. A later [`start`] begins
    /// from a clean slate.
    ///
    /// [`start`]: Profiler::start
    pub fn stop(&mut self) -> TrackResult<Report> {
        let session = self.session.take().ok_or_else(|| {
            warn!("stop requested with no active tracking session");
            TrackError::NotActive
        })?;
        let report = session.finish();
        info!("tracking session stopped");
        println!("{report}");
        Ok(report)
    }

    /// The allocation hook. Classifies the call as allocate, free, or
    /// reallocate from its shape alone, performs the real memory operation,
    /// and updates the index and counters.
    ///
    /// Returns the resulting address (`None` for frees). On
    /// [`TrackError::AllocationFailed`] no state was touched. On
    /// [`TrackError::NotActive`] the tracker performed nothing at all: the
    /// caller still owns the memory operation and routes it to the
    /// underlying allocator itself, as it would with no tracker installed.
    pub fn handle(&mut self, raw: RawCall) -> TrackResult<Option<Address>> {
        let session = self.session.as_mut().ok_or_else(|| {
            warn!("allocation hook called with no active tracking session");
            TrackError::NotActive
        })?;
        session.handle(&mut self.sys, raw)
    }

    /// Counters for the running session.
    pub fn stats(&self) -> TrackResult<&Stats> {
        self.active().map(Session::stats)
    }

    /// Number of currently tracked allocations.
    pub fn live_count(&self) -> TrackResult<usize> {
        self.active().map(|s| s.index().len())
    }

    /// Every live block, newest first, for bulk redraws. Yields nothing
    /// unless the session has a view attached.
    pub fn live_blocks(&self) -> TrackResult<ListBlocks<'_>> {
        self.active().map(Session::live_blocks)
    }

    /// Live blocks of one category, newest first. Yields nothing unless the
    /// session has a view attached.
    pub fn blocks_in(&self, category: Category) -> TrackResult<ListBlocks<'_>> {
        self.active().map(|s| s.blocks_in(category))
    }

    fn active(&self) -> TrackResult<&Session> {
        self.session.as_ref().ok_or(TrackError::NotActive)
    }
}
