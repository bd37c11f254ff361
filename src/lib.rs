/*!
 * heapscope
 * Allocation-tracking engine for managed-language runtimes
 *
 * Instruments every allocate/free/reallocate the host performs, keeps an
 * address-keyed index of live blocks classified by the runtime's value
 * category, and reports counts, byte totals, and peak usage at session end.
 * An optional view receives a normalized event stream for live display.
 */

pub mod core;
pub mod index;
pub mod monitoring;
pub mod profiler;
pub mod sys;

// Re-exports
pub use crate::core::errors::{TrackError, TrackResult};
pub use crate::core::types::{Address, Category, RawCall, SessionConfig, Size};
pub use index::{Block, BlockIndex};
pub use monitoring::{MemOp, MemoryView};
pub use profiler::{Profiler, Report, Stats};
pub use sys::{NativeAllocator, SystemAllocator};
