/*!
 * System Allocator Boundary
 * The uninstrumented path that actually acquires and releases host memory
 */

mod malloc;

pub use malloc::NativeAllocator;

use crate::core::types::{Address, Size};

/// Underlying allocator the engine delegates real memory operations to.
///
/// This seam is what keeps the hook non-reentrant: user memory flows through
/// an implementation of this trait, while the engine's own bookkeeping lives
/// in ordinary Rust collections on the global allocator. Instrumenting the
/// tracker's metadata through its own hook is impossible by construction.
///
/// Implementations report failure as `None`; the engine propagates it
/// without touching any index or counter.
pub trait SystemAllocator {
    /// Acquire `size` bytes. `size` is never zero.
    fn alloc(&mut self, size: Size) -> Option<Address>;

    /// Resize the region at `address` (previously `old_size` bytes) to
    /// `new_size` bytes, returning the possibly moved address.
    fn realloc(&mut self, address: Address, old_size: Size, new_size: Size) -> Option<Address>;

    /// Release the region at `address` (`size` bytes). Infallible.
    fn free(&mut self, address: Address, size: Size);
}
