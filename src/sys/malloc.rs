/*!
 * Native Allocator
 * libc-backed implementation of the system allocator boundary
 */

use super::SystemAllocator;
use crate::core::types::{Address, Size};
use libc::c_void;

/// Delegates to the C heap. Addresses handed out here must only ever come
/// back through [`SystemAllocator::realloc`] and [`SystemAllocator::free`]
/// of this same allocator; the host's hook contract guarantees exactly that.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeAllocator;

impl SystemAllocator for NativeAllocator {
    fn alloc(&mut self, size: Size) -> Option<Address> {
        // SAFETY: plain malloc; null means refusal.
        let ptr = unsafe { libc::malloc(size) };
        if ptr.is_null() {
            None
        } else {
            Some(ptr as Address)
        }
    }

    fn realloc(&mut self, address: Address, _old_size: Size, new_size: Size) -> Option<Address> {
        // SAFETY: `address` came from this allocator's malloc/realloc and is
        // still live; null leaves the original region intact.
        let ptr = unsafe { libc::realloc(address as *mut c_void, new_size) };
        if ptr.is_null() {
            None
        } else {
            Some(ptr as Address)
        }
    }

    fn free(&mut self, address: Address, _size: Size) {
        // SAFETY: same provenance argument as realloc.
        unsafe { libc::free(address as *mut c_void) }
    }
}
