/*!
 * Monitoring
 * Normalized memory-operation events and the visualization boundary
 */

use crate::core::types::{Address, Category, Size};
use serde::{Deserialize, Serialize};

/// Normalized event forwarded to an attached view after each successful
/// operation. All variants carry the address, category, and size of the
/// block the operation produced (for frees: the block it destroyed).
///
/// `Reallocate` carries both sides so a view can erase-old/draw-new when the
/// address moved, or repaint only the grown/shrunk tail when it did not;
/// the index layer itself does not keep that distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemOp {
    Allocate {
        address: Address,
        category: Category,
        size: Size,
    },
    Free {
        address: Address,
        category: Category,
        size: Size,
    },
    Reallocate {
        old_address: Address,
        old_size: Size,
        address: Address,
        category: Category,
        size: Size,
    },
}

impl MemOp {
    /// Address of the block the operation produced (or destroyed).
    pub fn address(&self) -> Address {
        match *self {
            MemOp::Allocate { address, .. }
            | MemOp::Free { address, .. }
            | MemOp::Reallocate { address, .. } => address,
        }
    }

    pub fn size(&self) -> Size {
        match *self {
            MemOp::Allocate { size, .. }
            | MemOp::Free { size, .. }
            | MemOp::Reallocate { size, .. } => size,
        }
    }

    pub fn category(&self) -> Category {
        match *self {
            MemOp::Allocate { category, .. }
            | MemOp::Free { category, .. }
            | MemOp::Reallocate { category, .. } => category,
        }
    }
}

/// Visualization collaborator interface. Implementations render tracked
/// state; the engine only pushes events and session boundaries through it.
///
/// Calls may block (a paused display waiting for input); the engine commits
/// all of its own bookkeeping before forwarding, so correctness never
/// depends on how promptly an implementation returns.
pub trait MemoryView {
    /// Session start: base of the tracked address range and the host's
    /// expected-usage hint for canvas sizing (hints at or below
    /// [`crate::core::limits::DEFAULT_CANVAS_MB`] mean "use the default").
    fn begin(&mut self, base_address: Address, expected_mb: f32);

    /// One completed memory operation.
    fn on_op(&mut self, op: &MemOp);

    /// Session end; the view should release its display resources.
    fn end(&mut self);
}
