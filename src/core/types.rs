/*!
 * Core Types
 * Common types used across the tracking engine
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a host allocation. Identity only; the tracker never owns or
/// dereferences the memory behind it.
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Value-category tag the host runtime attaches to each allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    String,
    Function,
    UserData,
    Thread,
    Table,
    Other,
}

impl Category {
    /// Number of distinct categories.
    pub const COUNT: usize = 6;

    /// All categories, in report order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::String,
        Category::Function,
        Category::UserData,
        Category::Thread,
        Category::Table,
        Category::Other,
    ];

    /// Dense index for per-category tables (counters, list heads).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::String => "string",
            Category::Function => "function",
            Category::UserData => "userdata",
            Category::Thread => "thread",
            Category::Table => "table",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One invocation of the host's allocation hook.
///
/// The host wire shape overloads a single "previous size" slot to mean the
/// category tag on first allocation and the old size otherwise; here the two
/// meanings are split into explicit fields. Operation kind is still derived
/// purely from `(ptr.is_none(), new_size == 0)`:
///
/// - `new_size == 0` -> free
/// - `ptr == None` -> allocate (`category` applies)
/// - otherwise -> reallocate (`old_size` applies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCall {
    pub ptr: Option<Address>,
    pub old_size: Size,
    pub category: Category,
    pub new_size: Size,
}

impl RawCall {
    /// Hook call requesting a fresh allocation.
    pub fn allocate(category: Category, size: Size) -> Self {
        Self {
            ptr: None,
            old_size: 0,
            category,
            new_size: size,
        }
    }

    /// Hook call releasing `ptr`. `old_size` is whatever the host reported;
    /// the tracked size wins for bookkeeping.
    pub fn free(ptr: Address, old_size: Size) -> Self {
        Self {
            ptr: Some(ptr),
            old_size,
            category: Category::Other,
            new_size: 0,
        }
    }

    /// Hook call resizing the allocation at `ptr`.
    pub fn reallocate(ptr: Address, old_size: Size, new_size: Size) -> Self {
        Self {
            ptr: Some(ptr),
            old_size,
            category: Category::Other,
            new_size,
        }
    }
}

/// Start-time configuration for one tracking session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Low end of the tracked address range, used by the report's
    /// memory-span estimate. Hosts usually pass their state pointer.
    pub base_address: Address,
    /// Expected memory consumption hint, forwarded to the visualization
    /// collaborator for canvas sizing.
    pub expected_usage_mb: f32,
}

impl SessionConfig {
    pub fn new(base_address: Address) -> Self {
        Self {
            base_address,
            expected_usage_mb: 0.0,
        }
    }

    pub fn with_expected_usage(mut self, mb: f32) -> Self {
        self.expected_usage_mb = mb;
        self
    }
}
