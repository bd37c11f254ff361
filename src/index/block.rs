/*!
 * Block Metadata
 * The bookkeeping record for one live allocation
 */

use crate::core::types::{Address, Category, Size};
use serde::{Deserialize, Serialize};

/// Describes one currently live host allocation. Identity and size only;
/// the memory region itself stays owned by the host allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub address: Address,
    pub size: Size,
    pub category: Category,
}

impl Block {
    pub fn new(address: Address, size: Size, category: Category) -> Self {
        Self {
            address,
            size,
            category,
        }
    }
}
