/*!
 * Block Index
 * Address-keyed index over every currently live allocation
 *
 * A fixed-bucket hash table with separate chaining is the source of truth
 * for liveness; the optional category/all lists answer bulk queries for the
 * visualization path without a full scan. All three structures share the
 * same arena records, so insert and remove mutate them as one step: there is
 * no observable state with a block indexed but unlisted, or listed but
 * unindexed.
 */

mod arena;
mod block;
mod lists;

pub use block::Block;

use crate::core::limits::BUCKET_COUNT;
use crate::core::types::{Address, Category};
use ahash::RandomState;
use arena::{BlockArena, BlockId, Node};
use lists::CategoryLists;
use std::hash::BuildHasher;

pub struct BlockIndex {
    arena: BlockArena,
    buckets: Vec<Option<BlockId>>,
    lists: Option<CategoryLists>,
    hasher: RandomState,
}

impl BlockIndex {
    /// Create an empty index. `with_lists` enables category/all list
    /// maintenance; when off, list queries yield nothing and cost nothing.
    pub fn new(with_lists: bool) -> Self {
        Self {
            arena: BlockArena::new(),
            buckets: vec![None; BUCKET_COUNT],
            lists: with_lists.then(CategoryLists::new),
            hasher: RandomState::new(),
        }
    }

    #[inline]
    fn bucket_of(&self, address: Address) -> usize {
        (self.hasher.hash_one(address) % BUCKET_COUNT as u64) as usize
    }

    /// Track a new live allocation. The address must not already be present;
    /// a duplicate insert is a caller bug, not a recoverable state.
    pub fn insert(&mut self, block: Block) {
        debug_assert!(
            self.get(block.address).is_none(),
            "duplicate insert at {:#x}",
            block.address
        );
        let bucket = self.bucket_of(block.address);
        let id = self.arena.insert(Node::new(block));
        self.arena.get_mut(id).next = self.buckets[bucket];
        self.buckets[bucket] = Some(id);
        if let Some(lists) = self.lists.as_mut() {
            lists.push(&mut self.arena, id);
        }
    }

    /// Remove and return the block at `address`, unlinking it from the
    /// bucket chain and from both lists in the same step. Unknown addresses
    /// return `None`: the host may legitimately release memory that predates
    /// tracking.
    pub fn remove(&mut self, address: Address) -> Option<Block> {
        let bucket = self.bucket_of(address);
        let mut prev: Option<BlockId> = None;
        let mut cursor = self.buckets[bucket];
        while let Some(id) = cursor {
            let node = self.arena.get(id);
            let next = node.next;
            if node.block.address == address {
                match prev {
                    Some(prev) => self.arena.get_mut(prev).next = next,
                    None => self.buckets[bucket] = next,
                }
                if let Some(lists) = self.lists.as_mut() {
                    lists.unlink(&mut self.arena, id);
                }
                return Some(self.arena.remove(id).block);
            }
            prev = Some(id);
            cursor = next;
        }
        None
    }

    pub fn get(&self, address: Address) -> Option<&Block> {
        let mut cursor = self.buckets[self.bucket_of(address)];
        while let Some(id) = cursor {
            let node = self.arena.get(id);
            if node.block.address == address {
                return Some(&node.block);
            }
            cursor = node.next;
        }
        None
    }

    pub fn contains(&self, address: Address) -> bool {
        self.get(address).is_some()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_lists(&self) -> bool {
        self.lists.is_some()
    }

    /// Iterate every live block by walking the bucket chains. Always
    /// available; order is arbitrary.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            index: self,
            bucket: 0,
            cursor: None,
        }
    }

    /// Iterate live blocks in all-list order, newest first. Empty when
    /// lists are disabled.
    pub fn live_blocks(&self) -> ListBlocks<'_> {
        ListBlocks {
            arena: &self.arena,
            cursor: self.lists.as_ref().and_then(CategoryLists::all_head),
            link: Link::All,
        }
    }

    /// Iterate live blocks of one category, newest first. Empty when lists
    /// are disabled.
    pub fn blocks_in(&self, category: Category) -> ListBlocks<'_> {
        ListBlocks {
            arena: &self.arena,
            cursor: self.lists.as_ref().and_then(|l| l.category_head(category)),
            link: Link::Category,
        }
    }
}

/// Bucket-chain iterator over all live blocks.
pub struct Blocks<'a> {
    index: &'a BlockIndex,
    bucket: usize,
    cursor: Option<BlockId>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        loop {
            if let Some(id) = self.cursor {
                let node = self.index.arena.get(id);
                self.cursor = node.next;
                return Some(&node.block);
            }
            if self.bucket >= self.index.buckets.len() {
                return None;
            }
            self.cursor = self.index.buckets[self.bucket];
            self.bucket += 1;
        }
    }
}

#[derive(Clone, Copy)]
enum Link {
    Category,
    All,
}

/// List-order iterator (category list or all-list).
pub struct ListBlocks<'a> {
    arena: &'a BlockArena,
    cursor: Option<BlockId>,
    link: Link,
}

impl<'a> Iterator for ListBlocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        let id = self.cursor?;
        let node = self.arena.get(id);
        self.cursor = match self.link {
            Link::Category => node.next_cat,
            Link::All => node.next_all,
        };
        Some(&node.block)
    }
}
