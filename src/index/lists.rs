/*!
 * Category Lists
 * Per-category and all-block membership lists for the visualization path
 */

use super::arena::{BlockArena, BlockId};
use crate::core::types::Category;

/// Heads of the six category lists plus the all-list. The links themselves
/// live in the arena nodes; blocks join at the head and leave by patching
/// their neighbors on each side.
///
/// Maintained only while a visualization view is attached; the non-visual
/// path never touches these.
#[derive(Debug, Default)]
pub(super) struct CategoryLists {
    heads: [Option<BlockId>; Category::COUNT],
    all_head: Option<BlockId>,
}

impl CategoryLists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head-insert `id` into its category list and the all-list.
    pub fn push(&mut self, arena: &mut BlockArena, id: BlockId) {
        let category = arena.get(id).block.category;

        let head = self.heads[category.index()];
        if let Some(old_head) = head {
            arena.get_mut(old_head).prev_cat = Some(id);
        }
        let node = arena.get_mut(id);
        node.next_cat = head;
        node.prev_cat = None;
        self.heads[category.index()] = Some(id);

        let all = self.all_head;
        if let Some(old_head) = all {
            arena.get_mut(old_head).prev_all = Some(id);
        }
        let node = arena.get_mut(id);
        node.next_all = all;
        node.prev_all = None;
        self.all_head = Some(id);
    }

    /// Unlink `id` from both lists, fixing the list head when the node had
    /// no predecessor.
    pub fn unlink(&mut self, arena: &mut BlockArena, id: BlockId) {
        let (category, prev_cat, next_cat, prev_all, next_all) = {
            let node = arena.get(id);
            (
                node.block.category,
                node.prev_cat,
                node.next_cat,
                node.prev_all,
                node.next_all,
            )
        };

        match prev_cat {
            Some(prev) => arena.get_mut(prev).next_cat = next_cat,
            None => self.heads[category.index()] = next_cat,
        }
        if let Some(next) = next_cat {
            arena.get_mut(next).prev_cat = prev_cat;
        }

        match prev_all {
            Some(prev) => arena.get_mut(prev).next_all = next_all,
            None => self.all_head = next_all,
        }
        if let Some(next) = next_all {
            arena.get_mut(next).prev_all = prev_all;
        }

        let node = arena.get_mut(id);
        node.prev_cat = None;
        node.next_cat = None;
        node.prev_all = None;
        node.next_all = None;
    }

    pub fn category_head(&self, category: Category) -> Option<BlockId> {
        self.heads[category.index()]
    }

    pub fn all_head(&self) -> Option<BlockId> {
        self.all_head
    }
}
