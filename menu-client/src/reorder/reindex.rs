//! Drag-and-drop reindexing
//!
//! Moves one entity to the slot of another and renumbers the list with
//! [`SORT_STEP`] gaps. Only the entities whose key actually changed end up in
//! the write set.

use shared::{SORT_STEP, Sortable, SortOrderUpdate};

/// Result of a reindex: the new permutation and the keys to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderBatch<T> {
    /// Entities in their new order, keys already reassigned
    pub items: Vec<T>,
    /// Changed keys, in new list order
    pub updates: Vec<SortOrderUpdate>,
}

impl<T> ReorderBatch<T> {
    fn unchanged(items: Vec<T>) -> Self {
        Self {
            items,
            updates: Vec::new(),
        }
    }

    /// True when nothing has to be written
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Move `source_id` to the position currently held by `target_id`
///
/// `items` must be ascending by sort order. Splice semantics: the source is
/// removed first and then inserted at the target's former index, so dragging
/// down lands after the target and dragging up lands before it. Self-drops and
/// ids missing from the snapshot leave the list untouched. With duplicate ids
/// the first occurrence is used.
pub fn reindex<T: Sortable + Clone>(items: &[T], source_id: &str, target_id: &str) -> ReorderBatch<T> {
    if items.is_empty() || source_id == target_id {
        return ReorderBatch::unchanged(items.to_vec());
    }

    let from = items.iter().position(|item| item.sort_id() == source_id);
    let to = items.iter().position(|item| item.sort_id() == target_id);
    let (Some(from), Some(to)) = (from, to) else {
        tracing::trace!(source_id, target_id, "Drop ignored, id not in snapshot");
        return ReorderBatch::unchanged(items.to_vec());
    };

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);

    renumber(reordered)
}

/// Sort key for a list position, saturating at `i32::MAX`
fn slot_key(index: usize) -> i32 {
    i32::try_from(index).map_or(i32::MAX, |index| index.saturating_mul(SORT_STEP))
}

/// Reassign `index * SORT_STEP` keys in list order
pub fn renumber<T: Sortable>(mut items: Vec<T>) -> ReorderBatch<T> {
    let mut updates = Vec::new();

    for (index, item) in items.iter_mut().enumerate() {
        let sort_order = slot_key(index);
        if item.sort_order() != sort_order {
            updates.push(SortOrderUpdate::new(item.sort_id(), sort_order));
            item.set_sort_order(sort_order);
        }
    }

    ReorderBatch { items, updates }
}
