//! Sort order persistence
//!
//! Writes a reorder batch one entity at a time. Each request is awaited
//! before the next is sent, so an interrupted batch leaves an applied prefix
//! of the permutation and never a torn write.

use shared::SortOrderUpdate;

use crate::error::{ReorderError, ReorderResult};
use crate::store::{ListScope, SortOrderStore};

/// Summary of a completed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub applied: usize,
}

/// Sequential writer for sort order batches
#[derive(Debug)]
pub struct SortOrderSync<'a, S> {
    store: &'a S,
}

impl<'a, S: SortOrderStore> SortOrderSync<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Persist every update in order, stopping at the first failure
    ///
    /// Already applied writes are not rolled back; the error reports how far
    /// the batch got.
    pub async fn apply(
        &self,
        scope: &ListScope,
        updates: &[SortOrderUpdate],
    ) -> ReorderResult<SyncReport> {
        for (index, update) in updates.iter().enumerate() {
            tracing::debug!(
                kind = %S::KIND,
                scope = %scope,
                entity_id = %update.id,
                sort_order = update.sort_order,
                "Writing sort order"
            );

            if let Err(source) = self
                .store
                .update_sort_order(scope, &update.id, update.sort_order)
                .await
            {
                let abandoned = updates.len() - index - 1;
                tracing::warn!(
                    kind = %S::KIND,
                    scope = %scope,
                    entity_id = %update.id,
                    applied = index,
                    abandoned,
                    error = %source,
                    "Sort order batch abandoned"
                );
                return Err(ReorderError::Sync {
                    entity_id: update.id.clone(),
                    applied: index,
                    abandoned,
                    source,
                });
            }
        }

        tracing::info!(
            kind = %S::KIND,
            scope = %scope,
            applied = updates.len(),
            "Sort order batch applied"
        );
        Ok(SyncReport {
            applied: updates.len(),
        })
    }
}
