//! Reorder controller
//!
//! Ties a drop to the remote list: waits for the list's batch slot, reindexes
//! the cached snapshot, writes the changed keys and refetches.

use std::sync::Arc;

use crate::cache::ListCache;
use crate::error::{ReorderError, ReorderResult};
use crate::store::{ListScope, SortOrderStore};

use super::queue::{BatchQueue, ListKey, OverlapPolicy};
use super::reindex::reindex;
use super::session::DragSession;
use super::sync::SortOrderSync;

/// What a reorder did
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome<T> {
    /// Guarded no-op: self-drop, unknown id, or order already as requested
    Unchanged,
    /// Batch fully written
    Applied {
        /// Number of sort order writes sent
        written: usize,
        /// The list as refetched after the batch, or the computed order if
        /// the refetch failed
        items: Vec<T>,
    },
}

impl<T> ReorderOutcome<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, ReorderOutcome::Unchanged)
    }
}

/// Drag-and-drop reordering for one kind of list
pub struct ReorderController<S: SortOrderStore> {
    store: Arc<S>,
    cache: Arc<ListCache<S::Entity>>,
    queue: BatchQueue,
}

impl<S: SortOrderStore> ReorderController<S> {
    pub fn new(store: S, policy: OverlapPolicy) -> Self {
        Self::with_cache(Arc::new(store), Arc::new(ListCache::new()), policy)
    }

    /// Share a store and cache with other consumers (e.g. availability toggles)
    pub fn with_cache(store: Arc<S>, cache: Arc<ListCache<S::Entity>>, policy: OverlapPolicy) -> Self {
        Self {
            store,
            cache,
            queue: BatchQueue::new(policy),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<ListCache<S::Entity>> {
        &self.cache
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.queue.policy()
    }

    /// Current list for a scope, refetched if stale
    pub async fn list(&self, scope: &ListScope) -> ReorderResult<Arc<Vec<S::Entity>>> {
        self.cache
            .load(self.store.as_ref(), scope)
            .await
            .map_err(|source| ReorderError::Fetch {
                scope: scope.to_string(),
                source,
            })
    }

    /// Move `source_id` onto `target_id` and persist the new order
    ///
    /// The list is refetched after the batch whether it succeeded or not. On
    /// failure the writes that went through stay applied.
    pub async fn reorder(
        &self,
        scope: &ListScope,
        source_id: &str,
        target_id: &str,
    ) -> ReorderResult<ReorderOutcome<S::Entity>> {
        if source_id == target_id {
            return Ok(ReorderOutcome::Unchanged);
        }

        let key = ListKey::new(S::KIND, scope.clone());
        let _permit = self.queue.acquire(&key).await?;

        // Snapshot is taken under the permit so a queued batch sees the
        // order left by the one before it
        let snapshot = self.list(scope).await?;
        let batch = reindex(snapshot.as_slice(), source_id, target_id);
        if batch.is_empty() {
            return Ok(ReorderOutcome::Unchanged);
        }

        tracing::info!(
            kind = %S::KIND,
            scope = %scope,
            source_id,
            target_id,
            writes = batch.updates.len(),
            "Reordering list"
        );

        let result = SortOrderSync::new(self.store.as_ref())
            .apply(scope, &batch.updates)
            .await;

        self.cache.invalidate(scope);
        let refetched = match self.cache.load(self.store.as_ref(), scope).await {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(kind = %S::KIND, scope = %scope, error = %e, "Refetch after reorder failed");
                None
            }
        };

        let report = result?;
        // Prefer the server's order; fall back to the computed one
        let items = match refetched {
            Some(items) => items.as_ref().clone(),
            None => batch.items,
        };
        Ok(ReorderOutcome::Applied {
            written: report.applied,
            items,
        })
    }

    /// Complete the drag tracked by `session` by dropping onto `target_id`
    pub async fn drop_on(
        &self,
        session: &mut DragSession,
        scope: &ListScope,
        target_id: &str,
    ) -> ReorderResult<ReorderOutcome<S::Entity>> {
        let Some(intent) = session.drop_on(target_id) else {
            return Ok(ReorderOutcome::Unchanged);
        };
        self.reorder(scope, &intent.source_id, &intent.target_id).await
    }
}
