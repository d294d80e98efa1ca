//! List cache
//!
//! Local copies of ordered lists, one per scope. The server stays the source
//! of truth: writes invalidate the scope and the next read refetches.

use std::sync::Arc;

use dashmap::DashMap;
use shared::Sortable;

use crate::ClientResult;
use crate::store::{ListScope, SortOrderStore};

#[derive(Debug)]
struct CachedList<T> {
    items: Arc<Vec<T>>,
    stale: bool,
}

/// Per-scope cache of ordered lists
#[derive(Debug)]
pub struct ListCache<T> {
    lists: DashMap<ListScope, CachedList<T>>,
}

impl<T> Default for ListCache<T> {
    fn default() -> Self {
        Self {
            lists: DashMap::new(),
        }
    }
}

impl<T: Sortable + Clone> ListCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached list for a scope, stale or not
    pub fn get(&self, scope: &ListScope) -> Option<Arc<Vec<T>>> {
        self.lists.get(scope).map(|entry| Arc::clone(&entry.items))
    }

    pub fn is_fresh(&self, scope: &ListScope) -> bool {
        self.lists.get(scope).is_some_and(|entry| !entry.stale)
    }

    /// Store a list, sorted ascending by sort order
    pub fn insert(&self, scope: ListScope, mut items: Vec<T>) -> Arc<Vec<T>> {
        items.sort_by_key(|item| item.sort_order());
        let items = Arc::new(items);
        self.lists.insert(
            scope,
            CachedList {
                items: Arc::clone(&items),
                stale: false,
            },
        );
        items
    }

    /// Mark a scope stale. Returns false if nothing was cached.
    pub fn invalidate(&self, scope: &ListScope) -> bool {
        match self.lists.get_mut(scope) {
            Some(mut entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }

    /// Cached list if fresh, otherwise fetch it from the store
    pub async fn load<S>(&self, store: &S, scope: &ListScope) -> ClientResult<Arc<Vec<T>>>
    where
        S: SortOrderStore<Entity = T>,
    {
        if let Some(entry) = self.lists.get(scope)
            && !entry.stale
        {
            return Ok(Arc::clone(&entry.items));
        }

        tracing::debug!(kind = %S::KIND, scope = %scope, "Refetching list");
        let items = store.fetch(scope).await?;
        Ok(self.insert(scope.clone(), items))
    }

    /// Apply a local change ahead of the server
    ///
    /// The entry keeps its freshness. Returns false if nothing is cached for
    /// the scope.
    pub fn update_with<F>(&self, scope: &ListScope, f: F) -> bool
    where
        F: FnOnce(&mut Vec<T>),
    {
        let Some(mut entry) = self.lists.get_mut(scope) else {
            return false;
        };
        let mut next = (*entry.items).clone();
        f(&mut next);
        entry.items = Arc::new(next);
        true
    }
}
