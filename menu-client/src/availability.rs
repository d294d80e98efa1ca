//! Menu item availability
//!
//! Unlike reordering, availability toggles are applied to the cached list
//! before the server answers and rolled back if the write fails.

use async_trait::async_trait;
use shared::MenuItem;

use crate::ClientResult;
use crate::cache::ListCache;
use crate::store::{ListScope, MenuItemStore};

/// Remote side of the availability toggle
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    async fn set_availability(&self, item_id: &str, is_available: bool) -> ClientResult<MenuItem>;
}

#[async_trait]
impl AvailabilityStore for MenuItemStore {
    async fn set_availability(&self, item_id: &str, is_available: bool) -> ClientResult<MenuItem> {
        MenuItemStore::set_availability(self, item_id, is_available).await
    }
}

/// Set an item's availability with an optimistic cache update
///
/// `category` is the cached list the item is shown in. On failure only the
/// item's flag is put back, so a list refetched while the write was in flight
/// keeps its order. The scope is invalidated either way.
pub async fn set_item_availability<S: AvailabilityStore + ?Sized>(
    store: &S,
    cache: &ListCache<MenuItem>,
    category: &ListScope,
    item_id: &str,
    is_available: bool,
) -> ClientResult<MenuItem> {
    let mut previous = None;
    cache.update_with(category, |items| {
        if let Some(item) = items.iter_mut().find(|item| item.id == item_id) {
            previous = Some(item.is_available);
            item.is_available = is_available;
        }
    });

    let result = store.set_availability(item_id, is_available).await;
    match &result {
        Ok(_) => tracing::info!(item_id, is_available, "Menu item availability updated"),
        Err(e) => {
            tracing::warn!(item_id, is_available, error = %e, "Availability update failed, rolling back");
            if let Some(previous) = previous {
                cache.update_with(category, |items| {
                    if let Some(item) = items.iter_mut().find(|item| item.id == item_id) {
                        item.is_available = previous;
                    }
                });
            }
        }
    }

    cache.invalidate(category);
    result
}
