//! Ordered list stores
//!
//! A [`SortOrderStore`] is the remote side of a reorderable list: it returns
//! the authoritative list for a scope and persists one sort key at a time.

use std::fmt;

use async_trait::async_trait;
use shared::{MenuCategory, MenuItem, MenuItemAvailability, Sortable, SortOrderPayload};

use crate::{ClientResult, HttpClient};

/// Kind of list being ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    MenuItem,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Category => write!(f, "category"),
            EntityKind::MenuItem => write!(f, "menu_item"),
        }
    }
}

/// Parent scope identifier (restaurant id for categories, category id for items)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListScope(String);

impl ListScope {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListScope {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ListScope {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Remote store of an ordered list
#[async_trait]
pub trait SortOrderStore: Send + Sync {
    type Entity: Sortable + Clone + Send + Sync + 'static;

    const KIND: EntityKind;

    /// Fetch the authoritative list for a scope, ascending by sort order
    async fn fetch(&self, scope: &ListScope) -> ClientResult<Vec<Self::Entity>>;

    /// Persist the sort key of a single entity
    async fn update_sort_order(
        &self,
        scope: &ListScope,
        entity_id: &str,
        sort_order: i32,
    ) -> ClientResult<Self::Entity>;
}

// =========================================================================
// Categories
// =========================================================================

/// Categories of one restaurant; the scope is the restaurant id
#[derive(Debug, Clone)]
pub struct CategoryStore {
    http: HttpClient,
}

impl CategoryStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SortOrderStore for CategoryStore {
    type Entity = MenuCategory;

    const KIND: EntityKind = EntityKind::Category;

    async fn fetch(&self, scope: &ListScope) -> ClientResult<Vec<MenuCategory>> {
        let mut categories: Vec<MenuCategory> = self
            .http
            .get(&format!("/api/restaurants/{}/categories", scope))
            .await?;
        categories.sort_by_key(|c| c.sort_order);
        Ok(categories)
    }

    async fn update_sort_order(
        &self,
        scope: &ListScope,
        entity_id: &str,
        sort_order: i32,
    ) -> ClientResult<MenuCategory> {
        self.http
            .put(
                &format!("/api/restaurants/{}/categories/{}/sort-order", scope, entity_id),
                &SortOrderPayload { sort_order },
            )
            .await
    }
}

// =========================================================================
// Menu items
// =========================================================================

/// Items of one restaurant; the scope is the category id
#[derive(Debug, Clone)]
pub struct MenuItemStore {
    http: HttpClient,
    restaurant_id: String,
}

impl MenuItemStore {
    pub fn new(http: HttpClient, restaurant_id: impl Into<String>) -> Self {
        Self {
            http,
            restaurant_id: restaurant_id.into(),
        }
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    /// Mark an item available or unavailable
    pub async fn set_availability(&self, item_id: &str, is_available: bool) -> ClientResult<MenuItem> {
        self.http
            .put(
                &format!(
                    "/api/restaurants/{}/menu-items/{}/availability",
                    self.restaurant_id, item_id
                ),
                &MenuItemAvailability { is_available },
            )
            .await
    }
}

#[async_trait]
impl SortOrderStore for MenuItemStore {
    type Entity = MenuItem;

    const KIND: EntityKind = EntityKind::MenuItem;

    async fn fetch(&self, scope: &ListScope) -> ClientResult<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = self
            .http
            .get(&format!(
                "/api/restaurants/{}/categories/{}/items",
                self.restaurant_id, scope
            ))
            .await?;
        items.sort_by_key(|i| i.sort_order);
        Ok(items)
    }

    // The update endpoint is keyed by restaurant, not by category
    async fn update_sort_order(
        &self,
        _scope: &ListScope,
        entity_id: &str,
        sort_order: i32,
    ) -> ClientResult<MenuItem> {
        self.http
            .put(
                &format!(
                    "/api/restaurants/{}/menu-items/{}/sort-order",
                    self.restaurant_id, entity_id
                ),
                &SortOrderPayload { sort_order },
            )
            .await
    }
}
