//! Ordering Model
//!
//! Entities displayed in a user-defined order carry a persisted `sort_order`.
//! Within one parent scope the keys are unique and only their relative order
//! matters.

use serde::{Deserialize, Serialize};

/// Gap between consecutive sort keys after a renumber
pub const SORT_STEP: i32 = 10;

/// An entity that can be positioned inside an ordered list
pub trait Sortable {
    fn sort_id(&self) -> &str;
    fn sort_order(&self) -> i32;
    fn set_sort_order(&mut self, sort_order: i32);
}

/// Minimal ordered record (id + key + owning scope)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedEntity {
    pub id: String,
    pub sort_order: i32,
    /// Grouping entity the key is meaningful in (restaurant for categories,
    /// category for items)
    pub parent_scope: String,
}

impl OrderedEntity {
    pub fn new(id: impl Into<String>, sort_order: i32, parent_scope: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sort_order,
            parent_scope: parent_scope.into(),
        }
    }
}

impl Sortable for OrderedEntity {
    fn sort_id(&self) -> &str {
        &self.id
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }
}

/// One `(id, sort_order)` pair to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderUpdate {
    pub id: String,
    pub sort_order: i32,
}

impl SortOrderUpdate {
    pub fn new(id: impl Into<String>, sort_order: i32) -> Self {
        Self {
            id: id.into(),
            sort_order,
        }
    }
}

/// Request body of the sort-order endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderPayload {
    pub sort_order: i32,
}
