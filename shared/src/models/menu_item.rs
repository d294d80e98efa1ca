//! Menu Item Model

use serde::{Deserialize, Serialize};

use super::Sortable;

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    /// Category reference (parent scope of the item order)
    pub category_id: String,
    pub name: String,
    pub price: f64,
    pub sort_order: i32,
    /// Whether the item can currently be ordered
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

impl Sortable for MenuItem {
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

/// Update availability payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemAvailability {
    pub is_available: bool,
}
