//! Menu Category Model

use serde::{Deserialize, Serialize};

use super::Sortable;

/// Menu category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: String,
    /// Owning restaurant (parent scope of the category order)
    pub restaurant_id: String,
    pub name: String,
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Sortable for MenuCategory {
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
