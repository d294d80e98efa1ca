//! Shared types for the menu API
//!
//! Wire models, request payloads and the response envelope used by every
//! consumer of the restaurant menu API.

pub mod models;
pub mod response;

// Re-exports
pub use models::{
    MenuCategory, MenuItem, MenuItemAvailability, OrderedEntity, SORT_STEP, Sortable,
    SortOrderPayload, SortOrderUpdate,
};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
