//! Menu Client - HTTP client and drag-and-drop reordering for the menu API
//!
//! Restaurant owners reorder menu categories and menu items by dragging them.
//! The server owns the order; this crate computes the new sort keys, writes
//! the changed ones back one request at a time and keeps a local cache of
//! each list in step with the server.

pub mod availability;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod reorder;
pub mod store;

pub use availability::{AvailabilityStore, set_item_availability};
pub use cache::ListCache;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ReorderError, ReorderResult};
pub use http::{AuthEvent, HttpClient};
pub use reorder::{
    DragSession, OverlapPolicy, ReorderBatch, ReorderController, ReorderOutcome, reindex, renumber,
};
pub use store::{CategoryStore, EntityKind, ListScope, MenuItemStore, SortOrderStore};

// Re-export shared types for convenience
pub use shared::{MenuCategory, MenuItem, OrderedEntity, SORT_STEP, Sortable, SortOrderUpdate};
