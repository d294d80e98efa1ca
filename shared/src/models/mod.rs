//! Data models
//!
//! Shared between the menu API and its clients.
//! All IDs are server-assigned strings.

pub mod category;
pub mod menu_item;
pub mod ordering;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use ordering::*;
