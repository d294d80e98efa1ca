//! Drag-and-drop reordering of menu lists
//!
//! - [`reindex`]: pure permutation + sort key assignment
//! - [`sync`]: sequential persistence of changed keys
//! - [`queue`]: one batch per list at a time
//! - [`session`]: per-list drag state
//! - [`controller`]: the pieces above wired to a store and cache

pub mod controller;
pub mod queue;
pub mod reindex;
pub mod session;
pub mod sync;

pub use controller::{ReorderController, ReorderOutcome};
pub use queue::{BatchPermit, BatchQueue, ListKey, OverlapPolicy};
pub use reindex::{ReorderBatch, reindex, renumber};
pub use session::{DragSession, DragState, DropIntent};
pub use sync::{SortOrderSync, SyncReport};
