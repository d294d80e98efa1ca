//! Drag session
//!
//! Tracks the entity currently being dragged within one list. Each list
//! (categories, items of a category) owns its own session.

/// Drag state of a single list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { source_id: String },
}

/// A completed drop, ready to be reindexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIntent {
    pub source_id: String,
    pub target_id: String,
}

/// `Idle -> Dragging(source) -> Idle`
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Id being dragged, if any
    pub fn source_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { source_id } => Some(source_id),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging an entity, replacing any previous drag
    pub fn begin(&mut self, source_id: impl Into<String>) {
        self.state = DragState::Dragging {
            source_id: source_id.into(),
        };
    }

    /// Drag ended without a drop
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Drop onto `target_id`
    ///
    /// A drop onto the dragged entity itself is ignored and keeps the drag
    /// alive. Any other drop returns the session to `Idle` before the caller
    /// processes it, so a failed reorder cannot leave the list stuck.
    pub fn drop_on(&mut self, target_id: &str) -> Option<DropIntent> {
        let DragState::Dragging { source_id } = &self.state else {
            return None;
        };
        if source_id == target_id {
            return None;
        }

        let DragState::Dragging { source_id } = std::mem::take(&mut self.state) else {
            return None;
        };
        Some(DropIntent {
            source_id,
            target_id: target_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_resets_to_idle() {
        let mut session = DragSession::new();
        session.begin("A");
        assert_eq!(session.source_id(), Some("A"));

        let intent = session.drop_on("C").unwrap();

        assert_eq!(intent.source_id, "A");
        assert_eq!(intent.target_id, "C");
        assert_eq!(session.state(), &DragState::Idle);
    }

    #[test]
    fn test_self_drop_keeps_dragging() {
        let mut session = DragSession::new();
        session.begin("A");

        assert!(session.drop_on("A").is_none());
        assert!(session.is_dragging());
        assert_eq!(session.source_id(), Some("A"));

        // The same drag can still complete elsewhere
        assert!(session.drop_on("B").is_some());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_drop_without_drag() {
        let mut session = DragSession::new();
        assert!(session.drop_on("A").is_none());
        assert_eq!(session.state(), &DragState::Idle);
    }

    #[test]
    fn test_end_cancels_drag() {
        let mut session = DragSession::new();
        session.begin("A");
        session.end();
        assert!(session.drop_on("B").is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut categories = DragSession::new();
        let mut items = DragSession::new();

        categories.begin("cat-1");
        items.begin("item-9");

        assert_eq!(categories.drop_on("cat-2").unwrap().source_id, "cat-1");
        assert_eq!(items.source_id(), Some("item-9"));
    }
}
