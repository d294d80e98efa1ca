//! Per-list batch queue
//!
//! At most one reorder batch runs against a list at a time. A second batch
//! on the same list either waits its turn or is turned away, depending on
//! [`OverlapPolicy`]. Different lists never block each other.

use std::str::FromStr;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{ReorderError, ReorderResult};
use crate::store::{EntityKind, ListScope};

/// Behavior when a batch starts while another one is running on the same list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Wait for the running batch, then reorder against the refreshed list
    #[default]
    Serialize,
    /// Fail fast with [`ReorderError::Busy`]
    Reject,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serialize" => Ok(OverlapPolicy::Serialize),
            "reject" => Ok(OverlapPolicy::Reject),
            other => Err(format!("unknown overlap policy: {other}")),
        }
    }
}

/// Identifies one ordered list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub kind: EntityKind,
    pub scope: ListScope,
}

impl ListKey {
    pub fn new(kind: EntityKind, scope: ListScope) -> Self {
        Self { kind, scope }
    }
}

type Slots = DashMap<ListKey, Arc<Mutex<()>>>;

/// Held for the duration of one batch; dropping it lets the next one run
#[derive(Debug)]
pub struct BatchPermit {
    guard: Option<OwnedMutexGuard<()>>,
    slots: Arc<Slots>,
    key: ListKey,
}

impl Drop for BatchPermit {
    fn drop(&mut self) {
        self.guard.take();
        release_slot(&self.slots, &self.key);
    }
}

/// Drop the slot once only the map still holds it
fn release_slot(slots: &Slots, key: &ListKey) {
    slots.remove_if(key, |_, slot| Arc::strong_count(slot) == 1);
}

/// Ordered-task queue keyed by list
///
/// A slot lives only while a batch holds it or waits on it.
#[derive(Debug, Default)]
pub struct BatchQueue {
    slots: Arc<Slots>,
    policy: OverlapPolicy,
}

impl BatchQueue {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    fn slot(&self, key: &ListKey) -> Arc<Mutex<()>> {
        Arc::clone(
            self.slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    /// Wait (or refuse, per policy) until the list is free
    ///
    /// Waiters are served in arrival order.
    pub async fn acquire(&self, key: &ListKey) -> ReorderResult<BatchPermit> {
        let slot = self.slot(key);

        let guard = match self.policy {
            OverlapPolicy::Serialize => slot.lock_owned().await,
            OverlapPolicy::Reject => match slot.try_lock_owned() {
                Ok(guard) => guard,
                Err(_) => {
                    // The holder may have released in between
                    release_slot(&self.slots, key);
                    tracing::debug!(kind = %key.kind, scope = %key.scope, "Reorder rejected, list busy");
                    return Err(ReorderError::Busy {
                        scope: key.scope.to_string(),
                    });
                }
            },
        };

        Ok(BatchPermit {
            guard: Some(guard),
            slots: Arc::clone(&self.slots),
            key: key.clone(),
        })
    }

    /// Whether a batch currently holds the list
    pub fn is_busy(&self, key: &ListKey) -> bool {
        self.slots
            .get(key)
            .is_some_and(|slot| slot.try_lock().is_err())
    }
}
