// menu-client/tests/reorder_flow.rs
// 拖拽排序集成测试 (in-memory store)

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use menu_client::reorder::SortOrderSync;
use menu_client::{
    ClientError, ClientResult, DragSession, EntityKind, ListScope, OrderedEntity, OverlapPolicy,
    ReorderController, ReorderError, ReorderOutcome, SortOrderStore, SortOrderUpdate,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Start(String),
    Done(String),
}

/// Server stand-in holding one list per scope
#[derive(Default)]
struct MemoryStore {
    lists: Mutex<HashMap<String, Vec<OrderedEntity>>>,
    calls: Mutex<Vec<Call>>,
    writes: Mutex<Vec<SortOrderUpdate>>,
    fail_on: Mutex<Option<String>>,
    ignore: Mutex<Option<String>>,
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
}

impl MemoryStore {
    fn with_list(scope: &str, keys: &[(&str, i32)]) -> Self {
        let store = Self::default();
        store.seed(scope, keys);
        store
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn seed(&self, scope: &str, keys: &[(&str, i32)]) {
        let list = keys
            .iter()
            .map(|(id, sort_order)| OrderedEntity::new(*id, *sort_order, scope))
            .collect();
        self.lists.lock().unwrap().insert(scope.to_string(), list);
    }

    fn fail_on(&self, id: &str) {
        *self.fail_on.lock().unwrap() = Some(id.to_string());
    }

    /// Acknowledge writes for `id` without applying them
    fn ignore(&self, id: &str) {
        *self.ignore.lock().unwrap() = Some(id.to_string());
    }

    /// Server-side order as `(id, sort_order)`, ascending
    fn server_order(&self, scope: &str) -> Vec<(String, i32)> {
        let mut list = self.lists.lock().unwrap().get(scope).cloned().unwrap_or_default();
        list.sort_by_key(|e| e.sort_order);
        list.into_iter().map(|e| (e.id, e.sort_order)).collect()
    }

    fn writes(&self) -> Vec<SortOrderUpdate> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SortOrderStore for MemoryStore {
    type Entity = OrderedEntity;

    const KIND: EntityKind = EntityKind::MenuItem;

    async fn fetch(&self, scope: &ListScope) -> ClientResult<Vec<OrderedEntity>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let mut list = self
            .lists
            .lock()
            .unwrap()
            .get(scope.as_str())
            .cloned()
            .ok_or_else(|| ClientError::NotFound(scope.to_string()))?;
        list.sort_by_key(|e| e.sort_order);
        Ok(list)
    }

    async fn update_sort_order(
        &self,
        scope: &ListScope,
        entity_id: &str,
        sort_order: i32,
    ) -> ClientResult<OrderedEntity> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(Call::Start(entity_id.to_string()));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        let result = if self.fail_on.lock().unwrap().as_deref() == Some(entity_id) {
            Err(ClientError::Internal("write rejected".into()))
        } else if self.ignore.lock().unwrap().as_deref() == Some(entity_id) {
            Ok(OrderedEntity::new(entity_id, sort_order, scope.as_str()))
        } else {
            let mut lists = self.lists.lock().unwrap();
            lists
                .get_mut(scope.as_str())
                .and_then(|list| list.iter_mut().find(|e| e.id == entity_id))
                .map(|entity| {
                    entity.sort_order = sort_order;
                    entity.clone()
                })
                .ok_or_else(|| ClientError::NotFound(entity_id.to_string()))
        };

        if result.is_ok() {
            self.writes
                .lock()
                .unwrap()
                .push(SortOrderUpdate::new(entity_id, sort_order));
        }
        self.calls.lock().unwrap().push(Call::Done(entity_id.to_string()));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn ids(items: &[OrderedEntity]) -> Vec<&str> {
    items.iter().map(|e| e.id.as_str()).collect()
}

fn abcd() -> MemoryStore {
    MemoryStore::with_list("cat-1", &[("A", 0), ("B", 10), ("C", 20), ("D", 30)])
}

#[tokio::test]
async fn test_drag_a_onto_c() {
    let controller = ReorderController::new(abcd(), OverlapPolicy::Serialize);
    let scope = ListScope::from("cat-1");

    let outcome = controller.reorder(&scope, "A", "C").await.unwrap();

    let ReorderOutcome::Applied { written, items } = outcome else {
        panic!("expected writes");
    };
    assert_eq!(written, 3);
    assert_eq!(ids(&items), vec!["B", "C", "A", "D"]);

    let store = controller.store();
    assert_eq!(
        store.writes(),
        vec![
            SortOrderUpdate::new("B", 0),
            SortOrderUpdate::new("C", 10),
            SortOrderUpdate::new("A", 20),
        ]
    );
    assert_eq!(
        store.server_order("cat-1"),
        vec![
            ("B".to_string(), 0),
            ("C".to_string(), 10),
            ("A".to_string(), 20),
            ("D".to_string(), 30),
        ]
    );

    // Initial load + refetch after the batch
    assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
    assert!(controller.cache().is_fresh(&scope));
    let cached = controller.cache().get(&scope).unwrap();
    assert_eq!(ids(&cached), vec!["B", "C", "A", "D"]);
}

#[tokio::test]
async fn test_applied_items_come_from_refetch() {
    let store = abcd();
    store.ignore("A");
    let controller = ReorderController::new(store, OverlapPolicy::Serialize);
    let scope = ListScope::from("cat-1");

    let outcome = controller.reorder(&scope, "A", "C").await.unwrap();

    let ReorderOutcome::Applied { written, items } = outcome else {
        panic!("expected writes");
    };
    assert_eq!(written, 3);
    // Server kept A at 0, so it still sorts first
    assert_eq!(ids(&items), vec!["A", "B", "C", "D"]);
    let cached = controller.cache().get(&scope).unwrap();
    assert_eq!(ids(&cached), ids(&items));
}

#[tokio::test]
async fn test_writes_are_sequential() {
    let store = abcd().with_delay(Duration::from_millis(5));
    let scope = ListScope::from("cat-1");
    let updates = vec![
        SortOrderUpdate::new("D", 0),
        SortOrderUpdate::new("A", 10),
        SortOrderUpdate::new("B", 20),
        SortOrderUpdate::new("C", 30),
    ];

    let report = SortOrderSync::new(&store).apply(&scope, &updates).await.unwrap();

    assert_eq!(report.applied, 4);
    assert_eq!(store.max_in_flight.load(Ordering::SeqCst), 1);
    let calls = store.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            Call::Start("D".into()),
            Call::Done("D".into()),
            Call::Start("A".into()),
            Call::Done("A".into()),
            Call::Start("B".into()),
            Call::Done("B".into()),
            Call::Start("C".into()),
            Call::Done("C".into()),
        ]
    );
}

#[tokio::test]
async fn test_empty_batch_sends_nothing() {
    let store = abcd();
    let report = SortOrderSync::new(&store)
        .apply(&ListScope::from("cat-1"), &[])
        .await
        .unwrap();

    assert_eq!(report.applied, 0);
    assert!(store.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_write_abandons_rest_of_batch() {
    let store = abcd();
    store.fail_on("C");
    let controller = ReorderController::new(store, OverlapPolicy::Serialize);
    let scope = ListScope::from("cat-1");

    let mut session = DragSession::new();
    session.begin("A");
    let err = controller.drop_on(&mut session, &scope, "C").await.unwrap_err();

    match err {
        ReorderError::Sync {
            entity_id,
            applied,
            abandoned,
            source,
        } => {
            assert_eq!(entity_id, "C");
            assert_eq!(applied, 1);
            assert_eq!(abandoned, 1);
            assert!(matches!(source, ClientError::Internal(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // Session is released even though the batch failed
    assert!(!session.is_dragging());

    let store = controller.store();
    // B went through and stays; A was never sent
    assert_eq!(store.writes(), vec![SortOrderUpdate::new("B", 0)]);
    assert!(!store.calls.lock().unwrap().contains(&Call::Start("A".into())));

    // Cache reflects the server, not the attempted permutation
    assert_eq!(store.fetches.load(Ordering::SeqCst), 2);
    let cached = controller.cache().get(&scope).unwrap();
    let server: Vec<_> = store.server_order("cat-1").into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids(&cached), server.iter().map(String::as_str).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_self_drop_and_unknown_ids_are_noops() {
    let controller = ReorderController::new(abcd(), OverlapPolicy::Serialize);
    let scope = ListScope::from("cat-1");

    let mut session = DragSession::new();
    session.begin("B");
    let outcome = controller.drop_on(&mut session, &scope, "B").await.unwrap();
    assert!(outcome.is_unchanged());
    assert!(session.is_dragging());

    let outcome = controller.reorder(&scope, "B", "gone").await.unwrap();
    assert!(outcome.is_unchanged());
    let outcome = controller.reorder(&scope, "gone", "B").await.unwrap();
    assert!(outcome.is_unchanged());

    let store = controller.store();
    assert!(store.writes().is_empty());
    // Only the snapshot load, no refetch for a no-op
    assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_drop_without_drag_does_nothing() {
    let controller = ReorderController::new(abcd(), OverlapPolicy::Serialize);
    let mut session = DragSession::new();

    let outcome = controller
        .drop_on(&mut session, &ListScope::from("cat-1"), "C")
        .await
        .unwrap();

    assert!(outcome.is_unchanged());
    assert_eq!(controller.store().fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_list_reports_fetch_error() {
    let controller = ReorderController::new(abcd(), OverlapPolicy::Serialize);

    let err = controller
        .reorder(&ListScope::from("cat-404"), "A", "B")
        .await
        .unwrap_err();

    assert!(matches!(err, ReorderError::Fetch { ref scope, .. } if scope == "cat-404"));
}

#[tokio::test]
async fn test_overlapping_batches_are_serialized() {
    let store = abcd().with_delay(Duration::from_millis(5));
    let controller = ReorderController::new(store, OverlapPolicy::Serialize);
    let scope = ListScope::from("cat-1");

    let (first, second) = tokio::join!(
        controller.reorder(&scope, "A", "C"),
        controller.reorder(&scope, "D", "B"),
    );

    assert!(!first.unwrap().is_unchanged());
    // Second batch was computed against [B, C, A, D]
    let ReorderOutcome::Applied { items, .. } = second.unwrap() else {
        panic!("expected writes");
    };
    assert_eq!(ids(&items), vec!["D", "B", "C", "A"]);

    let store = controller.store();
    assert_eq!(store.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(
        store.server_order("cat-1"),
        vec![
            ("D".to_string(), 0),
            ("B".to_string(), 10),
            ("C".to_string(), 20),
            ("A".to_string(), 30),
        ]
    );
}

#[tokio::test]
async fn test_overlapping_batch_rejected() {
    let store = abcd().with_delay(Duration::from_millis(20));
    let controller = ReorderController::new(store, OverlapPolicy::Reject);
    let scope = ListScope::from("cat-1");

    let (first, second) = tokio::join!(controller.reorder(&scope, "A", "C"), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        controller.reorder(&scope, "D", "B").await
    });

    assert!(!first.unwrap().is_unchanged());
    assert!(matches!(second, Err(ReorderError::Busy { ref scope }) if scope == "cat-1"));

    // Only the first batch reached the server
    assert_eq!(controller.store().writes().len(), 3);
}

#[tokio::test]
async fn test_separate_lists_run_concurrently() {
    let store = abcd().with_delay(Duration::from_millis(10));
    store.seed("cat-2", &[("X", 0), ("Y", 10)]);
    let controller = ReorderController::new(store, OverlapPolicy::Serialize);
    let cat1 = ListScope::from("cat-1");
    let cat2 = ListScope::from("cat-2");

    let (first, second) = tokio::join!(
        controller.reorder(&cat1, "A", "B"),
        controller.reorder(&cat2, "Y", "X"),
    );

    assert!(!first.unwrap().is_unchanged());
    assert!(!second.unwrap().is_unchanged());
    assert_eq!(controller.store().max_in_flight.load(Ordering::SeqCst), 2);
    assert_eq!(
        controller.store().server_order("cat-2"),
        vec![("Y".to_string(), 0), ("X".to_string(), 10)]
    );
}
