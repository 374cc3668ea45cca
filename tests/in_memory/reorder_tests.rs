//! Drag-to-reorder gestures against persisted order.

use super::helpers::{MemRepository, draft, repository};
use rstest::rstest;
use std::sync::Arc;
use taskflow::domain::TaskId;
use taskflow::services::{DragState, ReorderCoordinator, ReorderOutcome};

async fn seed_three(repository: &MemRepository) -> Vec<TaskId> {
    let mut ids = Vec::new();
    for title in ["One", "Two", "Three"] {
        let task = repository
            .create(draft(title))
            .await
            .expect("creation should succeed");
        ids.push(task.id());
    }
    ids
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_gesture_commits_and_order_survives_rereads(repository: MemRepository) {
    let repository = Arc::new(repository);
    let ids = seed_three(&repository).await;
    let (first, second, third) = match ids.as_slice() {
        [a, b, c] => (*a, *b, *c),
        _ => panic!("expected three seeded tasks"),
    };

    let mut coordinator = ReorderCoordinator::new(Arc::clone(&repository));
    coordinator.drag_start(third);
    coordinator.drag_enter(second);
    coordinator.drag_leave();
    coordinator.drag_enter(first);
    let outcome = coordinator
        .drop_on(first, &ids)
        .await
        .expect("drop should succeed");
    assert!(matches!(outcome, ReorderOutcome::Committed(_)));
    coordinator.drag_end();

    let reread = repository.get_all().await.expect("read should succeed");
    let sequence: Vec<TaskId> = reread.iter().map(|task| task.id()).collect();
    assert_eq!(sequence, vec![third, first, second]);

    let orders: Vec<i64> = reread.iter().map(|task| task.sort_order()).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_gesture_leaves_persisted_order_alone(repository: MemRepository) {
    let repository = Arc::new(repository);
    let ids = seed_three(&repository).await;
    let before = repository.get_all().await.expect("read should succeed");

    let mut coordinator = ReorderCoordinator::new(Arc::clone(&repository));
    coordinator.drag_start(ids.first().copied().expect("seeded task"));
    coordinator.drag_enter(ids.get(2).copied().expect("seeded task"));
    coordinator.drag_end();

    assert_eq!(coordinator.state(), &DragState::Idle);
    let after = repository.get_all().await.expect("read should succeed");
    assert_eq!(after, before);
}
