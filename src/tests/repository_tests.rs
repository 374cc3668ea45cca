//! Repository service tests over the in-memory store.

use std::sync::Arc;

use crate::adapters::memory::InMemoryTaskStore;
use crate::domain::{NewTask, Priority, TaskId, TaskPatch, TaskStatus, TaskTitle};
use crate::services::{TaskRepository, TaskRepositoryError};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestRepository = TaskRepository<InMemoryTaskStore, DefaultClock>;

#[fixture]
fn repository() -> TestRepository {
    TaskRepository::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock))
}

fn draft(title: &str) -> NewTask {
    NewTask::new(TaskTitle::new(title).expect("valid title"))
}

async fn seed(repository: &TestRepository, titles: &[&str]) -> Vec<TaskId> {
    let mut ids = Vec::with_capacity(titles.len());
    for title in titles {
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
async fn create_assigns_identity_and_sequential_order(repository: TestRepository) {
    let first = repository
        .create(draft("First"))
        .await
        .expect("creation should succeed");
    let second = repository
        .create(draft("Second"))
        .await
        .expect("creation should succeed");

    assert_eq!(first.sort_order(), 1);
    assert_eq!(second.sort_order(), 2);
    assert_ne!(first.id(), second.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_one_past_the_maximum_order(repository: TestRepository) {
    repository
        .create(draft("Sparse").with_sort_order(41))
        .await
        .expect("creation should succeed");

    let next = repository
        .create(draft("Dense"))
        .await
        .expect("creation should succeed");
    assert_eq!(next.sort_order(), 42);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_id_returns_none_for_unknown_identity(repository: TestRepository) {
    let found = repository
        .get_by_id(TaskId::new(404))
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_completion_derives_the_timestamp_both_ways(repository: TestRepository) {
    let ids = seed(&repository, &["Buy milk"]).await;
    let id = ids.first().copied().expect("seeded task");

    let completed = repository
        .update(id, TaskPatch::new().with_completed(true))
        .await
        .expect("update should succeed");
    assert!(completed.completed_at().is_some());

    let reopened = repository
        .update(id, TaskPatch::new().with_completed(false))
        .await
        .expect("update should succeed");
    assert!(reopened.completed_at().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_identity_is_not_found(repository: TestRepository) {
    let result = repository
        .update(TaskId::new(7), TaskPatch::new().with_completed(true))
        .await;
    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_and_repeat_delete_is_not_found(repository: TestRepository) {
    let ids = seed(&repository, &["Ephemeral"]).await;
    let id = ids.first().copied().expect("seeded task");

    repository.delete(id).await.expect("delete should succeed");
    let all = repository.get_all().await.expect("read should succeed");
    assert!(all.is_empty());

    let repeat = repository.delete(id).await;
    assert!(matches!(repeat, Err(TaskRepositoryError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_order_reassigns_positions_and_resorts(repository: TestRepository) {
    let ids = seed(&repository, &["One", "Two", "Three"]).await;
    let (first, second, third) = match ids.as_slice() {
        [a, b, c] => (*a, *b, *c),
        _ => panic!("expected three seeded tasks"),
    };

    let reordered = repository
        .update_order(&[third, first, second])
        .await
        .expect("reorder should succeed");

    let sequence: Vec<TaskId> = reordered.iter().map(|task| task.id()).collect();
    assert_eq!(sequence, vec![third, first, second]);
    let orders: Vec<i64> = reordered.iter().map(|task| task.sort_order()).collect();
    assert_eq!(orders, vec![1, 2, 3]);

    let reread = repository.get_all().await.expect("read should succeed");
    let reread_sequence: Vec<TaskId> = reread.iter().map(|task| task.id()).collect();
    assert_eq!(reread_sequence, vec![third, first, second]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_order_tolerates_stale_and_missing_ids(repository: TestRepository) {
    let ids = seed(&repository, &["Kept", "Untouched"]).await;
    let kept = ids.first().copied().expect("seeded task");
    let untouched = ids.get(1).copied().expect("seeded task");

    let reordered = repository
        .update_order(&[TaskId::new(999), kept])
        .await
        .expect("reorder should succeed");

    let kept_task = reordered
        .iter()
        .find(|task| task.id() == kept)
        .expect("kept task present");
    assert_eq!(kept_task.sort_order(), 2);

    let untouched_task = reordered
        .iter()
        .find(|task| task.id() == untouched)
        .expect("untouched task present");
    assert_eq!(untouched_task.sort_order(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_and_whitespace_searches_match_get_all(repository: TestRepository) {
    seed(&repository, &["Alpha", "Beta"]).await;

    let all = repository.get_all().await.expect("read should succeed");
    let blank = repository.search("").await.expect("search should succeed");
    let spaced = repository
        .search("   ")
        .await
        .expect("search should succeed");

    assert_eq!(blank, all);
    assert_eq!(spaced, all);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_title_and_description_case_insensitively(repository: TestRepository) {
    repository
        .create(draft("Write RELEASE notes"))
        .await
        .expect("creation should succeed");
    repository
        .create(draft("Walk the dog").with_description("before the release window"))
        .await
        .expect("creation should succeed");
    repository
        .create(draft("Unrelated"))
        .await
        .expect("creation should succeed");

    let found = repository
        .search("release")
        .await
        .expect("search should succeed");
    assert_eq!(found.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_and_priority_queries_filter_the_ordered_collection(repository: TestRepository) {
    let urgent = repository
        .create(draft("Urgent").with_priority(Priority::High))
        .await
        .expect("creation should succeed");
    let ids = seed(&repository, &["Routine"]).await;
    let routine = ids.first().copied().expect("seeded task");

    repository
        .update(routine, TaskPatch::new().with_completed(true))
        .await
        .expect("update should succeed");

    let completed = repository
        .get_by_status(TaskStatus::Completed)
        .await
        .expect("query should succeed");
    assert_eq!(completed.len(), 1);
    assert!(completed.iter().all(|task| task.id() == routine));

    let pending = repository
        .get_by_status(TaskStatus::Pending)
        .await
        .expect("query should succeed");
    assert_eq!(pending.len(), 1);

    let high = repository
        .get_by_priority(Priority::High)
        .await
        .expect("query should succeed");
    assert_eq!(high.len(), 1);
    assert!(high.iter().all(|task| task.id() == urgent.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_copies_content_under_a_fresh_identity(repository: TestRepository) {
    let source = repository
        .create(
            draft("Prepare talk")
                .with_description("slides and a demo")
                .with_priority(Priority::High),
        )
        .await
        .expect("creation should succeed");
    repository
        .update(source.id(), TaskPatch::new().with_completed(true))
        .await
        .expect("update should succeed");

    let copy = repository
        .duplicate(source.id())
        .await
        .expect("duplication should succeed");

    assert_eq!(copy.title().as_str(), "Copy of Prepare talk");
    assert_eq!(copy.description(), "slides and a demo");
    assert_eq!(copy.priority(), Priority::High);
    assert!(!copy.completed());
    assert_ne!(copy.id(), source.id());
    assert_eq!(copy.sort_order(), source.sort_order() + 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_of_unknown_identity_is_not_found(repository: TestRepository) {
    let result = repository.duplicate(TaskId::new(12)).await;
    assert!(matches!(result, Err(TaskRepositoryError::NotFound(_))));
}
