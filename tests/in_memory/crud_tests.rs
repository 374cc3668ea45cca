//! End-to-end task lifecycle tests over the in-memory store.

use super::helpers::{MemRepository, draft, repository};
use rstest::rstest;
use taskflow::domain::{Priority, TaskFilter, TaskPatch, TaskStatus, TaskTitle};
use taskflow::services::CollectionView;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_complete_query_and_delete_round_trip(repository: MemRepository) {
    let created = repository
        .create(draft("Buy milk").with_priority(Priority::Low))
        .await
        .expect("creation should succeed");

    let all = repository.get_all().await.expect("read should succeed");
    assert_eq!(all.len(), 1);
    let listed = all.first().expect("created task listed");
    assert_eq!(listed.id(), created.id());
    assert!(!listed.completed());
    assert_eq!(listed.priority(), Priority::Low);
    assert_eq!(listed.sort_order(), 1);

    let completed = repository
        .update(created.id(), TaskPatch::new().with_completed(true))
        .await
        .expect("update should succeed");
    assert!(completed.completed_at().is_some());

    let done = repository
        .get_by_status(TaskStatus::Completed)
        .await
        .expect("query should succeed");
    assert!(done.iter().any(|task| task.id() == created.id()));

    repository
        .delete(created.id())
        .await
        .expect("delete should succeed");
    assert!(
        repository
            .get_all()
            .await
            .expect("read should succeed")
            .is_empty()
    );
    assert!(
        repository
            .get_by_status(TaskStatus::Completed)
            .await
            .expect("query should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_title_and_priority_persists(repository: MemRepository) {
    let created = repository
        .create(draft("Draught title"))
        .await
        .expect("creation should succeed");

    let title = TaskTitle::new("Final title").expect("valid title");
    repository
        .update(
            created.id(),
            TaskPatch::new()
                .with_title(title)
                .with_priority(Priority::High),
        )
        .await
        .expect("update should succeed");

    let reread = repository
        .get_by_id(created.id())
        .await
        .expect("lookup should succeed")
        .expect("task still present");
    assert_eq!(reread.title().as_str(), "Final title");
    assert_eq!(reread.priority(), Priority::High);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn view_derivation_over_repository_reads(repository: MemRepository) {
    repository
        .create(draft("Pay rent").with_priority(Priority::High))
        .await
        .expect("creation should succeed");
    let groceries = repository
        .create(draft("Plan groceries").with_priority(Priority::Low))
        .await
        .expect("creation should succeed");
    repository
        .update(groceries.id(), TaskPatch::new().with_completed(true))
        .await
        .expect("update should succeed");

    let all = repository.get_all().await.expect("read should succeed");
    let view = CollectionView::derive(&all, "plan", TaskFilter::All);

    assert_eq!(view.tasks().len(), 1);
    assert_eq!(view.counts().all, 2);
    assert_eq!(view.counts().completed, 1);
    assert_eq!(view.counts().high, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_results_follow_display_order(repository: MemRepository) {
    for title in ["Email accountant", "Email plumber", "Walk the dog"] {
        repository
            .create(draft(title))
            .await
            .expect("creation should succeed");
    }

    let found = repository
        .search("email")
        .await
        .expect("search should succeed");
    let titles: Vec<&str> = found.iter().map(|task| task.title().as_str()).collect();
    assert_eq!(titles, vec!["Email accountant", "Email plumber"]);
}
