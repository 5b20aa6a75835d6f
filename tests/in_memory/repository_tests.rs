//! Port contract tests for the in-memory task repository.

use super::helpers::{new_task, repo, user};
use crate::test_helpers::reference_now;
use chrono::Duration;
use rstest::rstest;
use todo_service::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskChanges, TaskId, TaskState},
    ports::TaskRepository,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_assigns_sequential_ids(repo: InMemoryTaskRepository) {
    let first = repo
        .insert(new_task(user(1), "a", 1))
        .await
        .expect("insert should succeed");
    let second = repo
        .insert(new_task(user(2), "b", 1))
        .await
        .expect("insert should succeed");

    assert_eq!(first.id(), TaskId::new(1));
    assert_eq!(second.id(), TaskId::new(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_is_scoped_to_owner(repo: InMemoryTaskRepository) {
    let stored = repo
        .insert(new_task(user(1), "a", 1))
        .await
        .expect("insert should succeed");

    let own = repo
        .find(user(1), stored.id())
        .await
        .expect("lookup should succeed");
    let foreign = repo
        .find(user(2), stored.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(own, Some(stored));
    assert_eq!(foreign, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_sorts_by_state_then_end_date_then_id(repo: InMemoryTaskRepository) {
    let later = repo
        .insert(new_task(user(1), "later", 5))
        .await
        .expect("insert should succeed");
    let tie_a = repo
        .insert(new_task(user(1), "tie a", 2))
        .await
        .expect("insert should succeed");
    let tie_b = repo
        .insert(new_task(user(1), "tie b", 2))
        .await
        .expect("insert should succeed");
    let completed = repo
        .insert(new_task(user(1), "completed", 9))
        .await
        .expect("insert should succeed");
    repo.update(
        user(1),
        completed.id(),
        TaskChanges {
            title: "completed".to_owned(),
            description: None,
            start_date: reference_now(),
            end_date: reference_now() + Duration::days(9),
            state: TaskState::Completed,
        },
    )
    .await
    .expect("update should succeed");
    repo.insert(new_task(user(2), "foreign", 1))
        .await
        .expect("insert should succeed");

    let ids: Vec<TaskId> = repo
        .list_for_user(user(1))
        .await
        .expect("list should succeed")
        .iter()
        .map(|task| task.id())
        .collect();

    assert_eq!(ids, vec![completed.id(), tie_a.id(), tie_b.id(), later.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_foreign_task_leaves_it_untouched(repo: InMemoryTaskRepository) {
    let stored = repo
        .insert(new_task(user(1), "mine", 1))
        .await
        .expect("insert should succeed");

    let result = repo
        .update(
            user(2),
            stored.id(),
            TaskChanges {
                title: "stolen".to_owned(),
                description: None,
                start_date: stored.start_date(),
                end_date: stored.end_date(),
                state: TaskState::Completed,
            },
        )
        .await
        .expect("update should succeed");
    let reloaded = repo
        .find(user(1), stored.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(result, None);
    assert_eq!(reloaded, Some(stored));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_whether_a_row_was_removed(repo: InMemoryTaskRepository) {
    let stored = repo
        .insert(new_task(user(1), "a", 1))
        .await
        .expect("insert should succeed");

    let foreign = repo
        .delete(user(2), stored.id())
        .await
        .expect("delete should succeed");
    let own = repo
        .delete(user(1), stored.id())
        .await
        .expect("delete should succeed");
    let again = repo
        .delete(user(1), stored.id())
        .await
        .expect("delete should succeed");

    assert!(!foreign);
    assert!(own);
    assert!(!again);
}
