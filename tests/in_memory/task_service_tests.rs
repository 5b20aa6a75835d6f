//! Service flows over the in-memory adapter.

use super::helpers::{TestService, service, user};
use crate::test_helpers::reference_now;
use chrono::Duration;
use rstest::rstest;
use todo_service::task::{
    domain::{TaskPayload, TaskStatus, TaskValidationError},
    services::TaskServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_round_trip(service: TestService) {
    let created = service
        .create(
            user(3),
            TaskPayload::new("Renew passport", "2026-11-01T09:00:00Z")
                .with_description("bring photos")
                .with_start_date("2026-10-20T09:00:00Z"),
        )
        .await
        .expect("task creation should succeed");

    let fetched = service
        .get(user(3), created.id)
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, created);
    assert_eq!(fetched.status, TaskStatus::InProgress);

    let updated = service
        .update(
            user(3),
            created.id,
            TaskPayload::new("Renew passport", "2026-11-01T09:00:00Z")
                .with_description("bring photos")
                .with_start_date("2026-10-20T09:00:00Z")
                .with_status("COMPLETED"),
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.status, TaskStatus::Completed);

    service
        .delete(user(3), created.id)
        .await
        .expect("delete should succeed");
    let listed = service.list(user(3)).await.expect("list should succeed");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_projects_each_task_at_read_time(service: TestService) {
    service
        .create(
            user(5),
            TaskPayload::new("started", "2026-10-20T00:00:00Z")
                .with_start_date("2026-10-01T00:00:00Z"),
        )
        .await
        .expect("task creation should succeed");
    service
        .create(
            user(5),
            TaskPayload::new("upcoming", "2026-10-30T00:00:00Z")
                .with_start_date("2026-10-25T00:00:00Z"),
        )
        .await
        .expect("task creation should succeed");

    let statuses: Vec<(String, TaskStatus)> = service
        .list(user(5))
        .await
        .expect("list should succeed")
        .into_iter()
        .map(|view| (view.title, view.status))
        .collect();

    assert_eq!(
        statuses,
        vec![
            ("started".to_owned(), TaskStatus::Pending),
            ("upcoming".to_owned(), TaskStatus::InProgress),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_without_start_date_resets_it_to_now(service: TestService) {
    let created = service
        .create(
            user(6),
            TaskPayload::new("T", "2026-10-30T00:00:00Z").with_start_date("2026-10-25T00:00:00Z"),
        )
        .await
        .expect("task creation should succeed");

    let updated = service
        .update(
            user(6),
            created.id,
            TaskPayload::new("T", "2026-10-30T00:00:00Z").with_status("IN_PROGRESS"),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.start_date, reference_now());
    assert_eq!(updated.end_date, reference_now() + Duration::hours(12 * 23));
}

#[rstest]
#[case(TaskPayload::new("T", "2026-10-17T00:00:00Z"), TaskValidationError::EndDateInPast)]
#[case(
    TaskPayload::new("T", "2026-10-20T00:00:00Z").with_start_date("2026-10-21T00:00:00Z"),
    TaskValidationError::StartAfterEnd
)]
#[case(TaskPayload::default(), TaskValidationError::InvalidEndDate)]
#[tokio::test(flavor = "multi_thread")]
async fn create_reports_first_failing_rule(
    service: TestService,
    #[case] payload: TaskPayload,
    #[case] expected: TaskValidationError,
) {
    let result = service.create(user(7), payload).await;

    assert!(matches!(result, Err(TaskServiceError::Validation(actual)) if actual == expected));
}
