//! Handler tests for task routes.

use super::*;
use crate::domain::{ProjectSummary, UserId};
use crate::inbound::http::session::AUTH_TOKEN_HEADER;
use crate::inbound::http::test_utils::{ALICE_TOKEN, BOB_TOKEN, MockPorts, alice, bob, send};
use crate::test_support::fixture_now;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use chrono::TimeZone;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

fn task(owner: UserId, project: Option<ProjectId>) -> Task {
    let fields = TaskFields::try_new("t1", Some("details".into()), project, None, None)
        .expect("valid fields");
    Task::create(TaskId::random(), owner, fields, fixture_now())
}

fn as_alice(request: TestRequest) -> TestRequest {
    request.insert_header((AUTH_TOKEN_HEADER, ALICE_TOKEN))
}

#[actix_web::test]
async fn user_listing_joins_project_names() {
    let project = ProjectId::random();
    let named = task(alice(), Some(project));
    let dangling = task(alice(), Some(ProjectId::random()));
    let loose = task(alice(), None);
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_list_for_user()
        .with(eq(alice()))
        .return_once(move |_| {
            Ok(vec![
                TaskView {
                    task: named,
                    project: Some(ProjectSummary {
                        id: project,
                        name: "P1".into(),
                    }),
                },
                TaskView {
                    task: dangling,
                    project: None,
                },
                TaskView {
                    task: loose,
                    project: None,
                },
            ])
        });

    let (status, body) = send(ports, as_alice(TestRequest::get().uri("/api/tasks/user"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body[0]["project"],
        json!({ "id": project.to_string(), "name": "P1" })
    );
    assert!(body[1]["project"]["id"].is_string());
    assert!(body[1]["project"].get("name").is_none());
    assert_eq!(body[2]["project"], Value::Null);
    assert_eq!(body[0]["status"], "To Do");
}

#[actix_web::test]
async fn project_listing_with_unknown_id_is_empty() {
    let mut ports = MockPorts::default();
    ports.tasks.expect_list_for_project().never();

    let (status, body) = send(
        ports,
        as_alice(TestRequest::get().uri("/api/tasks/project/not-an-id")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn create_parses_reference_status_and_day() {
    let project = ProjectId::random();
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_create()
        .withf(move |caller, fields| {
            let due = Utc
                .with_ymd_and_hms(2024, 4, 1, 0, 0, 0)
                .single()
                .expect("valid date");
            caller == &alice()
                && fields.project == Some(project)
                && fields.status == TaskStatus::InProgress
                && fields.due_date == Some(due)
        })
        .return_once(|caller, fields| {
            Ok(Task::create(TaskId::random(), *caller, fields, fixture_now()))
        });

    let (status, body) = send(
        ports,
        as_alice(TestRequest::post().uri("/api/tasks")).set_json(json!({
            "title": "t1",
            "project": project.to_string(),
            "status": "In Progress",
            "dueDate": "2024-04-01",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["project"]["id"], project.to_string());
    assert_eq!(body["dueDate"], "2024-04-01T00:00:00Z");
}

#[actix_web::test]
async fn create_defaults_to_todo_without_project() {
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_create()
        .withf(|_, fields| fields.status == TaskStatus::ToDo && fields.project.is_none())
        .return_once(|caller, fields| {
            Ok(Task::create(TaskId::random(), *caller, fields, fixture_now()))
        });

    let (status, body) = send(
        ports,
        as_alice(TestRequest::post().uri("/api/tasks"))
            .set_json(json!({ "title": "t1", "project": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "To Do");
}

#[rstest]
#[case(json!({ "title": "" }), "title")]
#[case(json!({ "title": "t1", "status": "Blocked" }), "status")]
#[case(json!({ "title": "t1", "dueDate": "someday" }), "dueDate")]
#[case(json!({ "title": "t1", "project": "nope" }), "project")]
#[actix_web::test]
async fn create_rejects_bad_fields(#[case] payload: Value, #[case] field: &str) {
    let mut ports = MockPorts::default();
    ports.tasks.expect_create().never();

    let (status, body) = send(
        ports,
        as_alice(TestRequest::post().uri("/api/tasks")).set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn status_route_sends_status_only_patch() {
    let stored = task(alice(), None);
    let id = *stored.id();
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_update()
        .withf(move |_, target, patch| {
            target == &id && patch == &TaskPatch::status_only(TaskStatus::Done)
        })
        .return_once(move |_, _, patch| {
            let mut updated = stored;
            updated.apply(patch, fixture_now());
            Ok(updated)
        });

    let (status, body) = send(
        ports,
        as_alice(TestRequest::put().uri(&format!("/api/tasks/{id}/status")))
            .set_json(json!({ "status": "Done" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Done");
    assert_eq!(body["title"], "t1");
    assert_eq!(body["description"], "details");
}

#[actix_web::test]
async fn stranger_patch_is_not_authorized() {
    let id = TaskId::random();
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_update()
        .with(eq(bob()), eq(id), mockall::predicate::always())
        .return_once(|_, _, _| Err(Error::not_authorized("Not authorized")));

    let (status, body) = send(
        ports,
        TestRequest::patch()
            .uri(&format!("/api/tasks/{id}"))
            .insert_header((AUTH_TOKEN_HEADER, BOB_TOKEN))
            .set_json(json!({ "status": "Done" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized");
}

#[rstest]
#[case::patch(TestRequest::patch(), "", json!({ "status": "Bogus" }))]
#[case::mistyped(TestRequest::patch(), "", json!({ "title": 7 }))]
#[case::status(TestRequest::put(), "/status", json!({ "status": "Bogus" }))]
#[actix_web::test]
async fn stranger_with_bad_body_is_not_authorized(
    #[case] request: TestRequest,
    #[case] suffix: &str,
    #[case] payload: Value,
) {
    let id = TaskId::random();
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_fetch()
        .with(eq(bob()), eq(id))
        .return_once(|_, _| Err(Error::not_authorized("Not authorized")));
    ports.tasks.expect_update().never();

    let (status, body) = send(
        ports,
        request
            .uri(&format!("/api/tasks/{id}{suffix}"))
            .insert_header((AUTH_TOKEN_HEADER, BOB_TOKEN))
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "not_authorized");
}

#[actix_web::test]
async fn owner_with_bad_status_gets_the_validation_error() {
    let stored = task(alice(), None);
    let id = *stored.id();
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_fetch()
        .return_once(move |_, _| {
            Ok(TaskView {
                task: stored,
                project: None,
            })
        });
    ports.tasks.expect_update().never();

    let (status, body) = send(
        ports,
        as_alice(TestRequest::put().uri(&format!("/api/tasks/{id}/status")))
            .set_json(json!({ "status": "Blocked" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "status");
}

#[actix_web::test]
async fn delete_confirms() {
    let id = TaskId::random();
    let mut ports = MockPorts::default();
    ports
        .tasks
        .expect_delete()
        .with(eq(alice()), eq(id))
        .return_once(|_, _| Ok(()));

    let (status, body) = send(
        ports,
        as_alice(TestRequest::delete().uri(&format!("/api/tasks/{id}"))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Task deleted" }));
}
