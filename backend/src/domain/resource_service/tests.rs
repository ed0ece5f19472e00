//! Unit tests for the generic resource service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{ErrorCode, Invoice, Project, User};
use crate::outbound::memory::InMemoryEntityRepository;
use crate::test_support::{MutableClock, UNAVAILABLE_MESSAGE, UnavailableStore};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn missing_id() -> RecordId {
    "65f1c0ffee0000000000beef".parse().expect("valid id")
}

struct Harness<E> {
    service: ResourceService<E>,
    clock: Arc<MutableClock>,
}

fn harness<E: Entity>() -> Harness<E> {
    let clock = Arc::new(MutableClock::new(at(1)));
    let service = ResourceService::new(
        Arc::new(InMemoryEntityRepository::<E>::default()),
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    Harness { service, clock }
}

#[fixture]
fn users() -> Harness<User> {
    harness()
}

#[fixture]
fn projects() -> Harness<Project> {
    harness()
}

fn user(username: &str) -> User {
    User {
        username: username.to_owned(),
        password: "secret".to_owned(),
        role: "client".to_owned(),
        ..User::default()
    }
}

fn project(title: &str) -> Project {
    Project {
        title: title.to_owned(),
        description: "Landing page".to_owned(),
        ..Project::default()
    }
}

fn unavailable_service<E: Entity>() -> ResourceService<E> {
    ResourceService::new(
        Arc::new(UnavailableStore),
        Arc::new(MutableClock::new(at(1))),
    )
}

#[rstest]
#[tokio::test]
async fn created_record_is_readable(projects: Harness<Project>) {
    let id = projects
        .service
        .create(project("Website"))
        .await
        .expect("create");

    let stored = projects.service.get(&id).await.expect("get");
    assert_eq!(stored.id, Some(id));
    assert_eq!(stored.title, "Website");
    assert_eq!(stored.description, "Landing page");
}

#[rstest]
#[tokio::test]
async fn list_returns_every_record_in_insertion_order(projects: Harness<Project>) {
    for title in ["First", "Second", "Third"] {
        projects.service.create(project(title)).await.expect("create");
    }

    let titles: Vec<String> = projects
        .service
        .list()
        .await
        .expect("list")
        .into_iter()
        .map(|record| record.title)
        .collect();
    assert_eq!(titles, ["First", "Second", "Third"]);
}

#[rstest]
#[tokio::test]
async fn list_of_empty_collection_is_empty(projects: Harness<Project>) {
    assert!(projects.service.list().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_record(projects: Harness<Project>) {
    let err = projects
        .service
        .create(project("  "))
        .await
        .expect_err("blank title");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "title must not be blank");
    assert!(projects.service.list().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn create_rejects_negative_invoice_amount() {
    let invoices = harness::<Invoice>();
    let invoice = Invoice {
        amount: -1.0,
        ..Invoice::default()
    };
    let err = invoices
        .service
        .create(invoice)
        .await
        .expect_err("negative amount");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_stamps_user_timestamps(users: Harness<User>) {
    let id = users.service.create(user("ada")).await.expect("create");

    let stored = users.service.get(&id).await.expect("get");
    assert_eq!(stored.created_at, Some(at(1)));
    assert_eq!(stored.updated_at, Some(at(1)));
}

#[rstest]
#[tokio::test]
async fn update_replaces_fields_and_keeps_creation_time(users: Harness<User>) {
    let id = users.service.create(user("ada")).await.expect("create");
    users.clock.advance_days(2);

    users
        .service
        .update(&id, user("lovelace"))
        .await
        .expect("update");

    let stored = users.service.get(&id).await.expect("get");
    assert_eq!(stored.username, "lovelace");
    assert_eq!(stored.created_at, Some(at(1)));
    assert_eq!(stored.updated_at, Some(at(3)));
}

#[rstest]
#[tokio::test]
async fn update_resets_omitted_fields(projects: Harness<Project>) {
    let id = projects
        .service
        .create(project("Website"))
        .await
        .expect("create");

    let replacement = Project {
        title: "Website v2".to_owned(),
        ..Project::default()
    };
    projects
        .service
        .update(&id, replacement)
        .await
        .expect("update");

    let stored = projects.service.get(&id).await.expect("get");
    assert_eq!(stored.title, "Website v2");
    assert_eq!(stored.description, "");
}

#[rstest]
#[tokio::test]
async fn update_of_missing_record_is_not_found(projects: Harness<Project>) {
    let err = projects
        .service
        .update(&missing_id(), project("Website"))
        .await
        .expect_err("missing record");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Project not found");
}

#[rstest]
#[tokio::test]
async fn update_validates_before_touching_the_store(projects: Harness<Project>) {
    let err = projects
        .service
        .update(&missing_id(), project(""))
        .await
        .expect_err("blank title");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn delete_removes_record(projects: Harness<Project>) {
    let id = projects
        .service
        .create(project("Website"))
        .await
        .expect("create");

    projects.service.delete(&id).await.expect("delete");

    let err = projects.service.get(&id).await.expect_err("deleted");
    assert_eq!(err.code(), ErrorCode::NotFound);
    let err = projects.service.delete(&id).await.expect_err("second delete");
    assert_eq!(err.message(), "Project not found");
}

#[rstest]
#[tokio::test]
async fn get_of_missing_record_names_the_entity(users: Harness<User>) {
    let err = users.service.get(&missing_id()).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[tokio::test]
async fn store_failures_surface_as_internal_errors() {
    let service = unavailable_service::<Project>();
    let expected = UNAVAILABLE_MESSAGE;

    let list = service.list().await.expect_err("list fails");
    assert_eq!(list.code(), ErrorCode::InternalError);
    assert_eq!(list.message(), expected);

    let create = service
        .create(project("Website"))
        .await
        .expect_err("create fails");
    assert_eq!(create.message(), expected);

    let update = service
        .update(&missing_id(), project("Website"))
        .await
        .expect_err("update fails");
    assert_eq!(update.code(), ErrorCode::InternalError);

    let delete = service.delete(&missing_id()).await.expect_err("delete fails");
    assert_eq!(delete.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn failed_lookup_reads_as_not_found() {
    let service = unavailable_service::<Project>();
    let err = service.get(&missing_id()).await.expect_err("get fails");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Project not found");
}

#[rstest]
fn not_found_message_uses_entity_name() {
    assert_eq!(not_found_message::<Invoice>(), "Invoice not found");
}
