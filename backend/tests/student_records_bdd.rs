//! Behaviour-driven tests for the student records lifecycle.
//!
//! Scenarios drive the domain service through its driving ports over the
//! in-memory store, covering identifier allocation, schema rejection,
//! not-found reporting, nested merge policies and startup seeding.

use std::collections::HashMap;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use student_records::domain::ports::{StudentsCommand, StudentsQuery};
use student_records::domain::{Error, ErrorCode, NestedMergePolicy, Student, StudentId, StudentService};
use student_records::example_data::{ExampleDataSettings, seed_example_data_on_startup};
use student_records::outbound::memory::InMemoryStudentRepository;
use student_records::test_support::{student_payload, without};
use tokio::runtime::Runtime;

type MemoryService = StudentService<InMemoryStudentRepository>;

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

/// Wrapper for non-Clone runtime handle.
#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

#[derive(Default, ScenarioState)]
struct StudentRecordsWorld {
    runtime: Slot<RuntimeHandle>,
    service: Slot<Arc<MemoryService>>,
    ids_by_name: Slot<HashMap<String, StudentId>>,
    last_error: Slot<Error>,
}

impl StudentRecordsWorld {
    fn setup(&self, policy: NestedMergePolicy) {
        let runtime = Runtime::new().expect("create runtime");
        let repository = Arc::new(InMemoryStudentRepository::new());
        let service = StudentService::new(repository).with_merge_policy(policy);
        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.service.set(Arc::new(service));
        self.ids_by_name.set(HashMap::new());
    }

    fn run<T, F>(&self, operation: impl FnOnce(Arc<MemoryService>) -> F) -> T
    where
        F: Future<Output = T>,
    {
        let runtime = self.runtime.get().expect("runtime");
        let service = self.service.get().expect("service");
        runtime.0.block_on(operation(service))
    }

    fn id_of(&self, name: &str) -> StudentId {
        let ids = self.ids_by_name.get().expect("ids");
        *ids.get(name)
            .unwrap_or_else(|| panic!("no student named {name}"))
    }

    fn remember(&self, student: &Student) {
        let mut ids = self.ids_by_name.get().unwrap_or_default();
        ids.insert(student.record().profile.name.clone(), student.id());
        self.ids_by_name.set(ids);
    }

    fn record_outcome<T>(&self, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.last_error.set(error);
                None
            }
        }
    }

    fn student(&self, name: &str) -> Student {
        let id = self.id_of(name);
        self.run(|service| async move { service.get(id).await })
            .expect("student should exist")
    }
}

#[fixture]
fn world() -> StudentRecordsWorld {
    StudentRecordsWorld::default()
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("an empty student store")]
fn an_empty_student_store(world: &StudentRecordsWorld) {
    world.setup(NestedMergePolicy::default());
}

#[given("a student store using the {policy} merge policy")]
fn a_student_store_using_policy(world: &StudentRecordsWorld, policy: String) {
    let policy = unquote(&policy).parse().expect("known merge policy");
    world.setup(policy);
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("the client creates a student named {name}")]
fn the_client_creates_a_student(world: &StudentRecordsWorld, name: String) {
    let payload = student_payload(unquote(&name));
    let result = world.run(|service| async move { service.create(&payload).await });
    if let Some(student) = world.record_outcome(result) {
        world.remember(&student);
    }
}

#[when("the client submits a student named {name} missing {pointer}")]
fn the_client_submits_an_incomplete_student(
    world: &StudentRecordsWorld,
    name: String,
    pointer: String,
) {
    let payload = without(student_payload(unquote(&name)), unquote(&pointer));
    let result = world.run(|service| async move { service.create(&payload).await });
    world.record_outcome(result);
}

#[when("the client deletes the student named {name}")]
fn the_client_deletes_the_student(world: &StudentRecordsWorld, name: String) {
    let id = world.id_of(unquote(&name));
    let result = world.run(|service| async move { service.delete(id).await });
    world.record_outcome(result);
}

#[when("the client updates student {id} with an invalid phone")]
fn the_client_updates_unknown_student(world: &StudentRecordsWorld, id: i64) {
    let id = StudentId::new(id).expect("positive id");
    let result = world.run(|service| async move {
        service.update(id, &json!({ "phone": 1234 })).await
    });
    world.record_outcome(result);
}

#[when("the client changes the parent name of {name} to {parent}")]
fn the_client_changes_the_parent_name(world: &StudentRecordsWorld, name: String, parent: String) {
    let id = world.id_of(unquote(&name));
    let payload = json!({ "parent": { "name": unquote(&parent) } });
    let result = world.run(|service| async move { service.update(id, &payload).await });
    world.record_outcome(result);
}

#[when("startup seeding runs with example data enabled")]
fn startup_seeding_runs(world: &StudentRecordsWorld) {
    let settings = ExampleDataSettings {
        enabled: true,
        fixture_path: None,
    };
    world
        .run(|service| async move { seed_example_data_on_startup(&settings, service.as_ref()).await })
        .expect("seeding succeeds");
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("the student named {newer} has a higher identifier than {older}")]
fn the_student_has_a_higher_identifier(world: &StudentRecordsWorld, newer: String, older: String) {
    assert!(world.id_of(unquote(&newer)) > world.id_of(unquote(&older)));
}

#[then("the store lists {count} students")]
fn the_store_lists_students(world: &StudentRecordsWorld, count: usize) {
    let students = world
        .run(|service| async move { service.list().await })
        .expect("list succeeds");
    assert_eq!(students.len(), count);
    let ids: Vec<i64> = students.iter().map(|student| student.id().get()).collect();
    assert!(ids.is_sorted(), "students should be listed in creation order");
}

#[then("the request is rejected as invalid on field {field}")]
fn the_request_is_rejected(world: &StudentRecordsWorld, field: String) {
    let error = world.last_error.get().expect("an error should be recorded");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], unquote(&field));
}

#[then("the request fails as not found")]
fn the_request_fails_as_not_found(world: &StudentRecordsWorld) {
    let error = world.last_error.get().expect("an error should be recorded");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Student not found");
}

#[then("the parent of {name} is named {parent} and keeps the stored address")]
fn the_parent_keeps_address(world: &StudentRecordsWorld, name: String, parent: String) {
    let student = world.student(unquote(&name));
    assert_eq!(student.record().parent.name, unquote(&parent));
    assert_eq!(student.record().parent.address, "12 Nile Street");
}

#[then("the parent of {name} is named {parent} with an empty address")]
fn the_parent_loses_address(world: &StudentRecordsWorld, name: String, parent: String) {
    let student = world.student(unquote(&name));
    assert_eq!(student.record().parent.name, unquote(&parent));
    assert!(student.record().parent.address.is_empty());
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/student_records.feature",
    name = "Identifiers are not reused after deleting the newest student"
)]
fn identifiers_are_not_reused(world: StudentRecordsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/student_records.feature",
    name = "Creating a student without military details is rejected"
)]
fn missing_military_is_rejected(world: StudentRecordsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/student_records.feature",
    name = "Deleting a student twice reports not found"
)]
fn double_delete_reports_not_found(world: StudentRecordsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/student_records.feature",
    name = "Updating an unknown student reports not found before validation"
)]
fn unknown_update_reports_not_found(world: StudentRecordsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/student_records.feature",
    name = "Deep merge keeps stored nested fields"
)]
fn deep_merge_keeps_nested_fields(world: StudentRecordsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/student_records.feature",
    name = "Replace merge resets omitted nested fields"
)]
fn replace_merge_resets_nested_fields(world: StudentRecordsWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/student_records.feature",
    name = "Example data is seeded once"
)]
fn example_data_is_seeded_once(world: StudentRecordsWorld) {
    let _ = world;
}
