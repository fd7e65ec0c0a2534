//! Integration tests for `DieselStudentRepository` against embedded PostgreSQL.
//!
//! Each test gets its own `pg-embedded-setup-unpriv` cluster and a freshly
//! migrated database, so sequence state never leaks between cases.

use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use serde_json::json;
use student_records::domain::ports::StudentRepository;
use student_records::domain::{NestedMergePolicy, StudentId, validate_create, validate_patch};
use student_records::outbound::persistence::{
    DbPool, DieselStudentRepository, PoolConfig, run_pending_migrations,
};
use student_records::test_support::student_payload;
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, reset_database};

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselStudentRepository,
}

impl TestContext {
    fn insert(&self, name: &str) -> StudentId {
        let draft = validate_create(&student_payload(name)).expect("valid payload");
        self.runtime
            .block_on(self.repository.insert(draft))
            .expect("insert student")
            .id()
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let db_name = format!("students_{}", Uuid::new_v4().simple());
    reset_database(&cluster, &db_name)?;
    let database_url = cluster.connection().database_url(&db_name);
    run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselStudentRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn created_student_is_returned_by_id(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: created_student_is_returned_by_id skipped");
        return;
    };

    let id = context.insert("Mona Adel");
    assert_eq!(id.get(), 1);

    let fetched = context
        .runtime
        .block_on(context.repository.find_by_id(id))
        .expect("fetch student")
        .expect("student should exist");
    assert_eq!(fetched.id(), id);
    assert_eq!(fetched.record().profile.name, "Mona Adel");
    assert_eq!(fetched.record().parent.address, "12 Nile Street");
    assert_eq!(
        fetched.record(),
        &validate_create(&student_payload("Mona Adel")).expect("valid payload")
    );

    let missing = StudentId::new(99).expect("positive id");
    let absent = context
        .runtime
        .block_on(context.repository.find_by_id(missing))
        .expect("fetch missing student");
    assert!(absent.is_none());
}

#[rstest]
fn deleted_identifiers_are_not_reused(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleted_identifiers_are_not_reused skipped");
        return;
    };

    let first = context.insert("Mai");
    let second = context.insert("Omar");
    let deleted = context
        .runtime
        .block_on(context.repository.delete(second))
        .expect("delete newest student");
    assert!(deleted);

    let third = context.insert("Salma");
    assert!(third > second, "{third:?} should follow {second:?}");

    let listed = context
        .runtime
        .block_on(context.repository.list())
        .expect("list students");
    let ids: Vec<StudentId> = listed.iter().map(|student| student.id()).collect();
    assert_eq!(ids, [first, third]);
}

#[rstest]
#[case(NestedMergePolicy::Replace, "")]
#[case(NestedMergePolicy::Deep, "12 Nile Street")]
fn update_applies_merge_policy_to_nested_sections(
    repo_context: Option<TestContext>,
    #[case] policy: NestedMergePolicy,
    #[case] expected_address: &str,
) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_applies_merge_policy_to_nested_sections skipped");
        return;
    };

    let id = context.insert("Mai");
    let patch = validate_patch(&json!({
        "phone": "01100000000",
        "parent": { "name": "Hoda Salah" }
    }))
    .expect("valid patch");

    let updated = context
        .runtime
        .block_on(context.repository.update(id, patch, policy))
        .expect("update student")
        .expect("student should exist");
    assert_eq!(updated.id(), id);
    assert_eq!(updated.record().profile.phone, "01100000000");
    assert_eq!(updated.record().parent.name, "Hoda Salah");
    assert_eq!(updated.record().parent.address, expected_address);

    let stored = context
        .runtime
        .block_on(context.repository.find_by_id(id))
        .expect("fetch student")
        .expect("student should exist");
    assert_eq!(stored, updated);
}

#[rstest]
fn update_of_missing_student_returns_none(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_of_missing_student_returns_none skipped");
        return;
    };

    let patch = validate_patch(&json!({ "phone": "01100000000" })).expect("valid patch");
    let missing = StudentId::new(7).expect("positive id");
    let outcome = context
        .runtime
        .block_on(
            context
                .repository
                .update(missing, patch, NestedMergePolicy::Replace),
        )
        .expect("update runs");
    assert!(outcome.is_none());
}

#[rstest]
fn second_delete_reports_absent(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: second_delete_reports_absent skipped");
        return;
    };

    let id = context.insert("Mai");
    let first = context
        .runtime
        .block_on(context.repository.delete(id))
        .expect("first delete");
    let second = context
        .runtime
        .block_on(context.repository.delete(id))
        .expect("second delete");

    assert!(first);
    assert!(!second);
}
