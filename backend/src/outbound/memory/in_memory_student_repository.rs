//! `StudentRepository` backed by a process-local ordered map.
//!
//! The collection and its [`IdAllocator`] sit behind one `RwLock`, so every
//! mutation is a single critical section: two concurrent creates can never
//! observe the same high-water mark.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{
    IdAllocator, NestedMergePolicy, Student, StudentDraft, StudentId, StudentPatch,
};

#[derive(Debug, Default)]
struct Collection {
    students: BTreeMap<StudentId, Student>,
    allocator: IdAllocator,
}

/// In-memory implementation of the [`StudentRepository`] port.
///
/// Students are keyed by identifier; because identifiers only grow,
/// ascending key order is also creation order.
///
/// # Examples
/// ```
/// use student_records::domain::ports::StudentRepository;
/// use student_records::domain::StudentDraft;
/// use student_records::outbound::memory::InMemoryStudentRepository;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let repo = InMemoryStudentRepository::new();
/// let first = repo.insert(StudentDraft::default()).await.expect("insert");
/// assert_eq!(first.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    inner: RwLock<Collection>,
}

impl InMemoryStudentRepository {
    /// Empty repository; the first identifier issued is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with existing records.
    ///
    /// The allocator is positioned after the highest supplied identifier.
    #[must_use]
    pub fn with_students(existing: impl IntoIterator<Item = Student>) -> Self {
        let students: BTreeMap<StudentId, Student> = existing
            .into_iter()
            .map(|student| (student.id(), student))
            .collect();
        let allocator = IdAllocator::seeded(students.keys().copied());
        Self {
            inner: RwLock::new(Collection {
                students,
                allocator,
            }),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let guard = self.inner.read().await;
        Ok(guard.students.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let guard = self.inner.read().await;
        Ok(guard.students.get(&id).cloned())
    }

    async fn insert(&self, draft: StudentDraft) -> Result<Student, StudentRepositoryError> {
        let mut guard = self.inner.write().await;
        let id = guard
            .allocator
            .next_id()
            .map_err(|err| StudentRepositoryError::query(err.to_string()))?;
        let student = Student::new(id, draft);
        guard.students.insert(id, student.clone());
        debug!(student_id = %id, "student stored in memory");
        Ok(student)
    }

    async fn update(
        &self,
        id: StudentId,
        patch: StudentPatch,
        policy: NestedMergePolicy,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut guard = self.inner.write().await;
        let Some(current) = guard.students.remove(&id) else {
            return Ok(None);
        };
        let updated = current.apply(patch, policy);
        guard.students.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut guard = self.inner.write().await;
        Ok(guard.students.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::domain::{ParentPatch, validate_create};
    use crate::test_support::student_payload;
    use rstest::{fixture, rstest};

    fn draft(name: &str) -> StudentDraft {
        validate_create(&student_payload(name)).expect("valid payload")
    }

    fn id(value: i64) -> StudentId {
        StudentId::new(value).expect("positive id")
    }

    #[fixture]
    fn repo() -> InMemoryStudentRepository {
        InMemoryStudentRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn identifiers_never_reuse_deleted_maximum(repo: InMemoryStudentRepository) {
        let a = repo.insert(draft("A")).await.expect("insert A");
        let b = repo.insert(draft("B")).await.expect("insert B");
        assert!(repo.delete(b.id()).await.expect("delete B"));

        let c = repo.insert(draft("C")).await.expect("insert C");

        assert!(c.id() > b.id());
        assert!(c.id() > a.id());
    }

    #[rstest]
    #[tokio::test]
    async fn list_preserves_creation_order_after_deletes(repo: InMemoryStudentRepository) {
        for name in ["A", "B", "C", "D"] {
            repo.insert(draft(name)).await.expect("insert");
        }
        repo.delete(id(2)).await.expect("delete");
        repo.insert(draft("E")).await.expect("insert");

        let names: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|student| student.record().profile.name.clone())
            .collect();
        assert_eq!(names, ["A", "C", "D", "E"]);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_repository_allocates_above_existing() {
        let repo = InMemoryStudentRepository::with_students([
            Student::new(id(1), draft("A")),
            Student::new(id(2), draft("B")),
        ]);
        let created = repo.insert(draft("C")).await.expect("insert");
        assert_eq!(created.id(), id(3));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_record_changes_nothing(repo: InMemoryStudentRepository) {
        repo.insert(draft("A")).await.expect("insert");
        let before = repo.list().await.expect("list");

        let patch = StudentPatch {
            parent: Some(ParentPatch::default()),
            ..StudentPatch::default()
        };
        let outcome = repo
            .update(id(99), patch, NestedMergePolicy::Replace)
            .await
            .expect("update");

        assert!(outcome.is_none());
        assert_eq!(repo.list().await.expect("list"), before);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_identifier_and_position(repo: InMemoryStudentRepository) {
        repo.insert(draft("A")).await.expect("insert");
        repo.insert(draft("B")).await.expect("insert");
        let mut patch = StudentPatch::default();
        patch.profile.name = Some("A2".to_owned());

        let updated = repo
            .update(id(1), patch, NestedMergePolicy::Replace)
            .await
            .expect("update")
            .expect("present");

        assert_eq!(updated.id(), id(1));
        let list = repo.list().await.expect("list");
        assert_eq!(list[0].record().profile.name, "A2");
        assert_eq!(list[1].record().profile.name, "B");
    }

    #[rstest]
    #[tokio::test]
    async fn double_delete_reports_absence(repo: InMemoryStudentRepository) {
        let created = repo.insert(draft("A")).await.expect("insert");
        assert!(repo.delete(created.id()).await.expect("first delete"));
        assert!(!repo.delete(created.id()).await.expect("second delete"));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_receive_distinct_identifiers() {
        let repo = Arc::new(InMemoryStudentRepository::new());
        let tasks: Vec<_> = (0..32)
            .map(|n| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.insert(draft(&format!("S{n}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.expect("join").expect("insert").id().get());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<i64>>());
    }
}
