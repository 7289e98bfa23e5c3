//! In-memory owned-record repositories.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{
    PaymentRepository, ProjectRepository, RecordPersistenceError, TaskRepository,
};
use crate::domain::{
    OwnedRecord, PaymentAppointment, PaymentFields, PaymentId, Project, ProjectFields, ProjectId,
    Task, TaskFields, TaskId, UserId,
};

use super::lock;

/// Insertion-ordered store shared by the three record kinds.
struct RecordTable<Id, F> {
    rows: Mutex<Vec<OwnedRecord<Id, F>>>,
}

impl<Id, F> Default for RecordTable<Id, F> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<Id, F> RecordTable<Id, F>
where
    Id: PartialEq + Clone,
    F: Clone,
{
    fn insert(&self, record: &OwnedRecord<Id, F>) -> Result<(), RecordPersistenceError> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|row| row.id() == record.id()) {
            return Err(RecordPersistenceError::query("duplicate record id"));
        }
        rows.push(record.clone());
        Ok(())
    }

    /// Replace the stored record with the same id; missing rows are a no-op,
    /// matching an `UPDATE` that touches zero rows.
    fn update(&self, record: &OwnedRecord<Id, F>) -> Result<(), RecordPersistenceError> {
        let mut rows = lock(&self.rows)?;
        if let Some(slot) = rows.iter_mut().find(|row| row.id() == record.id()) {
            *slot = record.clone();
        }
        Ok(())
    }

    fn delete(&self, id: &Id) -> Result<bool, RecordPersistenceError> {
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() != before)
    }

    fn find(&self, id: &Id) -> Result<Option<OwnedRecord<Id, F>>, RecordPersistenceError> {
        Ok(lock(&self.rows)?.iter().find(|row| row.id() == id).cloned())
    }

    fn select<P>(&self, predicate: P) -> Result<Vec<OwnedRecord<Id, F>>, RecordPersistenceError>
    where
        P: Fn(&OwnedRecord<Id, F>) -> bool,
    {
        Ok(lock(&self.rows)?
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect())
    }
}

/// In-memory [`ProjectRepository`].
#[derive(Default)]
pub struct InMemoryProjectRepository {
    table: RecordTable<ProjectId, ProjectFields>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), RecordPersistenceError> {
        self.table.insert(project)
    }

    async fn update(&self, project: &Project) -> Result<(), RecordPersistenceError> {
        self.table.update(project)
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, RecordPersistenceError> {
        self.table.delete(id)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RecordPersistenceError> {
        self.table.find(id)
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, RecordPersistenceError> {
        self.table.select(|row| row.owner() == owner)
    }
}

/// In-memory [`TaskRepository`].
#[derive(Default)]
pub struct InMemoryTaskRepository {
    table: RecordTable<TaskId, TaskFields>,
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), RecordPersistenceError> {
        self.table.insert(task)
    }

    async fn update(&self, task: &Task) -> Result<(), RecordPersistenceError> {
        self.table.update(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, RecordPersistenceError> {
        self.table.delete(id)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, RecordPersistenceError> {
        self.table.find(id)
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, RecordPersistenceError> {
        self.table.select(|row| row.owner() == owner)
    }

    async fn list_for_owner_in_project(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<Task>, RecordPersistenceError> {
        self.table
            .select(|row| row.owner() == owner && row.fields().project.as_ref() == Some(project))
    }

    async fn count_for_project(&self, project: &ProjectId) -> Result<u64, RecordPersistenceError> {
        let matching = self
            .table
            .select(|row| row.fields().project.as_ref() == Some(project))?;
        Ok(matching.len() as u64)
    }
}

/// In-memory [`PaymentRepository`].
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    table: RecordTable<PaymentId, PaymentFields>,
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, payment: &PaymentAppointment) -> Result<(), RecordPersistenceError> {
        self.table.insert(payment)
    }

    async fn update(&self, payment: &PaymentAppointment) -> Result<(), RecordPersistenceError> {
        self.table.update(payment)
    }

    async fn delete(&self, id: &PaymentId) -> Result<bool, RecordPersistenceError> {
        self.table.delete(id)
    }

    async fn find_by_id(
        &self,
        id: &PaymentId,
    ) -> Result<Option<PaymentAppointment>, RecordPersistenceError> {
        self.table.find(id)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<PaymentAppointment>, RecordPersistenceError> {
        self.table.select(|row| row.owner() == owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn project(owner: UserId, name: &str) -> Project {
        let fields = ProjectFields::try_new(name, None).expect("valid");
        Project::create(ProjectId::random(), owner, fields, Utc::now())
    }

    fn task(owner: UserId, project: Option<ProjectId>) -> Task {
        let fields = TaskFields::try_new("t", None, project, None, None).expect("valid");
        Task::create(TaskId::random(), owner, fields, Utc::now())
    }

    #[fixture]
    fn projects() -> InMemoryProjectRepository {
        InMemoryProjectRepository::default()
    }

    #[rstest]
    #[tokio::test]
    async fn list_keeps_insertion_order_and_owner_scope(projects: InMemoryProjectRepository) {
        let alice = UserId::random();
        let bob = UserId::random();
        for (owner, name) in [(alice, "a1"), (bob, "b1"), (alice, "a2")] {
            projects.insert(&project(owner, name)).await.expect("insert");
        }

        let names: Vec<String> = projects
            .list_for_owner(&alice)
            .await
            .expect("list")
            .iter()
            .map(|p| p.fields().name.as_ref().to_owned())
            .collect();

        assert_eq!(names, ["a1", "a2"]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_row_existed(projects: InMemoryProjectRepository) {
        let stored = project(UserId::random(), "p");
        projects.insert(&stored).await.expect("insert");

        assert!(projects.delete(stored.id()).await.expect("delete"));
        assert!(!projects.delete(stored.id()).await.expect("delete again"));
        assert!(projects.find_by_id(stored.id()).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_insert_is_rejected(projects: InMemoryProjectRepository) {
        let stored = project(UserId::random(), "p");
        projects.insert(&stored).await.expect("insert");
        assert!(projects.insert(&stored).await.is_err());
    }

    #[tokio::test]
    async fn tasks_filter_by_project_and_count_across_owners() {
        let repo = InMemoryTaskRepository::default();
        let alice = UserId::random();
        let p1 = ProjectId::random();
        repo.insert(&task(alice, Some(p1))).await.expect("insert");
        repo.insert(&task(alice, None)).await.expect("insert");
        repo.insert(&task(UserId::random(), Some(p1)))
            .await
            .expect("insert");

        let in_project = repo
            .list_for_owner_in_project(&alice, &p1)
            .await
            .expect("list");
        assert_eq!(in_project.len(), 1);
        assert_eq!(repo.count_for_project(&p1).await.expect("count"), 2);
    }
}
