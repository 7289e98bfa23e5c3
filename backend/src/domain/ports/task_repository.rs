//! Driven port for task storage.

use async_trait::async_trait;

use crate::domain::{ProjectId, Task, TaskId, UserId};

use super::RecordPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a newly created task.
    async fn insert(&self, task: &Task) -> Result<(), RecordPersistenceError>;

    /// Overwrite a stored task. Last write wins.
    async fn update(&self, task: &Task) -> Result<(), RecordPersistenceError>;

    /// Remove a task, reporting whether it existed.
    async fn delete(&self, id: &TaskId) -> Result<bool, RecordPersistenceError>;

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, RecordPersistenceError>;

    /// Tasks owned by `owner` in insertion order.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, RecordPersistenceError>;

    /// Tasks owned by `owner` that reference `project`, in insertion order.
    async fn list_for_owner_in_project(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<Task>, RecordPersistenceError>;

    /// Number of tasks, from any owner, that reference `project`.
    async fn count_for_project(&self, project: &ProjectId) -> Result<u64, RecordPersistenceError>;
}
