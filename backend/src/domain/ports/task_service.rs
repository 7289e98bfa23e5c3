//! Driving port for task handlers.

use async_trait::async_trait;

use crate::domain::{Error, ProjectId, Task, TaskFields, TaskId, TaskPatch, TaskView, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Caller's tasks that reference `project`.
    async fn list_for_project(
        &self,
        caller: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<Task>, Error>;

    /// All of the caller's tasks with project names joined.
    async fn list_for_user(&self, caller: &UserId) -> Result<Vec<TaskView>, Error>;

    /// Load one task with its project name joined, applying the ownership
    /// guard.
    async fn fetch(&self, caller: &UserId, id: &TaskId) -> Result<TaskView, Error>;

    /// Create a task owned by `caller`.
    async fn create(&self, caller: &UserId, fields: TaskFields) -> Result<Task, Error>;

    /// Apply a partial update to a task the caller owns.
    async fn update(&self, caller: &UserId, id: &TaskId, patch: TaskPatch)
    -> Result<Task, Error>;

    /// Delete a task the caller owns.
    async fn delete(&self, caller: &UserId, id: &TaskId) -> Result<(), Error>;
}
