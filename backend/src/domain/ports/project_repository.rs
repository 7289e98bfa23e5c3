//! Driven port for project storage.

use async_trait::async_trait;

use crate::domain::{Project, ProjectId, UserId};

use super::RecordPersistenceError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a newly created project.
    async fn insert(&self, project: &Project) -> Result<(), RecordPersistenceError>;

    /// Overwrite a stored project. Last write wins.
    async fn update(&self, project: &Project) -> Result<(), RecordPersistenceError>;

    /// Remove a project, reporting whether it existed.
    async fn delete(&self, id: &ProjectId) -> Result<bool, RecordPersistenceError>;

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RecordPersistenceError>;

    /// Projects owned by `owner` in insertion order.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, RecordPersistenceError>;
}
