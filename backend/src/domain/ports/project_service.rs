//! Driving port for project handlers.

use async_trait::async_trait;

use crate::domain::{Error, Project, ProjectFields, ProjectId, ProjectPatch, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Projects owned by `caller`.
    async fn list(&self, caller: &UserId) -> Result<Vec<Project>, Error>;

    /// Create a project owned by `caller`.
    async fn create(&self, caller: &UserId, fields: ProjectFields) -> Result<Project, Error>;

    /// Load one project, applying the ownership guard.
    async fn fetch(&self, caller: &UserId, id: &ProjectId) -> Result<Project, Error>;

    /// Apply a partial update to a project the caller owns.
    async fn update(
        &self,
        caller: &UserId,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, Error>;

    /// Delete a project the caller owns. Refused while tasks reference it.
    async fn delete(&self, caller: &UserId, id: &ProjectId) -> Result<(), Error>;
}
