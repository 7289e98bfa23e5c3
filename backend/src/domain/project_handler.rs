//! Project handlers: list, create, fetch, update, delete.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::ports::{ProjectRepository, ProjectService, TaskRepository};
use super::store_errors::map_record_store_error;
use super::{Error, Project, ProjectFields, ProjectId, ProjectPatch, UserId, assert_owned};

const KIND: &str = "project";

/// Project handler implementing [`ProjectService`].
///
/// Holds the task store as well so deletion can refuse to orphan tasks.
#[derive(Clone)]
pub struct ProjectHandler<P, T> {
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<P, T> ProjectHandler<P, T> {
    pub fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            tasks,
            clock,
        }
    }
}

impl<P, T> ProjectHandler<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    /// Load a project and run the ownership guard.
    async fn load_owned(&self, caller: &UserId, id: &ProjectId) -> Result<Project, Error> {
        let project = self
            .projects
            .find_by_id(id)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?
            .ok_or_else(|| Error::not_found("Project not found"))?;
        assert_owned(&project, caller)?;
        Ok(project)
    }
}

#[async_trait]
impl<P, T> ProjectService for ProjectHandler<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    async fn list(&self, caller: &UserId) -> Result<Vec<Project>, Error> {
        self.projects
            .list_for_owner(caller)
            .await
            .map_err(|err| map_record_store_error(KIND, err))
    }

    async fn create(&self, caller: &UserId, fields: ProjectFields) -> Result<Project, Error> {
        let project = Project::create(ProjectId::random(), *caller, fields, self.clock.utc());
        self.projects
            .insert(&project)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?;
        info!(owner = %caller, project_id = %project.id(), "project created");
        Ok(project)
    }

    async fn fetch(&self, caller: &UserId, id: &ProjectId) -> Result<Project, Error> {
        self.load_owned(caller, id).await
    }

    async fn update(
        &self,
        caller: &UserId,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, Error> {
        let mut project = self.load_owned(caller, id).await?;
        project.apply(patch, self.clock.utc());
        self.projects
            .update(&project)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?;
        Ok(project)
    }

    async fn delete(&self, caller: &UserId, id: &ProjectId) -> Result<(), Error> {
        self.load_owned(caller, id).await?;
        let referencing = self
            .tasks
            .count_for_project(id)
            .await
            .map_err(|err| map_record_store_error("task", err))?;
        if referencing > 0 {
            return Err(
                Error::conflict("Project still has tasks; delete or move them first")
                    .with_details(json!({ "taskCount": referencing })),
            );
        }
        if !self
            .projects
            .delete(id)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?
        {
            return Err(Error::not_found("Project not found"));
        }
        info!(owner = %caller, project_id = %id, "project deleted");
        Ok(())
    }
}
