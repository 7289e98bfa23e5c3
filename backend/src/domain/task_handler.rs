//! Task handlers, including the project-name join used by the board.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::ports::{ProjectRepository, TaskRepository, TaskService};
use super::store_errors::map_record_store_error;
use super::{
    Error, ProjectId, ProjectSummary, Task, TaskFields, TaskId, TaskPatch, TaskView, UserId,
    assert_owned,
};

const KIND: &str = "task";

/// Task handler implementing [`TaskService`].
#[derive(Clone)]
pub struct TaskHandler<T, P> {
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<T, P> TaskHandler<T, P> {
    pub fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }
}

impl<T, P> TaskHandler<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    async fn load_owned(&self, caller: &UserId, id: &TaskId) -> Result<Task, Error> {
        let task = self
            .tasks
            .find_by_id(id)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?
            .ok_or_else(|| Error::not_found("Task not found"))?;
        assert_owned(&task, caller)?;
        Ok(task)
    }

    /// A task may only point at a project its owner also owns.
    async fn ensure_project_usable(
        &self,
        caller: &UserId,
        project: Option<&ProjectId>,
    ) -> Result<(), Error> {
        let Some(id) = project else {
            return Ok(());
        };
        let found = self
            .projects
            .find_by_id(id)
            .await
            .map_err(|err| map_record_store_error("project", err))?;
        match found {
            Some(project) if project.owner() == caller => Ok(()),
            _ => Err(Error::invalid_request("project does not exist")
                .with_details(json!({ "field": "project" }))),
        }
    }

    /// Resolve a task's project for display. Dangling or foreign references
    /// resolve to nothing.
    async fn summarise_project(&self, task: &Task) -> Result<Option<ProjectSummary>, Error> {
        let Some(id) = task.fields().project else {
            return Ok(None);
        };
        let found = self
            .projects
            .find_by_id(&id)
            .await
            .map_err(|err| map_record_store_error("project", err))?;
        Ok(found
            .filter(|project| project.owner() == task.owner())
            .map(|project| ProjectSummary::from(&project)))
    }
}

#[async_trait]
impl<T, P> TaskService for TaskHandler<T, P>
where
    T: TaskRepository,
    P: ProjectRepository,
{
    async fn list_for_project(
        &self,
        caller: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<Task>, Error> {
        self.tasks
            .list_for_owner_in_project(caller, project)
            .await
            .map_err(|err| map_record_store_error(KIND, err))
    }

    async fn list_for_user(&self, caller: &UserId) -> Result<Vec<TaskView>, Error> {
        let tasks = self
            .tasks
            .list_for_owner(caller)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?;
        let names: HashMap<ProjectId, ProjectSummary> = self
            .projects
            .list_for_owner(caller)
            .await
            .map_err(|err| map_record_store_error("project", err))?
            .iter()
            .map(|project| (*project.id(), ProjectSummary::from(project)))
            .collect();

        Ok(tasks
            .into_iter()
            .map(|task| {
                let project = task
                    .fields()
                    .project
                    .and_then(|id| names.get(&id).cloned());
                TaskView { task, project }
            })
            .collect())
    }

    async fn fetch(&self, caller: &UserId, id: &TaskId) -> Result<TaskView, Error> {
        let task = self.load_owned(caller, id).await?;
        let project = self.summarise_project(&task).await?;
        Ok(TaskView { task, project })
    }

    async fn create(&self, caller: &UserId, fields: TaskFields) -> Result<Task, Error> {
        self.ensure_project_usable(caller, fields.project.as_ref()).await?;
        let task = Task::create(TaskId::random(), *caller, fields, self.clock.utc());
        self.tasks
            .insert(&task)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?;
        info!(owner = %caller, task_id = %task.id(), "task created");
        Ok(task)
    }

    async fn update(&self, caller: &UserId, id: &TaskId, patch: TaskPatch) -> Result<Task, Error> {
        let mut task = self.load_owned(caller, id).await?;
        self.ensure_project_usable(caller, patch.project.as_ref()).await?;
        task.apply(patch, self.clock.utc());
        self.tasks
            .update(&task)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?;
        Ok(task)
    }

    async fn delete(&self, caller: &UserId, id: &TaskId) -> Result<(), Error> {
        self.load_owned(caller, id).await?;
        if !self
            .tasks
            .delete(id)
            .await
            .map_err(|err| map_record_store_error(KIND, err))?
        {
            return Err(Error::not_found("Task not found"));
        }
        info!(owner = %caller, task_id = %id, "task deleted");
        Ok(())
    }
}
