//! PostgreSQL-backed `TaskRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecordPersistenceError, TaskRepository};
use crate::domain::{ProjectId, Task, TaskId, UserId};

use super::error_mapping::{record_diesel_error, record_pool_error};
use super::models::{TaskChangeset, TaskRow};
use super::pool::DbPool;
use super::schema::tasks;

/// Diesel-backed implementation of the [`TaskRepository`] port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, RecordPersistenceError> {
    rows.into_iter().map(Task::try_from).collect()
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::insert_into(tasks::table)
            .values(&TaskRow::from(task))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(record_diesel_error)
    }

    async fn update(&self, task: &Task) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::update(tasks::table.find(task.id().as_uuid()))
            .set(&TaskChangeset::from(task))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(record_diesel_error)
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::delete(tasks::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(record_diesel_error)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let row: Option<TaskRow> = tasks::table
            .find(id.as_uuid())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(record_diesel_error)?;
        row.map(Task::try_from).transpose()
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let rows = tasks::table
            .filter(tasks::owner_id.eq(owner.as_uuid()))
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(record_diesel_error)?;
        into_tasks(rows)
    }

    async fn list_for_owner_in_project(
        &self,
        owner: &UserId,
        project: &ProjectId,
    ) -> Result<Vec<Task>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let rows = tasks::table
            .filter(tasks::owner_id.eq(owner.as_uuid()))
            .filter(tasks::project_id.eq(project.as_uuid()))
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(record_diesel_error)?;
        into_tasks(rows)
    }

    async fn count_for_project(&self, project: &ProjectId) -> Result<u64, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let count: i64 = tasks::table
            .filter(tasks::project_id.eq(project.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(record_diesel_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
