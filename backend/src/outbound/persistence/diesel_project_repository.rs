//! PostgreSQL-backed `ProjectRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, RecordPersistenceError};
use crate::domain::{Project, ProjectId, UserId};

use super::error_mapping::{record_diesel_error, record_pool_error};
use super::models::{ProjectChangeset, ProjectRow};
use super::pool::DbPool;
use super::schema::projects;

/// Diesel-backed implementation of the [`ProjectRepository`] port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::insert_into(projects::table)
            .values(&ProjectRow::from(project))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(record_diesel_error)
    }

    async fn update(&self, project: &Project) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::update(projects::table.find(project.id().as_uuid()))
            .set(&ProjectChangeset::from(project))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(record_diesel_error)
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        diesel::delete(projects::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(record_diesel_error)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let row: Option<ProjectRow> = projects::table
            .find(id.as_uuid())
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(record_diesel_error)?;
        row.map(Project::try_from).transpose()
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Project>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(record_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::owner_id.eq(owner.as_uuid()))
            .order((projects::created_at.asc(), projects::id.asc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(record_diesel_error)?;
        rows.into_iter().map(Project::try_from).collect()
    }
}
