//! Project handlers.
//!
//! ```text
//! GET    /api/projects
//! POST   /api/projects {"name":"Garden","description":"Spring jobs"}
//! GET    /api/projects/{id}
//! PATCH  /api/projects/{id} {"name":"Allotment"}
//! DELETE /api/projects/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ApiResult;
use super::schemas::MessageResponse;
use super::session::AuthenticatedUser;
use super::state::HttpState;
use super::validation::{checked_patch, decode_body, parse_path_id};
use crate::domain::{Error, Project, ProjectFields, ProjectId, ProjectPatch};

const NOT_FOUND: &str = "Project not found";

/// Body for creating a project.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    #[schema(example = "Garden")]
    pub name: String,
    pub description: Option<String>,
}

/// Partial update; absent or null fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: *project.id().as_uuid(),
            owner: *project.owner().as_uuid(),
            name: project.fields().name.as_ref().to_owned(),
            description: project.fields().description.clone(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

impl UpdateProjectRequest {
    fn into_patch(self) -> Result<ProjectPatch, Error> {
        Ok(ProjectPatch::try_new(self.name.as_deref(), self.description)?)
    }
}

/// List the caller's projects.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects owned by the caller", body = [ProjectResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProjectResponse>>> {
    let projects = state.projects.list(user.id()).await?;
    Ok(web::Json(projects.into_iter().map(Into::into).collect()))
}

/// Create a project owned by the caller.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateProjectRequest>,
) -> ApiResult<HttpResponse> {
    let CreateProjectRequest { name, description } = payload.into_inner();
    let fields = ProjectFields::try_new(&name, description)?;
    let project = state.projects.create(user.id(), fields).await?;
    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// Fetch one of the caller's projects.
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "getProject"
)]
#[get("/projects/{id}")]
pub async fn get_project(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id: ProjectId = parse_path_id(&path, NOT_FOUND)?;
    let project = state.projects.fetch(user.id(), &id).await?;
    Ok(web::Json(project.into()))
}

/// Update the given fields of a project.
#[utoipa::path(
    patch,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project identifier")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[patch("/projects/{id}")]
pub async fn update_project(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<ProjectResponse>> {
    let id: ProjectId = parse_path_id(&path, NOT_FOUND)?;
    let parsed = decode_body(payload.into_inner()).and_then(UpdateProjectRequest::into_patch);
    let patch = checked_patch(parsed, || state.projects.fetch(user.id(), &id)).await?;
    let project = state.projects.update(user.id(), &id, patch).await?;
    Ok(web::Json(project.into()))
}

/// Delete a project that no task references.
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project deleted", body = MessageResponse),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Tasks still reference the project", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: ProjectId = parse_path_id(&path, NOT_FOUND)?;
    state.projects.delete(user.id(), &id).await?;
    Ok(web::Json(MessageResponse::deleted("Project")))
}
