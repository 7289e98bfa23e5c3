//! Task handlers, including the board's cross-project listing.
//!
//! ```text
//! GET    /api/tasks/user
//! GET    /api/tasks/project/{projectId}
//! GET    /api/tasks/{id}
//! POST   /api/tasks {"title":"Dig beds","project":"<projectId>","dueDate":"2024-04-01"}
//! PATCH  /api/tasks/{id} {"description":"north side first"}
//! PUT    /api/tasks/{id}/status {"status":"In Progress"}
//! DELETE /api/tasks/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ApiResult;
use super::schemas::MessageResponse;
use super::session::AuthenticatedUser;
use super::state::HttpState;
use super::validation::{
    checked_patch, decode_body, parse_optional, parse_optional_date, parse_path_id,
    parse_reference_id,
};
use crate::domain::{
    Error, ProjectId, RequiredText, Task, TaskFields, TaskId, TaskPatch, TaskStatus, TaskView,
};

const NOT_FOUND: &str = "Task not found";

/// Body for creating a task.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[schema(example = "Dig beds")]
    pub title: String,
    pub description: Option<String>,
    /// Project identifier; blank means none.
    pub project: Option<String>,
    #[schema(example = "To Do")]
    pub status: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[schema(example = "2024-04-01")]
    pub due_date: Option<String>,
}

/// Partial update; absent or null fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

/// Body for moving a task between board columns.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TaskStatusRequest {
    #[serde(default)]
    #[schema(example = "Done")]
    pub status: String,
}

/// Project a task points at. `name` is present when the project was
/// resolved for display.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TaskProjectRef {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub project: Option<TaskProjectRef>,
    #[schema(example = "To Do")]
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    fn render(task: &Task, project_name: Option<String>) -> Self {
        let fields = task.fields();
        Self {
            id: *task.id().as_uuid(),
            owner: *task.owner().as_uuid(),
            title: fields.title.as_ref().to_owned(),
            description: fields.description.clone(),
            project: fields.project.map(|id| TaskProjectRef {
                id: *id.as_uuid(),
                name: project_name,
            }),
            status: fields.status.as_str().to_owned(),
            due_date: fields.due_date,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self::render(&task, None)
    }
}

impl From<TaskView> for TaskResponse {
    fn from(view: TaskView) -> Self {
        Self::render(&view.task, view.project.map(|summary| summary.name))
    }
}

impl CreateTaskRequest {
    fn into_fields(self) -> Result<TaskFields, Error> {
        let project = parse_reference_id::<ProjectId>("project", self.project.as_deref())?;
        let status = parse_optional::<TaskStatus>(self.status.as_deref())?;
        let due_date = parse_optional_date("dueDate", self.due_date.as_deref())?;
        Ok(TaskFields::try_new(
            &self.title,
            self.description,
            project,
            status,
            due_date,
        )?)
    }
}

impl UpdateTaskRequest {
    fn into_patch(self) -> Result<TaskPatch, Error> {
        Ok(TaskPatch {
            title: self
                .title
                .as_deref()
                .map(|raw| RequiredText::new("title", raw))
                .transpose()?,
            description: self.description,
            project: parse_reference_id::<ProjectId>("project", self.project.as_deref())?,
            status: parse_optional::<TaskStatus>(self.status.as_deref())?,
            due_date: parse_optional_date("dueDate", self.due_date.as_deref())?,
        })
    }
}

/// List every task the caller owns, with project names joined.
#[utoipa::path(
    get,
    path = "/api/tasks/user",
    responses(
        (status = 200, description = "Caller's tasks", body = [TaskResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "listUserTasks"
)]
#[get("/tasks/user")]
pub async fn list_user_tasks(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TaskResponse>>> {
    let views = state.tasks.list_for_user(user.id()).await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// List the caller's tasks in one project.
#[utoipa::path(
    get,
    path = "/api/tasks/project/{projectId}",
    params(("projectId" = Uuid, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Caller's tasks in the project", body = [TaskResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "listProjectTasks"
)]
#[get("/tasks/project/{project_id}")]
pub async fn list_project_tasks(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<TaskResponse>>> {
    // An id that names no project simply has no tasks.
    let Ok(project) = path.parse::<ProjectId>() else {
        return Ok(web::Json(Vec::new()));
    };
    let tasks = state.tasks.list_for_project(user.id(), &project).await?;
    Ok(web::Json(tasks.into_iter().map(Into::into).collect()))
}

/// Fetch one of the caller's tasks with its project name joined.
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task", body = TaskResponse),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/tasks/{id}")]
pub async fn get_task(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskResponse>> {
    let id: TaskId = parse_path_id(&path, NOT_FOUND)?;
    let view = state.tasks.fetch(user.id(), &id).await?;
    Ok(web::Json(view.into()))
}

/// Create a task owned by the caller.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Invalid request or unknown project", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let fields = payload.into_inner().into_fields()?;
    let task = state.tasks.create(user.id(), fields).await?;
    Ok(HttpResponse::Created().json(TaskResponse::from(task)))
}

/// Update the given fields of a task.
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[patch("/tasks/{id}")]
pub async fn update_task(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<TaskResponse>> {
    let id: TaskId = parse_path_id(&path, NOT_FOUND)?;
    let parsed = decode_body(payload.into_inner()).and_then(UpdateTaskRequest::into_patch);
    let patch = checked_patch(parsed, || state.tasks.fetch(user.id(), &id)).await?;
    let task = state.tasks.update(user.id(), &id, patch).await?;
    Ok(web::Json(task.into()))
}

/// Move a task to another board column.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}/status",
    params(("id" = Uuid, Path, description = "Task identifier")),
    request_body = TaskStatusRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskResponse),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "updateTaskStatus"
)]
#[put("/tasks/{id}/status")]
pub async fn update_task_status(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<TaskResponse>> {
    let id: TaskId = parse_path_id(&path, NOT_FOUND)?;
    let parsed = decode_body::<TaskStatusRequest>(payload.into_inner())
        .and_then(|body| Ok(TaskPatch::status_only(body.status.parse()?)));
    let patch = checked_patch(parsed, || state.tasks.fetch(user.id(), &id)).await?;
    let task = state.tasks.update(user.id(), &id, patch).await?;
    Ok(web::Json(task.into()))
}

/// Delete one of the caller's tasks.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: TaskId = parse_path_id(&path, NOT_FOUND)?;
    state.tasks.delete(user.id(), &id).await?;
    Ok(web::Json(MessageResponse::deleted("Task")))
}

#[cfg(test)]
mod tests;
