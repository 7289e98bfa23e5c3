//! Internal Diesel row structs and their conversions to domain records.
//!
//! Rows never leave the persistence layer. Reading a row back re-runs domain
//! validation, so a row edited by hand into an invalid state surfaces as a
//! query error instead of an invalid record.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RecordPersistenceError;
use crate::domain::{
    Amount, Email, PasswordHash, PaymentAppointment, PaymentFields, PaymentId, Project,
    ProjectFields, ProjectId, RequiredText, Task, TaskFields, TaskId, UserAccount, UserId,
    UserValidationError, Username,
};

use super::error_mapping::corrupt_row;
use super::schema::{payment_appointments, projects, tasks, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self::new(
            UserId::from_uuid(row.id),
            Username::new(&row.username)?,
            Email::new(&row.email)?,
            PasswordHash::from_encoded(row.password_hash),
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl<'a> From<&'a UserAccount> for NewUserRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        Self {
            id: *account.id().as_uuid(),
            username: account.username().as_ref(),
            email: account.email().as_ref(),
            password_hash: account.password_hash().as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable columns. `owner_id` and `created_at` are deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectChangeset<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        let fields = project.fields();
        Self {
            id: *project.id().as_uuid(),
            owner_id: *project.owner().as_uuid(),
            name: fields.name.as_ref().to_owned(),
            description: fields.description.clone(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

impl<'a> From<&'a Project> for ProjectChangeset<'a> {
    fn from(project: &'a Project) -> Self {
        let fields = project.fields();
        Self {
            name: fields.name.as_ref(),
            description: fields.description.as_deref(),
            updated_at: project.updated_at(),
        }
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = RecordPersistenceError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let fields = ProjectFields::try_new(&row.name, row.description)
            .map_err(|err| corrupt_row("projects", err))?;
        Ok(Self::restore(
            ProjectId::from_uuid(row.id),
            UserId::from_uuid(row.owner_id),
            fields,
            row.created_at,
            row.updated_at,
        ))
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub project_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TaskChangeset<'a> {
    pub project_id: Option<Uuid>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: &'static str,
    pub due_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        let fields = task.fields();
        Self {
            id: *task.id().as_uuid(),
            owner_id: *task.owner().as_uuid(),
            project_id: fields.project.map(|id| *id.as_uuid()),
            title: fields.title.as_ref().to_owned(),
            description: fields.description.clone(),
            status: fields.status.as_str().to_owned(),
            due_date: fields.due_date,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl<'a> From<&'a Task> for TaskChangeset<'a> {
    fn from(task: &'a Task) -> Self {
        let fields = task.fields();
        Self {
            project_id: fields.project.map(|id| *id.as_uuid()),
            title: fields.title.as_ref(),
            description: fields.description.as_deref(),
            status: fields.status.as_str(),
            due_date: fields.due_date,
            updated_at: task.updated_at(),
        }
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = RecordPersistenceError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|err| corrupt_row("tasks", err))?;
        let fields = TaskFields::try_new(
            &row.title,
            row.description,
            row.project_id.map(ProjectId::from_uuid),
            Some(status),
            row.due_date,
        )
        .map_err(|err| corrupt_row("tasks", err))?;
        Ok(Self::restore(
            TaskId::from_uuid(row.id),
            UserId::from_uuid(row.owner_id),
            fields,
            row.created_at,
            row.updated_at,
        ))
    }
}

// ---------------------------------------------------------------------------
// Payment appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = payment_appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaymentRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = payment_appointments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PaymentChangeset<'a> {
    pub title: &'a str,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: &'static str,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PaymentAppointment> for PaymentRow {
    fn from(payment: &PaymentAppointment) -> Self {
        let fields = payment.fields();
        Self {
            id: *payment.id().as_uuid(),
            owner_id: *payment.owner().as_uuid(),
            title: fields.title.as_ref().to_owned(),
            amount: fields.amount.value(),
            date: fields.date,
            status: fields.status.as_str().to_owned(),
            notes: fields.notes.clone(),
            created_at: payment.created_at(),
            updated_at: payment.updated_at(),
        }
    }
}

impl<'a> From<&'a PaymentAppointment> for PaymentChangeset<'a> {
    fn from(payment: &'a PaymentAppointment) -> Self {
        let fields = payment.fields();
        Self {
            title: fields.title.as_ref(),
            amount: fields.amount.value(),
            date: fields.date,
            status: fields.status.as_str(),
            notes: fields.notes.as_deref(),
            updated_at: payment.updated_at(),
        }
    }
}

impl TryFrom<PaymentRow> for PaymentAppointment {
    type Error = RecordPersistenceError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let corrupt = |err| corrupt_row("payment_appointments", err);
        let fields = PaymentFields {
            title: RequiredText::new("title", &row.title).map_err(corrupt)?,
            amount: Amount::new(row.amount).map_err(corrupt)?,
            date: row.date,
            status: row.status.parse().map_err(corrupt)?,
            notes: row.notes,
        };
        Ok(Self::restore(
            PaymentId::from_uuid(row.id),
            UserId::from_uuid(row.owner_id),
            fields,
            row.created_at,
            row.updated_at,
        ))
    }
}
