//! Tasks: the cards on a user's board.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::record::{FieldPatch, OwnedRecord, RecordValidationError, RequiredText};
use super::{ProjectId, ProjectSummary, TaskId};

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    ToDo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    const ALLOWED: &'static str = "\"To Do\", \"In Progress\", \"Done\"";

    /// Wire and storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = RecordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(Self::ToDo),
            "In Progress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            other => Err(RecordValidationError::UnknownStatus {
                field: "status",
                allowed: Self::ALLOWED,
                value: other.to_owned(),
            }),
        }
    }
}

/// Kind-specific fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: RequiredText,
    pub description: Option<String>,
    pub project: Option<ProjectId>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskFields {
    /// Validate the title; everything else is already typed.
    ///
    /// # Examples
    /// ```
    /// use clarity::domain::{TaskFields, TaskStatus};
    ///
    /// let fields = TaskFields::try_new("t1", None, None, None, None).unwrap();
    /// assert_eq!(fields.status, TaskStatus::ToDo);
    /// ```
    pub fn try_new(
        title: &str,
        description: Option<String>,
        project: Option<ProjectId>,
        status: Option<TaskStatus>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Self, RecordValidationError> {
        Ok(Self {
            title: RequiredText::new("title", title)?,
            description,
            project,
            status: status.unwrap_or_default(),
            due_date,
        })
    }
}

/// A user's task.
pub type Task = OwnedRecord<TaskId, TaskFields>;

/// Partial update for a task; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<RequiredText>,
    pub description: Option<String>,
    pub project: Option<ProjectId>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Patch that only moves the task to another column.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl FieldPatch<TaskFields> for TaskPatch {
    fn apply_to(self, fields: &mut TaskFields) {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(description) = self.description {
            fields.description = Some(description);
        }
        if let Some(project) = self.project {
            fields.project = Some(project);
        }
        if let Some(status) = self.status {
            fields.status = status;
        }
        if let Some(due_date) = self.due_date {
            fields.due_date = Some(due_date);
        }
    }
}

/// A task with its project reference resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
    pub task: Task,
    pub project: Option<ProjectSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("To Do", TaskStatus::ToDo)]
    #[case("In Progress", TaskStatus::InProgress)]
    #[case("Done", TaskStatus::Done)]
    fn status_labels_parse(#[case] label: &str, #[case] expected: TaskStatus) {
        assert_eq!(label.parse::<TaskStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), label);
    }

    #[rstest]
    #[case("done")]
    #[case("todo")]
    #[case("")]
    fn unknown_status_is_rejected(#[case] label: &str) {
        let err = label.parse::<TaskStatus>().expect_err("unknown label");
        assert_eq!(err.field(), "status");
    }

    #[rstest]
    fn status_patch_leaves_other_fields_alone() {
        let due = Utc
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .single()
            .expect("valid date");
        let fields = TaskFields::try_new(
            "t1",
            Some("describe".into()),
            Some(ProjectId::random()),
            None,
            Some(due),
        )
        .expect("valid");
        let before = fields.clone();
        let mut task = Task::create(TaskId::random(), UserId::random(), fields, Utc::now());

        task.apply(TaskPatch::status_only(TaskStatus::Done), Utc::now());

        let after = task.fields();
        assert_eq!(after.status, TaskStatus::Done);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.project, before.project);
        assert_eq!(after.due_date, before.due_date);
    }

    #[rstest]
    fn blank_title_is_rejected() {
        assert_eq!(
            TaskFields::try_new("\n", None, None, None, None),
            Err(RecordValidationError::Blank { field: "title" })
        );
    }
}
