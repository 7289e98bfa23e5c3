//! Projects group tasks under a display name.

use super::record::{FieldPatch, OwnedRecord, RecordValidationError, RequiredText};
use super::ProjectId;

/// Kind-specific fields of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: RequiredText,
    pub description: Option<String>,
}

impl ProjectFields {
    /// Validate creation input.
    ///
    /// # Examples
    /// ```
    /// use clarity::domain::ProjectFields;
    ///
    /// let fields = ProjectFields::try_new("P1", None).unwrap();
    /// assert_eq!(fields.name.as_ref(), "P1");
    /// ```
    pub fn try_new(name: &str, description: Option<String>) -> Result<Self, RecordValidationError> {
        Ok(Self {
            name: RequiredText::new("name", name)?,
            description,
        })
    }
}

/// A user's project.
pub type Project = OwnedRecord<ProjectId, ProjectFields>;

/// Partial update for a project; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<RequiredText>,
    pub description: Option<String>,
}

impl ProjectPatch {
    /// Validate update input.
    pub fn try_new(
        name: Option<&str>,
        description: Option<String>,
    ) -> Result<Self, RecordValidationError> {
        Ok(Self {
            name: name.map(|raw| RequiredText::new("name", raw)).transpose()?,
            description,
        })
    }
}

impl FieldPatch<ProjectFields> for ProjectPatch {
    fn apply_to(self, fields: &mut ProjectFields) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(description) = self.description {
            fields.description = Some(description);
        }
    }
}

/// Project reference joined onto tasks for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: *project.id(),
            name: project.fields().name.as_ref().to_owned(),
        }
    }
}
