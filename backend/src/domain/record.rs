//! Shared shape of owned records.
//!
//! Projects, tasks, and payment appointments all carry the same envelope:
//! an identifier, the owning user, audit timestamps, and kind-specific
//! fields. The envelope is generic so the ownership guard and the stores can
//! treat every kind uniformly.

use chrono::{DateTime, Utc};
use serde_json::json;
use thiserror::Error;

use super::{Error, UserId};

/// Validation failures for record fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordValidationError {
    /// A required text field was missing or blank.
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    /// Amount was negative, NaN, or infinite.
    #[error("amount must be a finite number of at least zero")]
    InvalidAmount,
    /// Status text did not name a known status.
    #[error("{field} must be one of {allowed}, got {value:?}")]
    UnknownStatus {
        field: &'static str,
        allowed: &'static str,
        value: String,
    },
    /// A date could not be read.
    #[error("{field} must be an RFC 3339 timestamp or a YYYY-MM-DD date")]
    InvalidDate { field: &'static str },
}

impl RecordValidationError {
    /// Name of the offending payload field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::UnknownStatus { field, .. }
            | Self::InvalidDate { field } => field,
            Self::InvalidAmount => "amount",
        }
    }
}

impl From<RecordValidationError> for Error {
    fn from(value: RecordValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({ "field": value.field() }))
    }
}

/// Trimmed text that is never empty.
///
/// # Examples
/// ```
/// use clarity::domain::RequiredText;
///
/// let name = RequiredText::new("name", "  Garden  ").unwrap();
/// assert_eq!(name.as_ref(), "Garden");
/// assert!(RequiredText::new("name", "   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    /// Trim `raw`, rejecting it when nothing is left.
    pub fn new(field: &'static str, raw: &str) -> Result<Self, RecordValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::Blank { field });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Consume the wrapper.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Partial update for the kind-specific fields `F`.
pub trait FieldPatch<F> {
    /// Overwrite the fields this patch carries, leaving the rest untouched.
    fn apply_to(self, fields: &mut F);
}

/// A persisted record owned by exactly one user.
///
/// `owner` is fixed at construction; nothing on this type can reassign it.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedRecord<Id, F> {
    id: Id,
    owner: UserId,
    fields: F,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<Id, F> OwnedRecord<Id, F> {
    /// Build a fresh record stamped with `now`.
    pub fn create(id: Id, owner: UserId, fields: F, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a record read back from a store.
    pub fn restore(
        id: Id,
        owner: UserId,
        fields: F,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            fields,
            created_at,
            updated_at,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// User that created the record.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Kind-specific fields.
    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// When the record was first stored.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial update and bump `updated_at`.
    pub fn apply<P>(&mut self, patch: P, now: DateTime<Utc>)
    where
        P: FieldPatch<F>,
    {
        patch.apply_to(&mut self.fields);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Note(String);

    struct NotePatch(Option<String>);

    impl FieldPatch<Note> for NotePatch {
        fn apply_to(self, fields: &mut Note) {
            if let Some(text) = self.0 {
                fields.0 = text;
            }
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn apply_keeps_owner_and_creation_time() {
        let owner = UserId::random();
        let mut record = OwnedRecord::create(1_u8, owner, Note("a".into()), at(9));

        record.apply(NotePatch(Some("b".into())), at(10));

        assert_eq!(record.owner(), &owner);
        assert_eq!(record.fields(), &Note("b".into()));
        assert_eq!(record.created_at(), at(9));
        assert_eq!(record.updated_at(), at(10));
    }

    #[rstest]
    fn long_text_is_kept_whole() {
        let raw = "x".repeat(1_000);
        let text = RequiredText::new("title", &raw).expect("no length cap");
        assert_eq!(text.as_ref().len(), 1_000);
    }

    #[rstest]
    fn empty_patch_still_touches_timestamp() {
        let mut record = OwnedRecord::create(1_u8, UserId::random(), Note("a".into()), at(9));
        record.apply(NotePatch(None), at(11));
        assert_eq!(record.fields(), &Note("a".into()));
        assert_eq!(record.updated_at(), at(11));
    }

    #[rstest]
    fn validation_error_maps_to_invalid_request_with_field() {
        let error = Error::from(RecordValidationError::Blank { field: "title" });
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "title must not be empty");
        assert_eq!(error.details(), Some(&json!({ "field": "title" })));
    }
}
