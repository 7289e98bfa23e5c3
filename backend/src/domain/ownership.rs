//! Ownership guard applied before any read, update, or delete of a single
//! record.
//!
//! Policy is strict equality between the record's owner and the caller. There
//! is no delegation, sharing, or administrative override.

use std::fmt;

use tracing::warn;

use super::record::OwnedRecord;
use super::{Error, UserId};

/// Message returned to callers that do not own the record.
pub const NOT_AUTHORIZED_MESSAGE: &str = "Not authorized";

/// Reject `caller` unless it owns `record`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use clarity::domain::{assert_owned, Project, ProjectFields, ProjectId, UserId};
///
/// let alice = UserId::random();
/// let bob = UserId::random();
/// let fields = ProjectFields::try_new("P1", None).unwrap();
/// let project = Project::create(ProjectId::random(), alice, fields, Utc::now());
///
/// assert!(assert_owned(&project, &alice).is_ok());
/// assert!(assert_owned(&project, &bob).is_err());
/// ```
pub fn assert_owned<Id, F>(record: &OwnedRecord<Id, F>, caller: &UserId) -> Result<(), Error>
where
    Id: fmt::Display,
{
    if record.owner() == caller {
        return Ok(());
    }
    warn!(
        caller = %caller,
        record_id = %record.id(),
        "ownership check failed"
    );
    Err(Error::not_authorized(NOT_AUTHORIZED_MESSAGE))
}
