//! Opaque identifiers for users and owned records.
//!
//! Every identifier is a UUID underneath, but each record kind gets its own
//! newtype so a task id can never be passed where a project id is expected.

use thiserror::Error;

/// Raised when text cannot be read as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} id must be a UUID, got {value:?}")]
pub struct RecordIdError {
    kind: &'static str,
    value: String,
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID, e.g. one read back from storage.
            #[must_use]
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Parse the textual form used on the wire.
            pub fn parse(value: &str) -> Result<Self, RecordIdError> {
                ::uuid::Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| RecordIdError {
                        kind: $kind,
                        value: value.to_owned(),
                    })
            }

            /// Borrow the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = RecordIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_record_id! {
    /// Identity carried inside session tokens and stamped on owned records.
    UserId, "user"
}

define_record_id! {
    /// Identifier of a [`Project`](super::Project).
    ProjectId, "project"
}

define_record_id! {
    /// Identifier of a [`Task`](super::Task).
    TaskId, "task"
}

define_record_id! {
    /// Identifier of a [`PaymentAppointment`](super::PaymentAppointment).
    PaymentId, "payment"
}
