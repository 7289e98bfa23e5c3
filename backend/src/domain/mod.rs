//! Domain primitives, records, and services.
//!
//! Purpose: define strongly typed records and the rules that govern them,
//! independent of HTTP and storage. Inbound adapters call the driving ports
//! in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure taxonomy.
//! - UserId, ProjectId, TaskId, PaymentId: opaque identifiers.
//! - Project, Task, PaymentAppointment: owned records with partial-update
//!   patches.
//! - assert_owned: the ownership guard.
//! - verify_presented_token: the token gate.
//! - CredentialIssuer, ProjectHandler, TaskHandler, PaymentHandler: services
//!   implementing the driving ports.

pub mod auth;
pub mod credential_issuer;
pub mod error;
pub mod ownership;
pub mod payment;
pub mod payment_handler;
pub mod ports;
pub mod project;
pub mod project_handler;
pub mod record;
pub mod record_id;
mod store_errors;
pub mod task;
pub mod task_handler;
pub mod token_gate;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthValidationError, LoginCredentials, RegistrationDetails, SessionToken, TokenRejection,
};
pub use self::credential_issuer::CredentialIssuer;
pub use self::error::{Error, ErrorCode};
pub use self::ownership::{NOT_AUTHORIZED_MESSAGE, assert_owned};
pub use self::payment::{Amount, PaymentAppointment, PaymentFields, PaymentPatch, PaymentStatus};
pub use self::payment_handler::PaymentHandler;
pub use self::project::{Project, ProjectFields, ProjectPatch, ProjectSummary};
pub use self::project_handler::ProjectHandler;
pub use self::record::{FieldPatch, OwnedRecord, RecordValidationError, RequiredText};
pub use self::record_id::{PaymentId, ProjectId, RecordIdError, TaskId, UserId};
pub use self::task::{Task, TaskFields, TaskPatch, TaskStatus, TaskView};
pub use self::task_handler::TaskHandler;
pub use self::token_gate::verify_presented_token;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PasswordHash, UserAccount, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use clarity::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Task not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
