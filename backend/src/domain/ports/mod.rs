//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`) are called by inbound adapters. Driven ports
//! (repositories, token signing, password hashing) are implemented by
//! outbound adapters. Each driven port exposes a strongly typed error so
//! adapters map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod credential_hasher;
mod payment_repository;
mod payment_service;
mod project_repository;
mod project_service;
mod record_persistence_error;
mod session_tokens;
mod task_repository;
mod task_service;
mod user_repository;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::AuthService;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
pub use payment_repository::PaymentRepository;
#[cfg(test)]
pub use payment_service::MockPaymentService;
pub use payment_service::PaymentService;
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::ProjectRepository;
#[cfg(test)]
pub use project_service::MockProjectService;
pub use project_service::ProjectService;
pub use record_persistence_error::RecordPersistenceError;
#[cfg(test)]
pub use session_tokens::MockSessionTokens;
pub use session_tokens::{SessionTokens, TokenIssueError};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::TaskRepository;
#[cfg(test)]
pub use task_service::MockTaskService;
pub use task_service::TaskService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
