//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain records. Ownership checks live in the domain.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Async pooling**: connections come from a `bb8` pool via
//!   `diesel-async`.
//! - **Typed errors**: every Diesel failure maps to a port error variant.
//!
//! # Example
//!
//! ```no_run
//! use clarity::outbound::persistence::{DbPool, DieselProjectRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), clarity::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/clarity")).await?;
//! let projects = DieselProjectRepository::new(pool);
//! # let _ = projects;
//! # Ok(())
//! # }
//! ```

mod diesel_payment_repository;
mod diesel_project_repository;
mod diesel_task_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_payment_repository::DieselPaymentRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
