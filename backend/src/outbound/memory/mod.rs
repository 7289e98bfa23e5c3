//! In-memory adapters for development runs and tests.
//!
//! Used when no database url is configured. Records live in insertion-ordered
//! vectors behind a mutex, so list order matches creation order exactly as
//! the PostgreSQL adapters' `created_at, id` ordering does. Nothing survives
//! a restart.

mod records;
mod users;

pub use records::{InMemoryPaymentRepository, InMemoryProjectRepository, InMemoryTaskRepository};
pub use users::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::RecordPersistenceError;

/// Lock a store, reporting poisoning as a connection failure.
fn lock<T>(store: &Mutex<T>) -> Result<MutexGuard<'_, T>, RecordPersistenceError> {
    store
        .lock()
        .map_err(|_| RecordPersistenceError::connection("in-memory store lock poisoned"))
}
