//! Outbound adapters implementing the driven ports.
//!
//! - [`persistence`]: PostgreSQL repositories on Diesel.
//! - [`memory`]: process-local repositories for development and tests.
//! - [`security`]: session-token signing and password hashing.

pub mod memory;
pub mod persistence;
pub mod security;
