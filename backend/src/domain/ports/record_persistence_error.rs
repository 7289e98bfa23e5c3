//! Error shared by the owned-record repositories.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by project, task, and payment repositories.
    pub enum RecordPersistenceError {
        /// Store connection could not be established.
        Connection { message: String } => connection, "record store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => query, "record store query failed: {message}",
    }
}
