//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, PaymentService, ProjectService, SessionTokens, TaskService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub projects: Arc<dyn ProjectService>,
    pub tasks: Arc<dyn TaskService>,
    pub payments: Arc<dyn PaymentService>,
    /// Verifier consulted by the [`AuthenticatedUser`](super::session::AuthenticatedUser)
    /// extractor.
    pub tokens: Arc<dyn SessionTokens>,
}

impl HttpState {
    pub fn new(
        auth: Arc<dyn AuthService>,
        projects: Arc<dyn ProjectService>,
        tasks: Arc<dyn TaskService>,
        payments: Arc<dyn PaymentService>,
        tokens: Arc<dyn SessionTokens>,
    ) -> Self {
        Self {
            auth,
            projects,
            tasks,
            payments,
            tokens,
        }
    }
}
