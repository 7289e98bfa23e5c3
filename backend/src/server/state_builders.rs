//! Adapter selection: PostgreSQL repositories when a pool is configured,
//! in-memory ones otherwise.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use clarity::domain::ports::{
    CredentialHashError, PaymentRepository, ProjectRepository, SessionTokens, TaskRepository,
    UserRepository,
};
use clarity::domain::{CredentialIssuer, PaymentHandler, ProjectHandler, TaskHandler};
use clarity::inbound::http::state::HttpState;
use clarity::outbound::memory::{
    InMemoryPaymentRepository, InMemoryProjectRepository, InMemoryTaskRepository,
    InMemoryUserRepository,
};
use clarity::outbound::persistence::{
    DieselPaymentRepository, DieselProjectRepository, DieselTaskRepository, DieselUserRepository,
};
use clarity::outbound::security::Argon2CredentialHasher;

use super::ServerConfig;

/// One repository per record kind.
struct Repositories<U, P, T, Pay> {
    users: Arc<U>,
    projects: Arc<P>,
    tasks: Arc<T>,
    payments: Arc<Pay>,
}

impl<U, P, T, Pay> Repositories<U, P, T, Pay>
where
    U: UserRepository + 'static,
    P: ProjectRepository + 'static,
    T: TaskRepository + 'static,
    Pay: PaymentRepository + 'static,
{
    /// Put the domain services in front of the repositories.
    fn into_state(
        self,
        hasher: Arc<Argon2CredentialHasher>,
        tokens: Arc<dyn SessionTokens>,
        clock: Arc<dyn Clock>,
    ) -> HttpState {
        let Self {
            users,
            projects,
            tasks,
            payments,
        } = self;
        HttpState::new(
            Arc::new(CredentialIssuer::new(users, hasher, tokens.clone())),
            Arc::new(ProjectHandler::new(
                projects.clone(),
                tasks.clone(),
                clock.clone(),
            )),
            Arc::new(TaskHandler::new(tasks, projects, clock.clone())),
            Arc::new(PaymentHandler::new(payments, clock)),
            tokens,
        )
    }
}

/// Build the shared handler state for the configured storage.
///
/// # Errors
/// Returns [`CredentialHashError`] if the password hasher cannot be
/// initialised.
pub(super) fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, CredentialHashError> {
    let hasher = Arc::new(Argon2CredentialHasher::new()?);
    let tokens: Arc<dyn SessionTokens> = Arc::new(config.tokens.clone());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let state = match &config.db_pool {
        Some(pool) => Repositories {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            projects: Arc::new(DieselProjectRepository::new(pool.clone())),
            tasks: Arc::new(DieselTaskRepository::new(pool.clone())),
            payments: Arc::new(DieselPaymentRepository::new(pool.clone())),
        }
        .into_state(hasher, tokens, clock),
        None => {
            warn!("no database configured; records are kept in memory and lost on restart");
            Repositories {
                users: Arc::new(InMemoryUserRepository::default()),
                projects: Arc::new(InMemoryProjectRepository::default()),
                tasks: Arc::new(InMemoryTaskRepository::default()),
                payments: Arc::new(InMemoryPaymentRepository::default()),
            }
            .into_state(hasher, tokens, clock)
        }
    };
    Ok(web::Data::new(state))
}
