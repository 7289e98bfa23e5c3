//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Every record route sits under `/api` and requires a session token; the
//! auth routes under the same prefix do not. Health probes are mounted at
//! the root by the server.

pub mod auth;
pub mod error;
pub mod health;
pub mod payments;
pub mod projects;
pub mod schemas;
pub mod session;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Build the `/api` scope with every auth and record route.
///
/// Malformed JSON bodies are reported through the domain error shape.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(auth::register)
        .service(auth::login)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::get_project)
        .service(projects::update_project)
        .service(projects::delete_project)
        // Fixed task paths before `/tasks/{id}`.
        .service(tasks::list_user_tasks)
        .service(tasks::list_project_tasks)
        .service(tasks::get_task)
        .service(tasks::create_task)
        .service(tasks::update_task)
        .service(tasks::update_task_status)
        .service(tasks::delete_task)
        .service(payments::list_payments)
        .service(payments::create_payment)
        .service(payments::get_payment)
        .service(payments::update_payment)
        .service(payments::delete_payment)
}
