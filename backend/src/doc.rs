//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every REST path and DTO schema, plus the
//! `x-auth-token` header scheme used by the record routes. Swagger UI serves
//! it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest, TokenResponse};
use crate::inbound::http::payments::{
    CreatePaymentRequest, PaymentResponse, UpdatePaymentRequest,
};
use crate::inbound::http::projects::{
    CreateProjectRequest, ProjectResponse, UpdateProjectRequest,
};
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::AUTH_TOKEN_HEADER;
use crate::inbound::http::tasks::{
    CreateTaskRequest, TaskProjectRef, TaskResponse, TaskStatusRequest, UpdateTaskRequest,
};

/// Adds the token header and bearer schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AuthToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                AUTH_TOKEN_HEADER,
                "Session token returned by POST /api/auth/login or /api/auth/register.",
            ))),
        );
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Clarity API",
        description = "Personal projects, tasks, and payment appointments behind token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AuthToken" = []), ("Bearer" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::tasks::list_user_tasks,
        crate::inbound::http::tasks::list_project_tasks,
        crate::inbound::http::tasks::get_task,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::update_task_status,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::payments::list_payments,
        crate::inbound::http::payments::create_payment,
        crate::inbound::http::payments::get_payment,
        crate::inbound::http::payments::update_payment,
        crate::inbound::http::payments::delete_payment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        MessageResponse,
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        CreateProjectRequest,
        UpdateProjectRequest,
        ProjectResponse,
        CreateTaskRequest,
        UpdateTaskRequest,
        TaskStatusRequest,
        TaskProjectRef,
        TaskResponse,
        CreatePaymentRequest,
        UpdatePaymentRequest,
        PaymentResponse,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "projects", description = "The caller's projects"),
        (name = "tasks", description = "The caller's tasks"),
        (name = "payments", description = "The caller's payment appointments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
