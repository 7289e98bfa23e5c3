//! In-process application wired to in-memory adapters, real JWT tokens, and
//! Argon2 hashing.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::Value;

use clarity::Trace;
use clarity::domain::ports::SessionTokens;
use clarity::domain::{CredentialIssuer, PaymentHandler, ProjectHandler, TaskHandler};
use clarity::inbound::http::api_scope;
use clarity::inbound::http::session::AUTH_TOKEN_HEADER;
use clarity::inbound::http::state::HttpState;
use clarity::outbound::memory::{
    InMemoryPaymentRepository, InMemoryProjectRepository, InMemoryTaskRepository,
    InMemoryUserRepository,
};
use clarity::outbound::security::{Argon2CredentialHasher, JwtSessionTokens};

const TEST_SECRET: &[u8] = b"integration-test-secret-32-bytes";

/// Fresh handler state over empty in-memory stores.
pub fn in_memory_state() -> web::Data<HttpState> {
    let users = Arc::new(InMemoryUserRepository::default());
    let projects = Arc::new(InMemoryProjectRepository::default());
    let tasks = Arc::new(InMemoryTaskRepository::default());
    let payments = Arc::new(InMemoryPaymentRepository::default());
    let hasher = Arc::new(Argon2CredentialHasher::new().expect("hasher"));
    let tokens: Arc<dyn SessionTokens> =
        Arc::new(JwtSessionTokens::new(TEST_SECRET, Duration::from_secs(3600)));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    web::Data::new(HttpState::new(
        Arc::new(CredentialIssuer::new(users, hasher, tokens.clone())),
        Arc::new(ProjectHandler::new(projects.clone(), tasks.clone(), clock.clone())),
        Arc::new(TaskHandler::new(tasks, projects, clock.clone())),
        Arc::new(PaymentHandler::new(payments, clock)),
        tokens,
    ))
}

/// Response status, `trace-id` header, and JSON body (null when empty).
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Send one request through the traced `/api` scope.
pub async fn call(
    state: &web::Data<HttpState>,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;
    let mut request = test::TestRequest::default().method(method).uri(path);
    if let Some(token) = token {
        request = request.insert_header((AUTH_TOKEN_HEADER, token));
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let res = test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

/// Register an account and return its session token.
pub async fn register(
    state: &web::Data<HttpState>,
    name: &str,
    email: &str,
    password: &str,
) -> String {
    let reply = call(
        state,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({ "username": name, "email": email, "password": password })),
    )
    .await;
    assert_eq!(
        reply.status,
        StatusCode::CREATED,
        "register {email}: {}",
        reply.body
    );
    reply.body["token"]
        .as_str()
        .expect("token in register response")
        .to_owned()
}
