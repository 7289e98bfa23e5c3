//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use uuid::Uuid;

use super::state::HttpState;
use crate::domain::ports::{
    MockAuthService, MockPaymentService, MockProjectService, MockSessionTokens, MockTaskService,
};
use crate::domain::{TokenRejection, UserId};

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

pub fn alice() -> UserId {
    UserId::from_uuid(Uuid::from_u128(0xa11ce))
}

pub fn bob() -> UserId {
    UserId::from_uuid(Uuid::from_u128(0xb0b))
}

/// Token verifier that knows Alice and Bob and rejects everything else.
pub fn known_tokens() -> MockSessionTokens {
    let mut tokens = MockSessionTokens::new();
    tokens.expect_verify().returning(|token| match token {
        ALICE_TOKEN => Ok(alice()),
        BOB_TOKEN => Ok(bob()),
        _ => Err(TokenRejection::Invalid),
    });
    tokens
}

/// Mocked ports for handler tests. Unconfigured mocks panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub auth: MockAuthService,
    pub projects: MockProjectService,
    pub tasks: MockTaskService,
    pub payments: MockPaymentService,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.auth),
            Arc::new(self.projects),
            Arc::new(self.tasks),
            Arc::new(self.payments),
            Arc::new(known_tokens()),
        )
    }
}

pub fn test_state() -> HttpState {
    MockPorts::default().into_state()
}

/// Run one request through the full `/api` scope and decode the JSON body.
///
/// Empty bodies decode as `Value::Null`.
pub async fn send(
    ports: MockPorts,
    request: actix_web::test::TestRequest,
) -> (actix_web::http::StatusCode, serde_json::Value) {
    use actix_web::{App, test, web};

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(super::api_scope()),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, body)
}
