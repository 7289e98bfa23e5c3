//! Registration and login handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"alice","email":"alice@x.com","password":"pw1"}
//! POST /api/auth/login {"email":"alice@x.com","password":"pw1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::ApiResult;
use super::state::HttpState;
use crate::domain::{
    AuthValidationError, Error, LoginCredentials, RegistrationDetails, SessionToken,
    UserValidationError,
};

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Issued session token. Present it as `x-auth-token` on later requests.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9.e30.sig")]
    pub token: String,
}

impl From<SessionToken> for TokenResponse {
    fn from(value: SessionToken) -> Self {
        Self {
            token: value.into_inner(),
        }
    }
}

fn map_auth_validation_error(err: AuthValidationError) -> Error {
    let field = match &err {
        AuthValidationError::Identity(UserValidationError::EmptyUsername) => "username",
        AuthValidationError::Identity(_) => "email",
        AuthValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Create an account and return a session token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid request or email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload.into_inner();
    let details = RegistrationDetails::try_from_parts(&username, &email, &password)
        .map_err(map_auth_validation_error)?;
    let token = state.auth.register(details).await?;
    Ok(HttpResponse::Created().json(TokenResponse::from(token)))
}

/// Exchange email and password for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_auth_validation_error)?;
    let token = state.auth.login(credentials).await?;
    Ok(web::Json(TokenResponse::from(token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    async fn post_json(ports: MockPorts, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .service(web::scope("/api").service(register).service(login)),
        )
        .await;
        let request = actix_test::TestRequest::post().uri(uri).set_json(body).to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body = actix_test::read_body_json(response).await;
        (status, body)
    }

    #[actix_web::test]
    async fn register_returns_created_token() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_register()
            .withf(|details| details.email().as_ref() == "alice@x.com")
            .return_once(|_| Ok(SessionToken::new("t1")));

        let (status, body) = post_json(
            ports,
            "/api/auth/register",
            json!({ "username": "alice", "email": "Alice@X.com", "password": "pw1" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "token": "t1" }));
    }

    #[rstest]
    #[case(json!({ "email": "a@x.com", "password": "pw" }), "username")]
    #[case(json!({ "username": "a", "email": "not-an-email", "password": "pw" }), "email")]
    #[case(json!({ "username": "a", "email": "a@x.com" }), "password")]
    #[actix_web::test]
    async fn register_validates_before_calling_service(
        #[case] payload: Value,
        #[case] field: &str,
    ) {
        let mut ports = MockPorts::default();
        ports.auth.expect_register().never();

        let (status, body) = post_json(ports, "/api/auth/register", payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_bad_request() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_register()
            .return_once(|_| Err(Error::invalid_request("User already exists")));

        let (status, body) = post_json(
            ports,
            "/api/auth/register",
            json!({ "username": "alice", "email": "alice@x.com", "password": "pw1" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User already exists");
    }

    #[actix_web::test]
    async fn login_returns_token() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_login()
            .withf(|creds| creds.password() == "pw1")
            .return_once(|_| Ok(SessionToken::new("t2")));

        let (status, body) = post_json(
            ports,
            "/api/auth/login",
            json!({ "email": "alice@x.com", "password": "pw1" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token"], "t2");
    }

    #[actix_web::test]
    async fn bad_credentials_are_unauthorized() {
        let mut ports = MockPorts::default();
        ports
            .auth
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));

        let (status, body) = post_json(
            ports,
            "/api/auth/login",
            json!({ "email": "alice@x.com", "password": "wrong" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid credentials");
    }
}
