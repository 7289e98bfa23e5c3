//! Payment appointment handlers.
//!
//! ```text
//! GET    /api/payments
//! POST   /api/payments {"title":"Rent","amount":950,"date":"2024-04-01"}
//! GET    /api/payments/{id}
//! PATCH  /api/payments/{id} {"status":"Paid"}
//! DELETE /api/payments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::ApiResult;
use super::schemas::MessageResponse;
use super::session::AuthenticatedUser;
use super::state::HttpState;
use super::validation::{
    checked_patch, decode_body, missing_field_error, parse_date, parse_optional,
    parse_optional_date, parse_path_id,
};
use crate::domain::{
    Amount, Error, PaymentAppointment, PaymentFields, PaymentId, PaymentPatch, PaymentStatus,
    RequiredText,
};

const NOT_FOUND: &str = "Payment not found";

/// Body for creating a payment appointment.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[serde(default)]
    #[schema(example = "Rent")]
    pub title: String,
    #[schema(example = 950.0)]
    pub amount: Option<f64>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    #[schema(example = "2024-04-01")]
    pub date: Option<String>,
    #[schema(example = "Pending")]
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; absent or null fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[schema(example = "Pending")]
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PaymentAppointment> for PaymentResponse {
    fn from(payment: PaymentAppointment) -> Self {
        let fields = payment.fields();
        Self {
            id: *payment.id().as_uuid(),
            owner: *payment.owner().as_uuid(),
            title: fields.title.as_ref().to_owned(),
            amount: fields.amount.value(),
            date: fields.date,
            status: fields.status.as_str().to_owned(),
            notes: fields.notes.clone(),
            created_at: payment.created_at(),
            updated_at: payment.updated_at(),
        }
    }
}

impl CreatePaymentRequest {
    fn into_fields(self) -> Result<PaymentFields, Error> {
        let amount = self.amount.ok_or_else(|| missing_field_error("amount"))?;
        let date = self
            .date
            .as_deref()
            .ok_or_else(|| missing_field_error("date"))
            .and_then(|raw| parse_date("date", raw).map_err(Error::from))?;
        let status = parse_optional::<PaymentStatus>(self.status.as_deref())?;
        Ok(PaymentFields::try_new(
            &self.title,
            amount,
            date,
            status,
            self.notes,
        )?)
    }
}

impl UpdatePaymentRequest {
    fn into_patch(self) -> Result<PaymentPatch, Error> {
        Ok(PaymentPatch {
            title: self
                .title
                .as_deref()
                .map(|raw| RequiredText::new("title", raw))
                .transpose()?,
            amount: self.amount.map(Amount::new).transpose()?,
            date: parse_optional_date("date", self.date.as_deref())?,
            status: parse_optional::<PaymentStatus>(self.status.as_deref())?,
            notes: self.notes,
        })
    }
}

/// List the caller's payment appointments.
#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "Caller's payment appointments", body = [PaymentResponse]),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "listPayments"
)]
#[get("/payments")]
pub async fn list_payments(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PaymentResponse>>> {
    let payments = state.payments.list(user.id()).await?;
    Ok(web::Json(payments.into_iter().map(Into::into).collect()))
}

/// Create a payment appointment owned by the caller.
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment appointment created", body = PaymentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["payments"],
    operation_id = "createPayment"
)]
#[post("/payments")]
pub async fn create_payment(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreatePaymentRequest>,
) -> ApiResult<HttpResponse> {
    let fields = payload.into_inner().into_fields()?;
    let payment = state.payments.create(user.id(), fields).await?;
    Ok(HttpResponse::Created().json(PaymentResponse::from(payment)))
}

/// Fetch one of the caller's payment appointments.
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment appointment identifier")),
    responses(
        (status = 200, description = "Payment appointment", body = PaymentResponse),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["payments"],
    operation_id = "getPayment"
)]
#[get("/payments/{id}")]
pub async fn get_payment(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PaymentResponse>> {
    let id: PaymentId = parse_path_id(&path, NOT_FOUND)?;
    let payment = state.payments.fetch(user.id(), &id).await?;
    Ok(web::Json(payment.into()))
}

/// Update the given fields of a payment appointment.
#[utoipa::path(
    patch,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment appointment identifier")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Updated payment appointment", body = PaymentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["payments"],
    operation_id = "updatePayment"
)]
#[patch("/payments/{id}")]
pub async fn update_payment(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<PaymentResponse>> {
    let id: PaymentId = parse_path_id(&path, NOT_FOUND)?;
    let parsed = decode_body(payload.into_inner()).and_then(UpdatePaymentRequest::into_patch);
    let patch = checked_patch(parsed, || state.payments.fetch(user.id(), &id)).await?;
    let payment = state.payments.update(user.id(), &id, patch).await?;
    Ok(web::Json(payment.into()))
}

/// Delete one of the caller's payment appointments.
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment appointment identifier")),
    responses(
        (status = 200, description = "Payment appointment deleted", body = MessageResponse),
        (status = 401, description = "Missing token or not the owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "deletePayment"
)]
#[delete("/payments/{id}")]
pub async fn delete_payment(
    user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id: PaymentId = parse_path_id(&path, NOT_FOUND)?;
    state.payments.delete(user.id(), &id).await?;
    Ok(web::Json(MessageResponse::deleted("Payment")))
}
