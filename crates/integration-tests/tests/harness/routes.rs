//! Routes that fail in every way the handler knows how to map

use axum::Router;
use axum::routing::{get, post, put};
use errgate_core::families::{
    ConstraintDescriptor, ConstraintViolation, ConstraintViolationError, FieldBindingError,
    MethodArgumentNotValidError, ObjectBindingError, OptimisticLockingFailureError, PropertyPath, SecurityError,
    SecurityFailureKind,
};
use errgate_core::{ExposedProperty, Failure};
use errgate_server::{FailureResponse, JsonBody, PathParam};
use http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
#[error("Invoice {invoice_id} was not found")]
pub struct InvoiceNotFoundError {
    pub invoice_id: u64,
}

impl Failure for InvoiceNotFoundError {
    fn exposed_properties(&self) -> Vec<ExposedProperty> {
        vec![
            ExposedProperty::field("invoiceId", &self.invoice_id),
            ExposedProperty::try_accessor("customer", || Err::<String, _>("customer service unavailable")),
        ]
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Payment was declined")]
pub struct PaymentDeclinedError;

impl Failure for PaymentDeclinedError {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrderRequest {
    quantity: u32,
}

pub fn router() -> Router {
    Router::new()
        .route("/validate", post(validate))
        .route("/bind", post(bind))
        .route("/orders", post(create_order))
        .route("/orders/{id}", put(update_order))
        .route("/invoices/{id}", get(show_invoice))
        .route("/secure/denied", get(denied))
        .route("/secure/expired", get(expired))
        .route("/payments", post(pay))
}

fn request_body() -> PropertyPath {
    PropertyPath::new().method("doSomething").parameter("requestBody")
}

/// Two field violations and one cross-field violation on `requestBody`
pub fn validation_scenario() -> ConstraintViolationError {
    ConstraintViolationError::new(vec![
        ConstraintViolation::new(
            request_body().property("value"),
            ConstraintDescriptor::new("NotNull"),
            "must not be null",
            Value::Null,
        ),
        ConstraintViolation::new(
            request_body().property("value2"),
            ConstraintDescriptor::new("Size")
                .attribute("min", 5)
                .attribute("max", 2_147_483_647),
            "size must be between 5 and 2147483647",
            "abc",
        ),
        ConstraintViolation::new(
            request_body().bean(),
            ConstraintDescriptor::new("ValuesEqual"),
            "Values not equal",
            json!({"value": null, "value2": "abc"}),
        ),
    ])
}

async fn validate() -> Result<StatusCode, FailureResponse> {
    Err(validation_scenario().into())
}

async fn bind() -> Result<StatusCode, FailureResponse> {
    Err(MethodArgumentNotValidError::new("requestBody")
        .with_field_error(FieldBindingError::new("value", "NotNull", "must not be null", Value::Null))
        .with_field_error(
            FieldBindingError::new("value2", "Size", "size must be between 5 and 2147483647", "abc")
                .with_arguments(vec![json!(2_147_483_647), json!(5)])
                .with_field_type("String"),
        )
        .with_global_error(ObjectBindingError::new("ValuesEqual", "Values not equal"))
        .into())
}

async fn create_order(JsonBody(order): JsonBody<OrderRequest>) -> (StatusCode, String) {
    (StatusCode::CREATED, order.quantity.to_string())
}

async fn update_order(PathParam(id): PathParam<u64>) -> Result<StatusCode, FailureResponse> {
    Err(OptimisticLockingFailureError::new("Order", id).into())
}

async fn show_invoice(PathParam(id): PathParam<u64>) -> Result<StatusCode, FailureResponse> {
    Err(InvoiceNotFoundError { invoice_id: id }.into())
}

async fn denied() -> Result<StatusCode, FailureResponse> {
    Err(SecurityError::new(SecurityFailureKind::AccessDenied, "Access is denied").into())
}

async fn expired() -> Result<StatusCode, FailureResponse> {
    Err(SecurityError::new(SecurityFailureKind::CredentialsExpired, "User credentials have expired").into())
}

async fn pay() -> Result<StatusCode, FailureResponse> {
    Err(PaymentDeclinedError.into())
}
