//! Demo order API whose handlers fail in every way the error handler knows

use axum::Json;
use axum::Router;
use axum::routing::get;
use errgate_core::families::{
    FieldBindingError, MethodArgumentNotValidError, OptimisticLockingFailureError, SecurityError,
    SecurityFailureKind,
};
use errgate_core::{ExposedProperty, Failure};
use errgate_server::{FailureResponse, JsonBody, PathParam};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order that exists in the demo store
const KNOWN_ORDER: u64 = 42;

#[derive(Debug, thiserror::Error)]
#[error("Order {order_id} was not found")]
pub struct OrderNotFoundError {
    order_id: u64,
}

impl Failure for OrderNotFoundError {
    fn declared_status(&self) -> Option<StatusCode> {
        Some(StatusCode::NOT_FOUND)
    }

    fn exposed_properties(&self) -> Vec<ExposedProperty> {
        vec![ExposedProperty::field("orderId", &self.order_id)]
    }
}

#[derive(Debug, Serialize)]
pub struct Order {
    id: u64,
    customer: String,
    quantity: i64,
    version: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrder {
    customer: Option<String>,
    quantity: Option<i64>,
}

pub fn routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/orders", axum::routing::post(create_order))
        .route("/orders/{id}", get(show_order).put(update_order))
        .route("/admin", get(admin))
}

async fn show_order(PathParam(id): PathParam<u64>) -> Result<Json<Order>, FailureResponse> {
    if id != KNOWN_ORDER {
        return Err(OrderNotFoundError { order_id: id }.into());
    }

    Ok(Json(Order {
        id,
        customer: "ACME".to_owned(),
        quantity: 3,
        version: 7,
    }))
}

async fn create_order(JsonBody(order): JsonBody<NewOrder>) -> Result<(StatusCode, Json<Order>), FailureResponse> {
    let errors = validate(&order);
    if errors.has_errors() {
        return Err(errors.into());
    }

    Ok((
        StatusCode::CREATED,
        Json(Order {
            id: KNOWN_ORDER + 1,
            customer: order.customer.unwrap_or_default(),
            quantity: order.quantity.unwrap_or_default(),
            version: 1,
        }),
    ))
}

/// Every update loses the race against a concurrent writer
async fn update_order(PathParam(id): PathParam<u64>) -> Result<StatusCode, FailureResponse> {
    Err(OptimisticLockingFailureError::new("Order", id).into())
}

async fn admin() -> Result<StatusCode, FailureResponse> {
    Err(SecurityError::new(SecurityFailureKind::AccessDenied, "Access is denied").into())
}

fn validate(order: &NewOrder) -> MethodArgumentNotValidError {
    let mut errors = MethodArgumentNotValidError::new("newOrder");

    if order.customer.as_deref().is_none_or(|customer| customer.trim().is_empty()) {
        errors = errors.with_field_error(
            FieldBindingError::new(
                "customer",
                "NotBlank",
                "must not be blank",
                order.customer.clone().map_or(Value::Null, Value::String),
            )
            .with_field_type("String"),
        );
    }

    match order.quantity {
        None => {
            errors = errors.with_field_error(FieldBindingError::new("quantity", "NotNull", "must not be null", Value::Null));
        }
        Some(quantity) if quantity < 1 => {
            errors = errors.with_field_error(
                FieldBindingError::new("quantity", "Min", "must be greater than or equal to 1", quantity)
                    .with_arguments(vec![Value::from(1)])
                    .with_field_type("i64"),
            );
        }
        Some(_) => {}
    }

    errors
}
