//! Family, fallback and custom mappers through the HTTP stack

mod harness;

use errgate_config::CodeStrategy;
use errgate_core::{ApiErrorResponse, Failure};
use errgate_handler::{ApiErrorMapper, MappingContext};
use harness::config::ConfigBuilder;
use harness::routes::{InvoiceNotFoundError, PaymentDeclinedError};
use harness::server::TestServer;
use http::StatusCode;
use serde_json::{Value, json};

async fn send(request: reqwest::RequestBuilder) -> (u16, Value) {
    let resp = request.send().await.unwrap();
    let status = resp.status().as_u16();
    let bytes = resp.bytes().await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn optimistic_lock_is_a_conflict() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, body) = send(server.client().put(server.url("/orders/42"))).await;

    assert_eq!(status, 409);
    assert_eq!(
        body,
        json!({
            "code": "OPTIMISTIC_LOCKING_ERROR",
            "message": "Object of class [Order] with identifier [42]: optimistic locking failed",
            "identifier": 42,
            "persistentClassName": "Order"
        })
    );
}

#[tokio::test]
async fn unknown_failure_falls_back_to_500_with_properties() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, body) = send(server.client().get(server.url("/invoices/7"))).await;

    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({
            "code": "INVOICE_NOT_FOUND_ERROR",
            "message": "Invoice 7 was not found",
            "invoiceId": 7
        })
    );
}

#[tokio::test]
async fn fallback_status_code_and_message_are_configurable() {
    let key = std::any::type_name::<InvoiceNotFoundError>();
    let config = ConfigBuilder::new()
        .with_status(key, StatusCode::NOT_FOUND)
        .with_code(key, "INVOICE_MISSING")
        .with_message(key, "No such invoice")
        .build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = send(server.client().get(server.url("/invoices/7"))).await;

    assert_eq!(status, 404);
    assert_eq!(body["code"], "INVOICE_MISSING");
    assert_eq!(body["message"], "No such invoice");
}

#[tokio::test]
async fn full_qualified_name_strategy_uses_type_key() {
    let config = ConfigBuilder::new()
        .with_strategy(CodeStrategy::FullQualifiedName)
        .build();
    let server = TestServer::start(config).await.unwrap();

    let (_, body) = send(server.client().get(server.url("/invoices/7"))).await;
    assert_eq!(body["code"], std::any::type_name::<InvoiceNotFoundError>());
}

#[tokio::test]
async fn security_failures_use_their_table_status() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, body) = send(server.client().get(server.url("/secure/denied"))).await;
    assert_eq!(status, 403);
    assert_eq!(body["code"], "ACCESS_DENIED");
    assert_eq!(body["message"], "Access is denied");

    let (status, body) = send(server.client().get(server.url("/secure/expired"))).await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], "CREDENTIALS_EXPIRED");
}

#[tokio::test]
async fn malformed_body_is_not_readable() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let request = server
        .client()
        .post(server.url("/orders"))
        .header("content-type", "application/json")
        .body("{\"quantity\": ");
    let (status, body) = send(request).await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], "MESSAGE_NOT_READABLE");
}

#[tokio::test]
async fn well_formed_body_reaches_the_handler() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/orders"))
        .json(&json!({"quantity": 3}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    assert_eq!(resp.text().await.unwrap(), "3");
}

#[tokio::test]
async fn unparsable_path_parameter_is_type_mismatch() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, body) = send(server.client().put(server.url("/orders/abc"))).await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], "TYPE_MISMATCH");
    assert_eq!(body["property"], "id");
    assert_eq!(body["rejectedValue"], "abc");
    assert_eq!(body["expectedType"], "u64");
}

struct PaymentMapper;

impl ApiErrorMapper for PaymentMapper {
    fn can_handle(&self, failure: &dyn Failure) -> bool {
        failure.is::<PaymentDeclinedError>()
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        ApiErrorResponse::new(
            cx.status(failure, StatusCode::PAYMENT_REQUIRED),
            "PAYMENT_DECLINED",
            failure.to_string(),
        )
    }
}

#[tokio::test]
async fn custom_mapper_is_consulted_first() {
    let server = TestServer::start_with_mapper(ConfigBuilder::new().build(), PaymentMapper)
        .await
        .unwrap();

    let (status, body) = send(server.client().post(server.url("/payments"))).await;

    assert_eq!(status, 402);
    assert_eq!(body, json!({"code": "PAYMENT_DECLINED", "message": "Payment was declined"}));
}
