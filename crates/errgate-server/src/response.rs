use std::sync::Arc;

use axum::Json;
use axum::response::{IntoResponse, Response};
use errgate_core::{ApiErrorResponse, Failure};
use http::StatusCode;

/// Rendered error payload: the mapped status with the JSON body
#[derive(Debug, Clone)]
pub struct ApiErrorBody(pub ApiErrorResponse);

impl IntoResponse for ApiErrorBody {
    fn into_response(self) -> Response {
        (self.0.http_status(), Json(self.0)).into_response()
    }
}

impl From<ApiErrorResponse> for ApiErrorBody {
    fn from(response: ApiErrorResponse) -> Self {
        Self(response)
    }
}

/// Failure returned by a handler or extractor
///
/// Renders as a bare 500 that carries the failure in its extensions;
/// [`error_handling_middleware`](crate::error_handling_middleware) swaps it
/// for the mapped payload.
#[derive(Debug, Clone)]
pub struct FailureResponse(Arc<dyn Failure>);

impl FailureResponse {
    pub fn failure(&self) -> &dyn Failure {
        self.0.as_ref()
    }
}

impl<F: Failure> From<F> for FailureResponse {
    fn from(failure: F) -> Self {
        Self(Arc::new(failure))
    }
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(PendingFailure(self.0));
        response
    }
}

/// Response extension holding a failure that has not been mapped yet
#[derive(Debug, Clone)]
pub struct PendingFailure(pub(crate) Arc<dyn Failure>);

impl PendingFailure {
    pub fn failure(&self) -> &dyn Failure {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use errgate_core::families::OptimisticLockingFailureError;
    use http_body_util::BodyExt;

    use super::*;

    #[tokio::test]
    async fn failure_renders_as_placeholder() {
        let response = FailureResponse::from(OptimisticLockingFailureError::new("Order", 42)).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let pending = response.extensions().get::<PendingFailure>().unwrap();
        assert!(pending.failure().is::<OptimisticLockingFailureError>());

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn payload_renders_status_and_json() {
        let mut payload = ApiErrorResponse::new(StatusCode::CONFLICT, "OPTIMISTIC_LOCKING_ERROR", "stale");
        payload.add_error_property("identifier", 42);

        let response = ApiErrorBody(payload).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response.headers()[http::header::CONTENT_TYPE], "application/json");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": "OPTIMISTIC_LOCKING_ERROR", "message": "stale", "identifier": 42})
        );
    }
}
