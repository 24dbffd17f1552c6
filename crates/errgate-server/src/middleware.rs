use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use errgate_handler::ErrorHandler;
use http::StatusCode;

use crate::{ApiErrorBody, PendingFailure, request_locale};

/// Replace failure placeholders with mapped error payloads
///
/// The locale is taken from the request before it is handed on. Responses
/// without a [`PendingFailure`] pass through untouched. When the handler is
/// disabled the placeholder becomes a bare 500.
pub async fn error_handling_middleware(
    State(handler): State<Arc<ErrorHandler>>,
    request: Request,
    next: Next,
) -> Response {
    let locale = request_locale(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let Some(pending) = response.extensions_mut().remove::<PendingFailure>() else {
        return response;
    };

    if !handler.is_enabled() {
        tracing::debug!(%method, path, failure = pending.failure().type_key(), "error mapping disabled");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    ApiErrorBody(handler.handle(pending.failure(), &locale)).into_response()
}
