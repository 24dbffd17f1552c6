use errgate_core::families::SecurityError;
use errgate_core::{ApiErrorResponse, Failure};
use http::StatusCode;

use super::{ApiErrorMapper, FallbackMapper, MappingContext};

/// Maps [`SecurityError`] kinds through a fixed status table
///
/// Kinds missing from the table are left to the fallback mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityMapper;

impl ApiErrorMapper for SecurityMapper {
    fn can_handle(&self, failure: &dyn Failure) -> bool {
        failure
            .downcast_ref::<SecurityError>()
            .is_some_and(|err| err.kind.default_status().is_some())
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        let Some(status) = failure
            .downcast_ref::<SecurityError>()
            .and_then(|err| err.kind.default_status())
        else {
            return FallbackMapper.handle(failure, cx);
        };

        let message = cx.failure_message(failure, &[failure.simple_name().to_owned()], &[], &failure.to_string());
        ApiErrorResponse::new(cx.status(failure, status), cx.code(failure), message)
    }
}
