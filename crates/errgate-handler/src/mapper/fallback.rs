use errgate_core::{ApiErrorResponse, Failure};
use http::StatusCode;

use super::{ApiErrorMapper, MappingContext};
use crate::{MessageArg, Resolvable};

/// Maps any failure; consulted after every other mapper
///
/// The response carries the properties the failure exposes. Each property
/// is also passed to the message template as a pair of arguments: its
/// (localizable) name followed by its value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackMapper;

impl ApiErrorMapper for FallbackMapper {
    fn can_handle(&self, _failure: &dyn Failure) -> bool {
        true
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        let properties = cx.properties(failure);

        let args: Vec<MessageArg> = properties
            .iter()
            .flat_map(|(name, value)| [MessageArg::from(Resolvable::named(name)), MessageArg::Value(value.clone())])
            .collect();

        let message = cx.failure_message(failure, &[failure.simple_name().to_owned()], &args, &failure.to_string());

        let mut response = ApiErrorResponse::new(
            cx.status(failure, StatusCode::INTERNAL_SERVER_ERROR),
            cx.code(failure),
            message,
        );
        response.add_error_properties(properties);
        response
    }
}
