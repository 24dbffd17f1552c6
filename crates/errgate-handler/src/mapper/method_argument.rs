use errgate_core::families::{FieldBindingError, MethodArgumentNotValidError, ObjectBindingError};
use errgate_core::{ApiErrorResponse, ApiFieldError, ApiGlobalError, Failure};
use http::StatusCode;

use super::{ApiErrorMapper, FallbackMapper, MappingContext};
use crate::{MessageArg, Resolvable, field_message_codes, message_codes};

/// Maps [`MethodArgumentNotValidError`]: a bound handler argument failed
/// validation
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodArgumentNotValidMapper;

impl ApiErrorMapper for MethodArgumentNotValidMapper {
    fn can_handle(&self, failure: &dyn Failure) -> bool {
        failure.is::<MethodArgumentNotValidError>()
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        let Some(err) = failure.downcast_ref::<MethodArgumentNotValidError>() else {
            return FallbackMapper.handle(failure, cx);
        };

        let object = err.object_name.as_str();
        let count = err.error_count();
        let message = cx.failure_message(
            failure,
            &message_codes(failure.simple_name(), object),
            &[MessageArg::from(Resolvable::named(object)), MessageArg::value(count)],
            &format!("Validation failed for object='{object}'. Error count: {count}"),
        );

        let mut response = ApiErrorResponse::new(cx.status(failure, StatusCode::BAD_REQUEST), cx.code(failure), message);

        for error in &err.field_errors {
            response.add_field_error(ApiFieldError::new(
                cx.field_code(&error.field, &error.code),
                error.field.clone(),
                field_message(object, error, cx),
                error.rejected_value.clone(),
            ));
        }

        for error in &err.global_errors {
            response.add_global_error(ApiGlobalError::new(
                cx.bare_code(&error.code),
                global_message(object, error, cx),
            ));
        }

        response
    }
}

fn field_message(object: &str, error: &FieldBindingError, cx: &MappingContext<'_>) -> String {
    if let Some(message) = cx.field_message_override(&error.field, &error.code) {
        return message.to_owned();
    }

    let field_name = Resolvable::new(vec![format!("{object}.{}", error.field), error.field.clone()], &error.field);
    let args: Vec<MessageArg> = std::iter::once(MessageArg::from(field_name))
        .chain(error.arguments.iter().cloned().map(MessageArg::Value))
        .collect();

    let codes = field_message_codes(&error.code, object, &error.field, error.field_type.as_deref());
    cx.resolve(&codes, &args, &error.default_message)
}

fn global_message(object: &str, error: &ObjectBindingError, cx: &MappingContext<'_>) -> String {
    if let Some(message) = cx.message_override(&error.code) {
        return message.to_owned();
    }

    let args: Vec<MessageArg> = std::iter::once(MessageArg::from(Resolvable::named(object)))
        .chain(error.arguments.iter().cloned().map(MessageArg::Value))
        .collect();

    cx.resolve(&message_codes(&error.code, object), &args, &error.default_message)
}
