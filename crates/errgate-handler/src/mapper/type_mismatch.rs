use errgate_core::families::TypeMismatchError;
use errgate_core::{ApiErrorResponse, Failure};
use http::StatusCode;
use serde_json::Value;

use super::{ApiErrorMapper, FallbackMapper, MappingContext};
use crate::{MessageArg, Resolvable, field_message_codes, message_codes};

/// Maps [`TypeMismatchError`]: a request value of the wrong type
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMismatchMapper;

impl ApiErrorMapper for TypeMismatchMapper {
    fn can_handle(&self, failure: &dyn Failure) -> bool {
        failure.is::<TypeMismatchError>()
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        let Some(err) = failure.downcast_ref::<TypeMismatchError>() else {
            return FallbackMapper.handle(failure, cx);
        };

        let message = message(failure, err, cx);
        let mut response = ApiErrorResponse::new(cx.status(failure, StatusCode::BAD_REQUEST), cx.code(failure), message);

        let property = err.argument.as_ref().or(err.property.as_ref());
        response.add_error_property("property", property.map_or(Value::Null, |p| Value::String(p.clone())));
        response.add_error_property("rejectedValue", err.value.clone());
        response.add_error_property(
            "expectedType",
            err.required_type.as_ref().map_or(Value::Null, |t| Value::String(t.clone())),
        );

        response
    }
}

fn message(failure: &dyn Failure, err: &TypeMismatchError, cx: &MappingContext<'_>) -> String {
    let simple = failure.simple_name();
    let default = failure.to_string();

    let (codes, args) = match (&err.argument, &err.property) {
        (Some(argument), field) => {
            let codes = match field {
                Some(field) => field_message_codes(simple, argument, field, err.required_type.as_deref()),
                None => message_codes(simple, argument),
            };
            let field_arg = field.as_ref().map_or(MessageArg::Value(Value::Null), |field| {
                MessageArg::from(Resolvable::named(field))
            });
            let args = vec![
                MessageArg::from(Resolvable::named(argument)),
                field_arg,
                MessageArg::from(err.required_type.clone().map_or(Value::Null, Value::String)),
                MessageArg::Value(err.value.clone()),
            ];
            (codes, args)
        }
        (None, Some(property)) => (
            message_codes(simple, property),
            vec![MessageArg::from(Resolvable::named(property)), MessageArg::Value(err.value.clone())],
        ),
        (None, None) => (
            vec![simple.to_owned()],
            vec![MessageArg::Value(Value::Null), MessageArg::Value(err.value.clone())],
        ),
    };

    cx.failure_message(failure, &codes, &args, &default)
}
