use errgate_core::families::{BodyParseCause, MessageNotReadableError};
use errgate_core::{ApiErrorResponse, Failure};
use http::StatusCode;
use serde_json::Value;

use super::{ApiErrorMapper, FallbackMapper, MappingContext};
use crate::{MessageArg, field_message_codes, message_codes};

/// Maps [`MessageNotReadableError`]: a request body that could not be parsed
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageNotReadableMapper;

impl ApiErrorMapper for MessageNotReadableMapper {
    fn can_handle(&self, failure: &dyn Failure) -> bool {
        failure.is::<MessageNotReadableError>()
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        let Some(err) = failure.downcast_ref::<MessageNotReadableError>() else {
            return FallbackMapper.handle(failure, cx);
        };

        let (codes, args, default) = match &err.cause {
            Some(cause) => cause_message_parts(cause),
            None => (vec![failure.simple_name().to_owned()], Vec::new(), err.message.clone()),
        };

        let message = cx.failure_message(failure, &codes, &args, &default);
        ApiErrorResponse::new(cx.status(failure, StatusCode::BAD_REQUEST), cx.code(failure), message)
    }
}

fn cause_message_parts(cause: &BodyParseCause) -> (Vec<String>, Vec<MessageArg>, String) {
    let key = cause.key();
    let object = cause.target_type().map(object_name).unwrap_or_default();

    match cause {
        BodyParseCause::UnrecognizedProperty { property, .. }
        | BodyParseCause::IgnoredProperty { property, .. }
        | BodyParseCause::PropertyBinding { property, .. } => (
            message_codes(key, &object),
            vec![MessageArg::Value(Value::String(property.clone()))],
            cause.to_string(),
        ),
        BodyParseCause::InvalidFormat { path, value, .. } => {
            let codes = match path.first() {
                Some(field) => field_message_codes(key, &object, field, None),
                None => message_codes(key, &object),
            };
            (codes, vec![MessageArg::Value(value.clone())], cause.to_string())
        }
        BodyParseCause::JsonProcessing { .. } => (vec![key.to_owned()], Vec::new(), cause.to_string()),
    }
}

/// `shop::api::CreateOrder` → `createOrder`
fn object_name(type_path: &str) -> String {
    let base = type_path.split(['[', '<']).next().unwrap_or(type_path);
    let name = errgate_core::simple_name(base);

    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_lowercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use errgate_core::Locale;
    use errgate_i18n::StaticCatalog;
    use serde_json::json;

    use super::*;
    use crate::mapper::test_support::Fixture;

    fn unrecognized() -> MessageNotReadableError {
        MessageNotReadableError::new("JSON parse error: unknown field `colour`").with_cause(
            BodyParseCause::UnrecognizedProperty {
                property: "colour".to_owned(),
                target_type: "shop::api::CreateOrder".to_owned(),
            },
        )
    }

    #[test]
    fn object_name_is_decapitalized_simple_name() {
        assert_eq!(object_name("shop::api::CreateOrder"), "createOrder");
        assert_eq!(object_name("com.example.User[\"id\"]"), "user");
        assert_eq!(object_name("alloc::vec::Vec<shop::Line>"), "vec");
        assert_eq!(object_name(""), "");
    }

    #[test]
    fn always_bad_request_with_fixed_code() {
        let response = Fixture::default().map(&MessageNotReadableMapper, &unrecognized());
        assert_eq!(response.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.code(), "MESSAGE_NOT_READABLE");
        assert_eq!(
            response.message(),
            "Unrecognized field 'colour' for shop::api::CreateOrder"
        );
    }

    #[test]
    fn cause_message_comes_from_catalog() {
        let catalog = StaticCatalog::new()
            .with_message(&Locale::root(), "UnrecognizedProperty.createOrder", "Order has no field {0}")
            .with_message(&Locale::root(), "UnrecognizedProperty", "Unknown field {0}");
        let response = Fixture::default().catalog(catalog).map(&MessageNotReadableMapper, &unrecognized());
        assert_eq!(response.message(), "Order has no field colour");
    }

    #[test]
    fn invalid_format_passes_rejected_value() {
        let err = MessageNotReadableError::new("JSON parse error").with_cause(BodyParseCause::InvalidFormat {
            path: vec!["quantity".to_owned()],
            target_type: "shop::api::CreateOrder".to_owned(),
            value: json!("lots"),
            detail: "invalid type: string \"lots\", expected u32".to_owned(),
        });
        let catalog =
            StaticCatalog::new().with_message(&Locale::root(), "InvalidFormat.createOrder.quantity", "'{0}' is no quantity");
        let response = Fixture::default().catalog(catalog).map(&MessageNotReadableMapper, &err);
        assert_eq!(response.message(), "{0} is no quantity");

        let catalog = StaticCatalog::new().with_message(&Locale::root(), "InvalidFormat.quantity", "''{0}'' is no quantity");
        let response = Fixture::default().catalog(catalog).map(&MessageNotReadableMapper, &err);
        assert_eq!(response.message(), "'lots' is no quantity");
    }

    #[test]
    fn without_cause_uses_error_text() {
        let err = MessageNotReadableError::new("Required request body is missing");
        let response = Fixture::default().map(&MessageNotReadableMapper, &err);
        assert_eq!(response.message(), "Required request body is missing");

        let catalog = StaticCatalog::new().with_message(&Locale::root(), "MessageNotReadable", "Body unreadable");
        let response = Fixture::default().catalog(catalog).map(&MessageNotReadableMapper, &err);
        assert_eq!(response.message(), "Body unreadable");
    }

    #[test]
    fn processing_error_has_no_arguments() {
        let err = MessageNotReadableError::new("JSON parse error: EOF").with_cause(BodyParseCause::JsonProcessing {
            detail: "EOF while parsing an object at line 1 column 13".to_owned(),
        });
        let response = Fixture::default().map(&MessageNotReadableMapper, &err);
        assert_eq!(response.message(), "EOF while parsing an object at line 1 column 13");
    }

    #[test]
    fn configured_status_is_respected() {
        let response = Fixture::default()
            .status("errgate::MessageNotReadable", StatusCode::UNPROCESSABLE_ENTITY)
            .map(&MessageNotReadableMapper, &unrecognized());
        assert_eq!(response.http_status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
