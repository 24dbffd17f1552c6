use errgate_core::families::{ConstraintViolation, ConstraintViolationError, ElementKind};
use errgate_core::{ApiErrorResponse, ApiFieldError, ApiGlobalError, Failure};
use http::StatusCode;

use super::{ApiErrorMapper, FallbackMapper, MappingContext};
use crate::MessageArg;

/// Constraint attributes that are not passed to message templates
const INTERNAL_ATTRIBUTES: [&str; 3] = ["message", "groups", "payload"];

/// Maps [`ConstraintViolationError`] into field and global errors
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintViolationMapper;

impl ApiErrorMapper for ConstraintViolationMapper {
    fn can_handle(&self, failure: &dyn Failure) -> bool {
        failure.is::<ConstraintViolationError>()
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        let Some(err) = failure.downcast_ref::<ConstraintViolationError>() else {
            return FallbackMapper.handle(failure, cx);
        };

        let count = err.violations.len();
        let message = cx.failure_message(
            failure,
            &[failure.simple_name().to_owned()],
            &[MessageArg::value(count)],
            &format!("Validation failed. Error count: {count}"),
        );

        let mut response = ApiErrorResponse::new(cx.status(failure, StatusCode::BAD_REQUEST), cx.code(failure), message);

        for violation in &err.violations {
            match violation.path.leaf_kind() {
                Some(ElementKind::Property) => {
                    let path = violation.path.to_string();
                    response.add_field_error(ApiFieldError::new(
                        cx.field_code(&path, &violation.constraint.name),
                        path.clone(),
                        violation_message(violation, &path, cx),
                        violation.invalid_value.clone(),
                    ));
                }
                Some(ElementKind::Bean) => {
                    let path = violation.path.to_string();
                    response.add_global_error(ApiGlobalError::new(
                        cx.field_code(&path, &violation.constraint.name),
                        violation_message(violation, &path, cx),
                    ));
                }
                kind => {
                    tracing::warn!(
                        kind = ?kind,
                        path = %violation.path,
                        constraint = %violation.constraint.name,
                        "unable to convert constraint violation, dropping it"
                    );
                }
            }
        }

        response
    }
}

fn violation_message(violation: &ConstraintViolation, path: &str, cx: &MappingContext<'_>) -> String {
    let constraint = &violation.constraint.name;

    if let Some(message) = cx.field_message_override(path, constraint) {
        return message.to_owned();
    }

    // Attributes are kept in a sorted map, so arguments come out alphabetically
    let args: Vec<MessageArg> = violation
        .constraint
        .attributes
        .iter()
        .filter(|(name, _)| !INTERNAL_ATTRIBUTES.contains(&name.as_str()))
        .map(|(_, value)| MessageArg::Value(value.clone()))
        .collect();

    cx.resolve(&[constraint.clone()], &args, &violation.message)
}
