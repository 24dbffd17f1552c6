use errgate_core::families::OptimisticLockingFailureError;
use errgate_core::{ApiErrorResponse, Failure};
use http::StatusCode;

use super::{ApiErrorMapper, FallbackMapper, MappingContext};
use crate::{MessageArg, Resolvable, message_codes};

/// Maps [`OptimisticLockingFailureError`] to a conflict
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimisticLockingMapper;

impl ApiErrorMapper for OptimisticLockingMapper {
    fn can_handle(&self, failure: &dyn Failure) -> bool {
        failure.is::<OptimisticLockingFailureError>()
    }

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse {
        let Some(err) = failure.downcast_ref::<OptimisticLockingFailureError>() else {
            return FallbackMapper.handle(failure, cx);
        };

        let class = err.persistent_class_name.as_str();
        let message = cx.failure_message(
            failure,
            &message_codes(failure.simple_name(), class),
            &[MessageArg::from(Resolvable::named(class)), MessageArg::Value(err.identifier.clone())],
            &failure.to_string(),
        );

        let mut response = ApiErrorResponse::new(cx.status(failure, StatusCode::CONFLICT), cx.code(failure), message);
        response.add_error_property("identifier", err.identifier.clone());
        response.add_error_property("persistentClassName", class);
        response
    }
}

#[cfg(test)]
mod tests {
    use errgate_core::Locale;
    use errgate_i18n::StaticCatalog;

    use super::*;
    use crate::mapper::test_support::Fixture;

    #[test]
    fn conflict_with_identifier_properties() {
        let response = Fixture::default().map(&OptimisticLockingMapper, &OptimisticLockingFailureError::new("Order", 42));

        assert_eq!(response.http_status(), StatusCode::CONFLICT);
        assert_eq!(response.code(), "OPTIMISTIC_LOCKING_ERROR");
        insta::assert_json_snapshot!(response, @r#"
        {
          "code": "OPTIMISTIC_LOCKING_ERROR",
          "message": "Object of class [Order] with identifier [42]: optimistic locking failed",
          "identifier": 42,
          "persistentClassName": "Order"
        }
        "#);
    }

    #[test]
    fn message_per_entity_from_catalog() {
        let catalog = StaticCatalog::new()
            .with_message(&Locale::root(), "OptimisticLockingFailure.Order", "{0} {1} was changed by someone else")
            .with_message(&Locale::root(), "Order", "Order");
        let response = Fixture::default()
            .catalog(catalog)
            .map(&OptimisticLockingMapper, &OptimisticLockingFailureError::new("Order", 42));
        assert_eq!(response.message(), "Order 42 was changed by someone else");
    }
}
