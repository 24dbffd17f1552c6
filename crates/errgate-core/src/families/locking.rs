use serde_json::Value;

use crate::{Failure, render_value};

/// A concurrent update won the race for a versioned entity
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "Object of class [{persistent_class_name}] with identifier [{}]: optimistic locking failed",
    render_value(.identifier)
)]
pub struct OptimisticLockingFailureError {
    /// Name of the entity type (e.g. `Order`)
    pub persistent_class_name: String,
    pub identifier: Value,
}

impl OptimisticLockingFailureError {
    pub fn new(persistent_class_name: impl Into<String>, identifier: impl Into<Value>) -> Self {
        Self {
            persistent_class_name: persistent_class_name.into(),
            identifier: identifier.into(),
        }
    }
}

impl Failure for OptimisticLockingFailureError {
    fn type_key(&self) -> &str {
        super::OPTIMISTIC_LOCKING_FAILURE
    }
}
