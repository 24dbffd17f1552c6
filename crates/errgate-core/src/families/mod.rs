//! Failure families recognized by the built-in mappers
//!
//! These are produced by the binding and validation layers of an API (path
//! and query conversion, body deserialization, constraint checks) or by
//! persistence and security code. Each family has a stable type key that
//! the configuration can refer to.

mod body;
mod locking;
mod security;
mod type_mismatch;
mod validation;

pub use body::{BodyParseCause, MessageNotReadableError};
pub use locking::OptimisticLockingFailureError;
pub use security::{SecurityError, SecurityFailureKind};
pub use type_mismatch::TypeMismatchError;
pub use validation::{
    ConstraintDescriptor, ConstraintViolation, ConstraintViolationError, ElementKind, FieldBindingError,
    MethodArgumentNotValidError, ObjectBindingError, PathNode, PropertyPath,
};

/// Type key of [`TypeMismatchError`]
pub const TYPE_MISMATCH: &str = "errgate::TypeMismatch";
/// Type key of [`ConstraintViolationError`]
pub const CONSTRAINT_VIOLATION: &str = "errgate::ConstraintViolation";
/// Type key of [`MessageNotReadableError`]
pub const MESSAGE_NOT_READABLE: &str = "errgate::MessageNotReadable";
/// Type key of [`MethodArgumentNotValidError`]
pub const METHOD_ARGUMENT_NOT_VALID: &str = "errgate::MethodArgumentNotValid";
/// Type key of [`OptimisticLockingFailureError`]
pub const OPTIMISTIC_LOCKING_FAILURE: &str = "errgate::OptimisticLockingFailure";
