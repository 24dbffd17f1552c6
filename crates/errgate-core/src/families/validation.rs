use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::Failure;

/// Kind of element a property path node points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    Bean,
    Property,
    Method,
    Parameter,
    CrossParameter,
    ReturnValue,
    Constructor,
    ContainerElement,
}

/// One step of a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode {
    pub name: Option<String>,
    pub kind: ElementKind,
    /// Index or key when the node is an element of a collection
    pub index: Option<String>,
}

/// Path from the validated root to the violating element
///
/// Renders as dotted names (`createOrder.body.lines[2].quantity`); nodes
/// without a name, such as the bean node of a class-level constraint, do not
/// appear in the rendered form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPath {
    nodes: Vec<PathNode>,
}

impl PropertyPath {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[must_use]
    pub fn node(mut self, name: Option<&str>, kind: ElementKind) -> Self {
        self.nodes.push(PathNode {
            name: name.map(str::to_owned),
            kind,
            index: None,
        });
        self
    }

    #[must_use]
    pub fn method(self, name: &str) -> Self {
        self.node(Some(name), ElementKind::Method)
    }

    #[must_use]
    pub fn parameter(self, name: &str) -> Self {
        self.node(Some(name), ElementKind::Parameter)
    }

    #[must_use]
    pub fn property(self, name: &str) -> Self {
        self.node(Some(name), ElementKind::Property)
    }

    /// Unnamed node targeting the enclosing object itself
    #[must_use]
    pub fn bean(self) -> Self {
        self.node(None, ElementKind::Bean)
    }

    /// Attach an index or key to the last node
    #[must_use]
    pub fn at(mut self, index: impl Into<String>) -> Self {
        if let Some(last) = self.nodes.last_mut() {
            last.index = Some(index.into());
        }
        self
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Kind of the terminal node
    pub fn leaf_kind(&self) -> Option<ElementKind> {
        self.nodes.last().map(|node| node.kind)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in &self.nodes {
            let Some(name) = &node.name else { continue };
            if !first {
                f.write_str(".")?;
            }
            first = false;
            f.write_str(name)?;
            if let Some(index) = &node.index {
                write!(f, "[{index}]")?;
            }
        }
        Ok(())
    }
}

/// The constraint that was violated, with its declared attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDescriptor {
    /// Constraint name (e.g. `NotNull`, `Size`)
    pub name: String,
    /// Declared attributes, including `message`, `groups` and `payload`
    pub attributes: BTreeMap<String, Value>,
}

impl ConstraintDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// A single failed constraint check
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    pub path: PropertyPath,
    pub constraint: ConstraintDescriptor,
    /// Interpolated message produced by the validator
    pub message: String,
    pub invalid_value: Value,
}

impl ConstraintViolation {
    pub fn new(
        path: PropertyPath,
        constraint: ConstraintDescriptor,
        message: impl Into<String>,
        invalid_value: impl Into<Value>,
    ) -> Self {
        Self {
            path,
            constraint,
            message: message.into(),
            invalid_value: invalid_value.into(),
        }
    }
}

/// Constraint checks performed outside request binding failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", describe_violations(.violations))]
pub struct ConstraintViolationError {
    pub violations: Vec<ConstraintViolation>,
}

impl ConstraintViolationError {
    pub const fn new(violations: Vec<ConstraintViolation>) -> Self {
        Self { violations }
    }
}

fn describe_violations(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.path, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Failure for ConstraintViolationError {
    fn type_key(&self) -> &str {
        super::CONSTRAINT_VIOLATION
    }
}

/// A binding error on one field of a bound object
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBindingError {
    /// Dotted field path within the bound object
    pub field: String,
    /// Error code (usually the constraint name)
    pub code: String,
    /// Message arguments, in the order the message template expects them
    pub arguments: Vec<Value>,
    pub default_message: String,
    pub rejected_value: Value,
    /// Declared type of the field, used for type-specific message codes
    pub field_type: Option<String>,
}

impl FieldBindingError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        default_message: impl Into<String>,
        rejected_value: impl Into<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            arguments: Vec::new(),
            default_message: default_message.into(),
            rejected_value: rejected_value.into(),
            field_type: None,
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }

    #[must_use]
    pub fn with_field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }
}

/// A binding error on the bound object as a whole
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBindingError {
    pub code: String,
    pub arguments: Vec<Value>,
    pub default_message: String,
}

impl ObjectBindingError {
    pub fn new(code: impl Into<String>, default_message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            arguments: Vec::new(),
            default_message: default_message.into(),
        }
    }

    #[must_use]
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }
}

/// Validation of a bound handler argument failed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Validation failed for argument [{object_name}] with {} errors", self.error_count())]
pub struct MethodArgumentNotValidError {
    /// Name of the bound object (e.g. `requestBody`)
    pub object_name: String,
    pub field_errors: Vec<FieldBindingError>,
    pub global_errors: Vec<ObjectBindingError>,
}

impl MethodArgumentNotValidError {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            field_errors: Vec::new(),
            global_errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field_error(mut self, error: FieldBindingError) -> Self {
        self.field_errors.push(error);
        self
    }

    #[must_use]
    pub fn with_global_error(mut self, error: ObjectBindingError) -> Self {
        self.global_errors.push(error);
        self
    }

    pub fn error_count(&self) -> usize {
        self.field_errors.len() + self.global_errors.len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

impl Failure for MethodArgumentNotValidError {
    fn type_key(&self) -> &str {
        super::METHOD_ARGUMENT_NOT_VALID
    }
}
