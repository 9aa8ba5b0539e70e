//! Interface violations
//!
//! A caller malformed the request and the failure was detected before any
//! business logic ran. The validation itself happens elsewhere; this module
//! only carries its already-validated results.

use std::fmt;

use thiserror::Error;

/// A rule broken by one field of the request payload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A rule broken outside the payload (query string, path, headers)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintViolation {
    pub property_path: String,
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(property_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property_path, self.message)
    }
}

/// A request value that could not be converted to the type the handler expects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to convert value '{value}' of property '{property}' to required type '{required_type}'")]
pub struct TypeMismatch {
    pub property: String,
    pub value: String,
    pub required_type: String,
}

/// Any caller-side request malformation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfaceViolation {
    /// Violations found in the request payload
    #[error("InterfaceViolation [payload=[{}]]", join(.0))]
    Payload(Vec<FieldViolation>),

    /// Violations found outside the payload
    #[error("InterfaceViolation [constraints=[{}]]", join(.0))]
    Constraint(Vec<ConstraintViolation>),

    #[error("InterfaceViolation [{0}]")]
    TypeMismatch(TypeMismatch),

    /// The payload could not be read at all
    #[error("InterfaceViolation [unreadable={0}]")]
    Unreadable(String),
}

impl InterfaceViolation {
    pub fn payload(violations: impl IntoIterator<Item = FieldViolation>) -> Self {
        InterfaceViolation::Payload(violations.into_iter().collect())
    }

    pub fn constraints(violations: impl IntoIterator<Item = ConstraintViolation>) -> Self {
        InterfaceViolation::Constraint(violations.into_iter().collect())
    }

    pub fn type_mismatch(
        property: impl Into<String>,
        value: impl Into<String>,
        required_type: impl Into<String>,
    ) -> Self {
        InterfaceViolation::TypeMismatch(TypeMismatch {
            property: property.into(),
            value: value.into(),
            required_type: required_type.into(),
        })
    }

    pub fn unreadable(reason: impl Into<String>) -> Self {
        InterfaceViolation::Unreadable(reason.into())
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
