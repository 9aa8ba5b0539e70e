//! Translation of classified errors into the wire error document
//!
//! Every function here is pure and total over its input type. Which function
//! applies, and with which response status, is decided at the service
//! boundary.

use std::error::Error;

use crate::code::BasicErrorCode;
use crate::document::{ErrorDocument, ErrorEntry};
use crate::functional::FunctionalError;
use crate::violation::{ConstraintViolation, FieldViolation, InterfaceViolation, TypeMismatch};

const INVALID_FORMAT: &str = BasicErrorCode::InvalidFormat.name();

/// Maps a functional error to a single-entry document
///
/// The entry carries the code name, the rendered message and the
/// stringified parameters, each omitted when absent.
pub fn map_functional(error: &FunctionalError) -> ErrorDocument {
    let entry = ErrorEntry {
        code: error.code().name().to_string(),
        description: error.message().map(str::to_string),
        parameters: error.parameters().map(<[String]>::to_vec),
    };

    ErrorDocument::single(entry)
}

/// Maps payload violations, one `INVALID_FORMAT` entry each
///
/// Violations whose description coincides collapse into one entry.
pub fn map_field_violations<'a>(
    violations: impl IntoIterator<Item = &'a FieldViolation>,
) -> ErrorDocument {
    violations
        .into_iter()
        .map(|violation| ErrorEntry::new(INVALID_FORMAT).with_description(violation.to_string()))
        .collect()
}

/// Maps non-payload violations, one `INVALID_FORMAT` entry each
pub fn map_constraint_violations<'a>(
    violations: impl IntoIterator<Item = &'a ConstraintViolation>,
) -> ErrorDocument {
    violations
        .into_iter()
        .map(|violation| ErrorEntry::new(INVALID_FORMAT).with_description(violation.to_string()))
        .collect()
}

/// Maps a value conversion failure to a single `INVALID_FORMAT` entry
pub fn map_type_mismatch(mismatch: &TypeMismatch) -> ErrorDocument {
    ErrorDocument::single(ErrorEntry::new(INVALID_FORMAT).with_description(mismatch.to_string()))
}

/// Maps any interface violation with the matching function above
pub fn map_interface_violation(violation: &InterfaceViolation) -> ErrorDocument {
    match violation {
        InterfaceViolation::Payload(violations) => map_field_violations(violations),
        InterfaceViolation::Constraint(violations) => map_constraint_violations(violations),
        InterfaceViolation::TypeMismatch(mismatch) => map_type_mismatch(mismatch),
        InterfaceViolation::Unreadable(reason) => map_description(Some(reason.clone())),
    }
}

/// Maps a failure nobody classified
///
/// The entry reuses the `INVALID_FORMAT` code and describes the failure with
/// its own display text, omitted when empty.
pub fn map_unclassified(failure: &dyn Error) -> ErrorDocument {
    map_description(Some(failure.to_string()))
}

fn map_description(description: Option<String>) -> ErrorDocument {
    let entry = ErrorEntry {
        code: INVALID_FORMAT.to_string(),
        description: description.filter(|text| !text.is_empty()),
        parameters: None,
    };

    ErrorDocument::single(entry)
}

impl From<&FunctionalError> for ErrorDocument {
    fn from(error: &FunctionalError) -> Self {
        map_functional(error)
    }
}

impl From<&InterfaceViolation> for ErrorDocument {
    fn from(violation: &InterfaceViolation) -> Self {
        map_interface_violation(violation)
    }
}
