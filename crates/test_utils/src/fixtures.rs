//! Pre-built Test Fixtures
//!
//! Provides ready-to-use errors, violations and request bodies.
//! These fixtures are designed to be consistent and predictable for unit tests.

use std::io;

use error_kernel::{
    basic, params, FieldViolation, FunctionalCode, FunctionalError, InterfaceViolation,
    TechnicalCode, TechnicalError,
};
use serde_json::{json, Value};

/// Custom functional code outside the basic catalog
pub const QUOTA_EXCEEDED: FunctionalCode = FunctionalCode::from_static("QUOTA_EXCEEDED");

/// Technical code used by storage failures
pub const STORAGE_UNAVAILABLE: TechnicalCode = TechnicalCode::from_static("STORAGE_UNAVAILABLE");

/// Fixture for functional errors
pub struct FunctionalFixtures;

impl FunctionalFixtures {
    /// NOT_FOUND with a rendered message
    pub fn person_not_found() -> FunctionalError {
        basic::not_found_with("person {} not found", params!["42"])
    }

    /// Custom code, mapped to 400 by the boundary
    pub fn quota_exceeded() -> FunctionalError {
        FunctionalError::with_message(QUOTA_EXCEEDED, "quota of {} requests exceeded", params![100])
    }

    /// FORBIDDEN wrapping an I/O cause
    pub fn forbidden_with_cause() -> FunctionalError {
        basic::forbidden_caused_by(
            io::Error::new(io::ErrorKind::PermissionDenied, "token revoked"),
            "role {} denied",
            params!["reader"],
        )
    }
}

/// Fixture for technical errors
pub struct TechnicalFixtures;

impl TechnicalFixtures {
    /// Retriable storage failure with an I/O cause
    pub fn storage_down() -> TechnicalError {
        TechnicalError::with_cause(
            io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            "storage {} unreachable",
            params!["primary"],
        )
        .with_code(STORAGE_UNAVAILABLE)
        .retriable()
    }

    /// Fatal failure without code or cause
    pub fn invariant_broken() -> TechnicalError {
        TechnicalError::new("invariant {} broken", params!["balance >= 0"])
    }
}

/// Fixture for interface violations
pub struct ViolationFixtures;

impl ViolationFixtures {
    pub fn blank_lastname() -> FieldViolation {
        FieldViolation::new("lastname", "must not be blank")
    }

    /// Two distinct payload violations plus a duplicate
    pub fn payload() -> InterfaceViolation {
        InterfaceViolation::payload([
            Self::blank_lastname(),
            Self::blank_lastname(),
            FieldViolation::new("email", "must be a well-formed email address"),
        ])
    }

    pub fn id_mismatch() -> InterfaceViolation {
        InterfaceViolation::type_mismatch("id", "abc", "uuid")
    }
}

/// Fixture for person request bodies
pub struct PersonFixtures;

impl PersonFixtures {
    /// A valid registration body
    pub fn create_body() -> Value {
        json!({
            "firstname": "Jane",
            "lastname": "Doe",
            "email": "jane.doe@example.com",
            "age": 34
        })
    }

    /// A body failing the lastname and email rules
    pub fn invalid_body() -> Value {
        json!({
            "firstname": "Jane",
            "lastname": "",
            "email": "not-an-email"
        })
    }
}
