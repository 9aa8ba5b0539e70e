//! Error Kernel - Error taxonomy for service boundaries
//!
//! This crate classifies every failure raised by business logic and turns it
//! into the representation callers of a service see:
//! - Message templates with ordered positional parameters
//! - Functional errors (anticipated, coded, safe to expose) and technical
//!   errors (infrastructural, labelled fatal or retriable, never exposed)
//! - Ready-made functional errors for the four basic codes
//! - Interface violations reported by request validation
//! - The wire error document and the mapping functions that build it
//!
//! Nothing in this crate performs I/O. Choosing a response status and
//! logging belong to the service boundary.

pub mod template;
pub mod code;
pub mod message;
pub mod functional;
pub mod technical;
pub mod error;
pub mod basic;
pub mod violation;
pub mod document;
pub mod mapper;

pub use code::{BasicErrorCode, FunctionalCode, Retriability, TechnicalCode};
pub use message::{Cause, ErrorMessage};
pub use functional::FunctionalError;
pub use technical::TechnicalError;
pub use error::{Result, ServiceError};
pub use violation::{ConstraintViolation, FieldViolation, InterfaceViolation, TypeMismatch};
pub use document::{ErrorDocument, ErrorEntry};
