//! Functional errors
//!
//! A functional error is an anticipated business-rule violation. It always
//! carries a code and is safe to describe to the caller.

use std::error::Error;
use std::fmt;

use crate::code::{BasicErrorCode, FunctionalCode};
use crate::message::{into_cause, source_of, Cause, ErrorMessage};

/// An anticipated business-rule violation
///
/// # Example
///
/// ```rust
/// use error_kernel::{params, BasicErrorCode, FunctionalError};
///
/// let error = FunctionalError::with_message(
///     BasicErrorCode::InvalidFormat,
///     "{} must be between {} and {}",
///     params!["lastname", 1, 30],
/// );
/// assert_eq!(error.message(), Some("lastname must be between 1 and 30"));
/// assert_eq!(
///     error.to_string(),
///     "FunctionalError [code=INVALID_FORMAT, message={} must be between {} and {}, parameters=[lastname, 1, 30]]"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FunctionalError {
    code: FunctionalCode,
    message: ErrorMessage,
    cause: Option<Cause>,
}

impl FunctionalError {
    /// Creates a functional error without message
    pub fn new(code: impl Into<FunctionalCode>) -> Self {
        Self {
            code: code.into(),
            message: ErrorMessage::empty(),
            cause: None,
        }
    }

    /// Creates a functional error with a templated message
    ///
    /// # Arguments
    ///
    /// * `code` - The functional code
    /// * `template` - Message template with `{}` markers
    /// * `parameters` - Ordered values for the markers
    pub fn with_message<P: ToString>(
        code: impl Into<FunctionalCode>,
        template: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            code: code.into(),
            message: ErrorMessage::new(Some(template.into()), parameters),
            cause: None,
        }
    }

    /// Creates a functional error chained to the error that triggered it
    pub fn with_cause<P: ToString>(
        code: impl Into<FunctionalCode>,
        cause: impl Into<Box<dyn Error + Send + Sync + 'static>>,
        template: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            code: code.into(),
            message: ErrorMessage::new(Some(template.into()), parameters),
            cause: Some(into_cause(cause)),
        }
    }

    /// Returns the functional code
    pub fn code(&self) -> &FunctionalCode {
        &self.code
    }

    /// Returns the basic code this error carries, if it is one
    pub fn basic_code(&self) -> Option<BasicErrorCode> {
        BasicErrorCode::from_code(&self.code)
    }

    /// Returns the rendered message
    pub fn message(&self) -> Option<&str> {
        self.message.rendered()
    }

    /// Returns the raw template, placeholders intact
    pub fn message_template(&self) -> Option<&str> {
        self.message.template()
    }

    /// Returns the parameters captured at construction
    pub fn parameters(&self) -> Option<&[String]> {
        self.message.parameters()
    }

    /// Returns the underlying cause
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for FunctionalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionalError [code={}", self.code)?;
        let mut separator = ", ";
        self.message.write_fields(f, &mut separator)?;
        f.write_str("]")
    }
}

impl Error for FunctionalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        source_of(&self.cause)
    }
}
