//! Technical errors
//!
//! A technical error is an unanticipated or infrastructural failure. Its
//! content never reaches the caller. The retriability label is read by
//! whoever decides to replay the failed operation.

use std::error::Error;
use std::fmt;

use crate::code::{Retriability, TechnicalCode};
use crate::message::{into_cause, source_of, Cause, ErrorMessage};

/// An unanticipated or infrastructural failure
///
/// # Example
///
/// ```rust
/// use error_kernel::{params, Retriability, TechnicalError};
///
/// let error = TechnicalError::new("database {} unreachable", params!["ledger"])
///     .with_code("DATABASE_UNREACHABLE")
///     .retriable();
/// assert_eq!(error.retriability(), Retriability::Retriable);
/// assert_eq!(
///     error.to_string(),
///     "TechnicalError [code=DATABASE_UNREACHABLE, message=database {} unreachable, parameters=[ledger], type=RETRIABLE]"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TechnicalError {
    code: Option<TechnicalCode>,
    retriability: Retriability,
    message: ErrorMessage,
    cause: Option<Cause>,
}

impl TechnicalError {
    /// Creates a fatal technical error with a templated message
    pub fn new<P: ToString>(
        template: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            code: None,
            retriability: Retriability::Fatal,
            message: ErrorMessage::new(Some(template.into()), parameters),
            cause: None,
        }
    }

    /// Wraps a lower-level error as a fatal technical error without message
    pub fn from_cause(cause: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self {
            code: None,
            retriability: Retriability::Fatal,
            message: ErrorMessage::empty(),
            cause: Some(into_cause(cause)),
        }
    }

    /// Wraps a lower-level error as a fatal technical error with a templated message
    pub fn with_cause<P: ToString>(
        cause: impl Into<Box<dyn Error + Send + Sync + 'static>>,
        template: impl Into<String>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            code: None,
            retriability: Retriability::Fatal,
            message: ErrorMessage::new(Some(template.into()), parameters),
            cause: Some(into_cause(cause)),
        }
    }

    /// Attaches a technical code
    pub fn with_code(self, code: impl Into<TechnicalCode>) -> Self {
        Self {
            code: Some(code.into()),
            ..self
        }
    }

    /// Sets the retriability
    pub fn with_retriability(self, retriability: Retriability) -> Self {
        Self {
            retriability,
            ..self
        }
    }

    /// Marks the error as retriable
    pub fn retriable(self) -> Self {
        self.with_retriability(Retriability::Retriable)
    }

    /// Returns the technical code, if one was attached
    pub fn code(&self) -> Option<&TechnicalCode> {
        self.code.as_ref()
    }

    /// Returns the retriability
    pub fn retriability(&self) -> Retriability {
        self.retriability
    }

    /// Whether replaying the operation may succeed
    pub fn is_retriable(&self) -> bool {
        self.retriability == Retriability::Retriable
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

impl fmt::Display for TechnicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TechnicalError [")?;
        let mut separator = "";
        if let Some(code) = &self.code {
            write!(f, "code={}", code)?;
            separator = ", ";
        }
        self.message.write_fields(f, &mut separator)?;
        write!(f, "{}type={}]", separator, self.retriability)
    }
}

impl Error for TechnicalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        source_of(&self.cause)
    }
}
