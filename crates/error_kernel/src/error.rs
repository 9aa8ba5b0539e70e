//! The error kinds raised by business logic

use thiserror::Error;

use crate::code::Retriability;
use crate::functional::FunctionalError;
use crate::technical::TechnicalError;

/// Any classified failure raised by business logic
///
/// Business code returns this through [`Result`] and lets it propagate to the
/// service boundary, which is the only place that translates it.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Functional(#[from] FunctionalError),

    #[error(transparent)]
    Technical(#[from] TechnicalError),
}

impl ServiceError {
    /// Returns the kind name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Functional(_) => "functional",
            ServiceError::Technical(_) => "technical",
        }
    }

    pub fn is_functional(&self) -> bool {
        matches!(self, ServiceError::Functional(_))
    }

    pub fn as_functional(&self) -> Option<&FunctionalError> {
        match self {
            ServiceError::Functional(error) => Some(error),
            ServiceError::Technical(_) => None,
        }
    }

    pub fn as_technical(&self) -> Option<&TechnicalError> {
        match self {
            ServiceError::Technical(error) => Some(error),
            ServiceError::Functional(_) => None,
        }
    }

    /// Returns the retriability of a technical error
    pub fn retriability(&self) -> Option<Retriability> {
        self.as_technical().map(TechnicalError::retriability)
    }

    /// Returns the rendered message
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceError::Functional(error) => error.message(),
            ServiceError::Technical(error) => error.message(),
        }
    }
}

/// Result type for business logic
pub type Result<T> = std::result::Result<T, ServiceError>;
