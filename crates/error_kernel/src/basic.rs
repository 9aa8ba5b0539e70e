//! Ready-made functional errors
//!
//! One family of factories per basic code. Each family offers a bare form, a
//! templated-message form and a cause-plus-message form, all returning a
//! plain [`FunctionalError`].
//!
//! ```rust
//! use error_kernel::{basic, params};
//!
//! let error = basic::not_found_with("person {} not found", params!["PTY-42"]);
//! assert_eq!(
//!     error.to_string(),
//!     "FunctionalError [code=NOT_FOUND, message=person {} not found, parameters=[PTY-42]]"
//! );
//! ```

use std::error::Error;

use crate::code::BasicErrorCode;
use crate::functional::FunctionalError;

macro_rules! basic_error {
    ($code:expr, $bare:ident, $with:ident, $caused_by:ident, $what:literal) => {
        #[doc = concat!("Creates a ", $what, " error without message")]
        pub fn $bare() -> FunctionalError {
            FunctionalError::new($code)
        }

        #[doc = concat!("Creates a ", $what, " error with a templated message")]
        pub fn $with<P: ToString>(
            template: impl Into<String>,
            parameters: impl IntoIterator<Item = P>,
        ) -> FunctionalError {
            FunctionalError::with_message($code, template, parameters)
        }

        #[doc = concat!("Creates a ", $what, " error chained to its cause")]
        pub fn $caused_by<P: ToString>(
            cause: impl Into<Box<dyn Error + Send + Sync + 'static>>,
            template: impl Into<String>,
            parameters: impl IntoIterator<Item = P>,
        ) -> FunctionalError {
            FunctionalError::with_cause($code, cause, template, parameters)
        }
    };
}

basic_error!(
    BasicErrorCode::NotFound,
    not_found,
    not_found_with,
    not_found_caused_by,
    "data-not-found"
);
basic_error!(
    BasicErrorCode::InvalidFormat,
    invalid_format,
    invalid_format_with,
    invalid_format_caused_by,
    "invalid-format"
);
basic_error!(
    BasicErrorCode::Unauthorized,
    unauthorized,
    unauthorized_with,
    unauthorized_caused_by,
    "unauthorized-access"
);
basic_error!(
    BasicErrorCode::Forbidden,
    forbidden,
    forbidden_with,
    forbidden_caused_by,
    "forbidden-access"
);
