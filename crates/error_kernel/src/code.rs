//! Error codes and retriability labels
//!
//! Functional and technical codes live in two separate code spaces. They are
//! distinct types so one can never be passed where the other is expected.

use std::borrow::Cow;
use std::fmt;

macro_rules! define_code {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Cow<'static, str>);

        impl $name {
            /// Creates a code from a static name, usable in constants
            pub const fn from_static(name: &'static str) -> Self {
                Self(Cow::Borrowed(name))
            }

            /// Creates a code from any name
            pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
                Self(name.into())
            }

            /// Returns the code name as exposed to log readers and API consumers
            pub fn name(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $name {
            fn from(name: &'static str) -> Self {
                Self::from_static(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(Cow::Owned(name))
            }
        }
    };
}

define_code!(
    /// Code of an anticipated business-rule violation
    ///
    /// # Example
    ///
    /// ```rust
    /// use error_kernel::FunctionalCode;
    ///
    /// const PERSON_TOO_YOUNG: FunctionalCode = FunctionalCode::from_static("PERSON_TOO_YOUNG");
    /// assert_eq!(PERSON_TOO_YOUNG.name(), "PERSON_TOO_YOUNG");
    /// ```
    FunctionalCode
);

define_code!(
    /// Code of an infrastructural failure, defined by the caller
    TechnicalCode
);

/// Functional codes every service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    InvalidFormat,
}

impl BasicErrorCode {
    /// All basic codes
    pub const ALL: [BasicErrorCode; 4] = [
        BasicErrorCode::Unauthorized,
        BasicErrorCode::Forbidden,
        BasicErrorCode::NotFound,
        BasicErrorCode::InvalidFormat,
    ];

    /// Returns the code name
    pub const fn name(&self) -> &'static str {
        match self {
            BasicErrorCode::Unauthorized => "UNAUTHORIZED",
            BasicErrorCode::Forbidden => "FORBIDDEN",
            BasicErrorCode::NotFound => "NOT_FOUND",
            BasicErrorCode::InvalidFormat => "INVALID_FORMAT",
        }
    }

    /// Returns the functional code carrying this name
    pub const fn code(&self) -> FunctionalCode {
        FunctionalCode::from_static(self.name())
    }

    /// Recognises a basic code by name
    pub fn from_code(code: &FunctionalCode) -> Option<Self> {
        Self::ALL.into_iter().find(|basic| basic.name() == code.name())
    }
}

impl fmt::Display for BasicErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BasicErrorCode> for FunctionalCode {
    fn from(code: BasicErrorCode) -> Self {
        code.code()
    }
}

impl PartialEq<BasicErrorCode> for FunctionalCode {
    fn eq(&self, other: &BasicErrorCode) -> bool {
        self.name() == other.name()
    }
}

/// Whether re-attempting the failed operation could plausibly succeed
///
/// Informational only. Nothing in this crate retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Retriability {
    /// Replaying the operation has no chance to succeed
    #[default]
    Fatal,
    /// Replaying the operation may succeed
    Retriable,
}

impl Retriability {
    /// Returns the label used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Retriability::Fatal => "FATAL",
            Retriability::Retriable => "RETRIABLE",
        }
    }
}

impl fmt::Display for Retriability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
