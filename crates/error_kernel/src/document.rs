//! Wire error document
//!
//! The only error representation callers of a service ever see:
//!
//! ```json
//! { "errors": [ { "code": "INVALID_FORMAT", "description": "...", "parameters": ["..."] } ] }
//! ```
//!
//! Entries form a set. Two entries with the same code, description and
//! parameters collapse into one, and consumers must not rely on entry order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One error reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
}

impl ErrorEntry {
    /// Creates an entry carrying only a code
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: None,
            parameters: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<String>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// The error payload returned with 4xx responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: BTreeSet<ErrorEntry>,
}

impl ErrorDocument {
    /// Creates a document holding a single entry
    pub fn single(entry: ErrorEntry) -> Self {
        Self {
            errors: BTreeSet::from([entry]),
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.errors.iter()
    }

    /// Checks whether an entry with this code and description is present
    pub fn contains(&self, code: &str, description: &str) -> bool {
        self.errors
            .iter()
            .any(|entry| entry.code == code && entry.description.as_deref() == Some(description))
    }
}

impl FromIterator<ErrorEntry> for ErrorDocument {
    fn from_iter<I: IntoIterator<Item = ErrorEntry>>(entries: I) -> Self {
        Self {
            errors: entries.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ErrorDocument {
    type Item = &'a ErrorEntry;
    type IntoIter = std::collections::btree_set::Iter<'a, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
