//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating templates, parameters
//! and errors.

use error_kernel::{BasicErrorCode, FieldViolation, FunctionalError};
use proptest::prelude::*;

/// Strategy for generating the basic catalog codes
pub fn basic_code_strategy() -> impl Strategy<Value = BasicErrorCode> {
    prop_oneof![
        Just(BasicErrorCode::Unauthorized),
        Just(BasicErrorCode::Forbidden),
        Just(BasicErrorCode::NotFound),
        Just(BasicErrorCode::InvalidFormat),
    ]
}

/// Strategy for generating text without markers or backslashes
pub fn literal_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .:,-]{0,12}"
}

/// Strategy for generating templates of literals and `{}` markers
///
/// Returns the template with its number of markers.
pub fn template_strategy() -> impl Strategy<Value = (String, usize)> {
    (literal_strategy(), prop::collection::vec(literal_strategy(), 0..6)).prop_map(
        |(head, tails)| {
            let markers = tails.len();
            let template = tails.iter().fold(head, |mut template, tail| {
                template.push_str("{}");
                template.push_str(tail);
                template
            });
            (template, markers)
        },
    )
}

/// Strategy for generating parameter lists free of markers
pub fn parameters_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,8}", 0..6)
}

/// Strategy for generating functional errors from the basic catalog
pub fn functional_error_strategy() -> impl Strategy<Value = FunctionalError> {
    (basic_code_strategy(), template_strategy(), parameters_strategy()).prop_map(
        |(code, (template, _), parameters)| FunctionalError::with_message(code, template, parameters),
    )
}

/// Strategy for generating field violations over a small alphabet
///
/// Duplicates are likely, which exercises entry collapsing.
pub fn field_violation_strategy() -> impl Strategy<Value = FieldViolation> {
    ("[a-c]{1,2}", "[x-z]{1,2}").prop_map(|(field, message)| FieldViolation::new(field, message))
}
