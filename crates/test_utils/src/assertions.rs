//! Custom Test Assertions
//!
//! Provides assertion helpers for wire error documents that give
//! more meaningful error messages than standard assertions.

use error_kernel::{ErrorDocument, ErrorEntry};

/// Decodes a response body into an error document
///
/// # Panics
///
/// Panics if the body is not a valid error document
pub fn parse_error_document(body: &[u8]) -> ErrorDocument {
    serde_json::from_slice(body).unwrap_or_else(|err| {
        panic!(
            "Body is not an error document ({}): {}",
            err,
            String::from_utf8_lossy(body)
        )
    })
}

/// Asserts that a document holds exactly one entry and returns it
pub fn assert_single_entry(document: &ErrorDocument) -> &ErrorEntry {
    assert_eq!(
        document.len(),
        1,
        "Expected a single error entry, got {:?}",
        document
    );
    document.iter().next().expect("document has one entry")
}

/// Asserts that a document contains an entry with the code and description
pub fn assert_has_entry(document: &ErrorDocument, code: &str, description: &str) {
    assert!(
        document.contains(code, description),
        "Expected entry code={} description={:?} in {:?}",
        code,
        description,
        document
    );
}

/// Asserts that every entry of a document carries the code
pub fn assert_all_codes(document: &ErrorDocument, code: &str) {
    assert!(!document.is_empty(), "Expected at least one error entry");
    for entry in document {
        assert_eq!(entry.code, code, "Unexpected code in entry {:?}", entry);
    }
}

/// Asserts that a response body reveals nothing
pub fn assert_no_body(body: &[u8]) {
    assert!(
        body.is_empty(),
        "Expected an empty body, got {}",
        String::from_utf8_lossy(body)
    );
}
