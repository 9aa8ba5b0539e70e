//! Tests for the error mapper and the wire error document

use std::io;

use error_kernel::mapper::{
    map_constraint_violations, map_field_violations, map_functional, map_interface_violation,
    map_type_mismatch, map_unclassified,
};
use error_kernel::{
    basic, params, BasicErrorCode, ConstraintViolation, ErrorDocument, ErrorEntry,
    FieldViolation, FunctionalError, InterfaceViolation, TypeMismatch,
};
use proptest::prelude::*;
use serde_json::json;

fn only_entry(document: &ErrorDocument) -> &ErrorEntry {
    assert_eq!(document.len(), 1, "expected a single entry in {:?}", document);
    document.iter().next().unwrap()
}

mod functional_mapping_tests {
    use super::*;

    #[test]
    fn test_rendered_message_becomes_description() {
        let error = FunctionalError::with_message(
            BasicErrorCode::InvalidFormat,
            "{} must be between {} and {}",
            params!["lastname", "1", "30"],
        );

        let document = map_functional(&error);
        let entry = only_entry(&document);

        assert_eq!(entry.code, "INVALID_FORMAT");
        assert_eq!(entry.description.as_deref(), Some("lastname must be between 1 and 30"));
        assert_eq!(
            entry.parameters,
            Some(vec!["lastname".to_string(), "1".to_string(), "30".to_string()])
        );
    }

    #[test]
    fn test_code_only_error() {
        let document = map_functional(&basic::not_found());
        let entry = only_entry(&document);

        assert_eq!(entry.code, "NOT_FOUND");
        assert!(entry.description.is_none());
        assert!(entry.parameters.is_none());
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let error = basic::forbidden_with("role {} denied", params!["reader"]);
        assert_eq!(map_functional(&error), map_functional(&error));
        assert_eq!(ErrorDocument::from(&error), map_functional(&error));
    }
}

mod violation_mapping_tests {
    use super::*;

    #[test]
    fn test_identical_field_violations_collapse() {
        let violations = vec![
            FieldViolation::new("lastname", "must not be blank"),
            FieldViolation::new("lastname", "must not be blank"),
        ];

        let document = map_field_violations(&violations);
        let entry = only_entry(&document);

        assert_eq!(entry.code, "INVALID_FORMAT");
        assert_eq!(entry.description.as_deref(), Some("lastname: must not be blank"));
    }

    #[test]
    fn test_distinct_field_violations_kept() {
        let violations = vec![
            FieldViolation::new("lastname", "must not be blank"),
            FieldViolation::new("lastname", "length must be between 1 and 30"),
        ];

        let document = map_field_violations(&violations);

        // Entry order is not part of the contract
        assert_eq!(document.len(), 2);
        assert!(document.contains("INVALID_FORMAT", "lastname: must not be blank"));
        assert!(document.contains("INVALID_FORMAT", "lastname: length must be between 1 and 30"));
    }

    #[test]
    fn test_constraint_violations_use_property_path() {
        let violations = vec![ConstraintViolation::new("list_persons.limit", "must be between 1 and 100")];

        let document = map_constraint_violations(&violations);

        assert!(document.contains("INVALID_FORMAT", "list_persons.limit: must be between 1 and 100"));
    }

    #[test]
    fn test_identical_constraint_violations_collapse() {
        let violations = vec![
            ConstraintViolation::new("list_persons.limit", "must be between 1 and 100"),
            ConstraintViolation::new("list_persons.limit", "must be between 1 and 100"),
        ];

        let document = map_constraint_violations(&violations);
        let entry = only_entry(&document);

        assert_eq!(entry.code, "INVALID_FORMAT");
        assert_eq!(entry.description.as_deref(), Some("list_persons.limit: must be between 1 and 100"));
    }

    #[test]
    fn test_distinct_constraint_violations_kept() {
        let violations = vec![
            ConstraintViolation::new("list_persons.limit", "must be between 1 and 100"),
            ConstraintViolation::new("list_persons.lastname", "length must be at least 1"),
            ConstraintViolation::new("list_persons.limit", "must be between 1 and 100"),
        ];

        let document = map_constraint_violations(&violations);

        assert_eq!(document.len(), 2);
        assert!(document.contains("INVALID_FORMAT", "list_persons.limit: must be between 1 and 100"));
        assert!(document.contains("INVALID_FORMAT", "list_persons.lastname: length must be at least 1"));
    }

    #[test]
    fn test_no_violations_yields_empty_document() {
        let document = map_field_violations(&Vec::<FieldViolation>::new());
        assert!(document.is_empty());
    }

    #[test]
    fn test_type_mismatch_single_entry() {
        let mismatch = TypeMismatch {
            property: "id".to_string(),
            value: "abc".to_string(),
            required_type: "uuid".to_string(),
        };

        let document = map_type_mismatch(&mismatch);
        let entry = only_entry(&document);

        assert_eq!(entry.code, "INVALID_FORMAT");
        assert_eq!(entry.description.as_deref(), Some(mismatch.to_string().as_str()));
    }

    #[test]
    fn test_interface_violation_dispatches_by_variant() {
        let payload = InterfaceViolation::payload([FieldViolation::new("email", "must be a well-formed email address")]);
        let unreadable = InterfaceViolation::unreadable("EOF while parsing an object");

        assert!(map_interface_violation(&payload).contains("INVALID_FORMAT", "email: must be a well-formed email address"));
        assert!(map_interface_violation(&unreadable).contains("INVALID_FORMAT", "EOF while parsing an object"));
    }
}

mod unclassified_mapping_tests {
    use super::*;

    #[test]
    fn test_falls_back_to_invalid_format() {
        let failure = io::Error::new(io::ErrorKind::Other, "socket closed");

        let document = map_unclassified(&failure);
        let entry = only_entry(&document);

        assert_eq!(entry.code, "INVALID_FORMAT");
        assert_eq!(entry.description.as_deref(), Some("socket closed"));
        assert!(entry.parameters.is_none());
    }
}

mod wire_format_tests {
    use super::*;

    #[test]
    fn test_wire_shape_omits_absent_fields() {
        let document = map_functional(&basic::not_found());
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value, json!({ "errors": [ { "code": "NOT_FOUND" } ] }));
    }

    #[test]
    fn test_wire_shape_full_entry() {
        let error = basic::invalid_format_with("{} is too long", params!["lastname"]);
        let value = serde_json::to_value(map_functional(&error)).unwrap();

        assert_eq!(
            value,
            json!({
                "errors": [
                    {
                        "code": "INVALID_FORMAT",
                        "description": "lastname is too long",
                        "parameters": ["lastname"]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_decoding_duplicate_entries_collapses() {
        let body = r#"{"errors":[{"code":"NOT_FOUND"},{"code":"NOT_FOUND"}]}"#;
        let document: ErrorDocument = serde_json::from_str(body).unwrap();
        assert_eq!(document.len(), 1);
    }

    #[test]
    fn test_roundtrip_preserves_parameter_order() {
        let error = basic::invalid_format_with("{} {} {}", params!["c", "a", "b"]);
        let document = map_functional(&error);

        let json = serde_json::to_string(&document).unwrap();
        let decoded: ErrorDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, document);
        assert_eq!(
            only_entry(&decoded).parameters,
            Some(vec!["c".to_string(), "a".to_string(), "b".to_string()])
        );
    }
}

proptest! {
    #[test]
    fn field_violation_entries_match_distinct_descriptions(
        violations in prop::collection::vec(("[a-c]{1,2}", "[x-z]{1,2}"), 0..20)
    ) {
        let violations: Vec<FieldViolation> = violations
            .into_iter()
            .map(|(field, message)| FieldViolation::new(field, message))
            .collect();

        let distinct: std::collections::HashSet<String> =
            violations.iter().map(ToString::to_string).collect();
        let document = map_field_violations(&violations);

        prop_assert_eq!(document.len(), distinct.len());
        for description in &distinct {
            prop_assert!(document.contains("INVALID_FORMAT", description));
        }
    }

    #[test]
    fn constraint_violation_entries_match_distinct_descriptions(
        violations in prop::collection::vec(("[a-c]{1,2}", "[x-z]{1,2}"), 0..20)
    ) {
        let violations: Vec<ConstraintViolation> = violations
            .into_iter()
            .map(|(path, message)| ConstraintViolation::new(path, message))
            .collect();

        let distinct: std::collections::HashSet<String> =
            violations.iter().map(ToString::to_string).collect();
        let document = map_constraint_violations(&violations);

        prop_assert_eq!(document.len(), distinct.len());
        for description in &distinct {
            prop_assert!(document.contains("INVALID_FORMAT", description));
        }
    }
}
