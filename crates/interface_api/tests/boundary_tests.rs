//! Tests for the boundary dispatcher
//!
//! Status policy, body disclosure and failure logging, without HTTP.

use std::io;

use axum::http::StatusCode;
use error_kernel::{basic, params, BasicErrorCode, InterfaceViolation, ServiceError};
use interface_api::boundary::{
    cause_chain, dispatch, dispatch_violation, functional_status, resolve, BoundaryResponse,
    Failure, RequestContext,
};
use proptest::prelude::*;
use test_utils::{
    assert_has_entry, assert_single_entry, field_violation_strategy, functional_error_strategy,
    CapturedLogs, FunctionalFixtures, TechnicalFixtures, ViolationFixtures, QUOTA_EXCEEDED,
};

fn context() -> RequestContext {
    RequestContext::new("GET", "/api/v1/persons/42")
}

mod status_policy_tests {
    use super::*;

    #[test]
    fn test_basic_codes() {
        let cases = [
            (basic::not_found(), StatusCode::NOT_FOUND),
            (basic::invalid_format(), StatusCode::BAD_REQUEST),
            (basic::unauthorized(), StatusCode::UNAUTHORIZED),
            (basic::forbidden(), StatusCode::FORBIDDEN),
        ];

        for (error, status) in cases {
            let response = dispatch(&error, &context());
            assert_eq!(response.status, status, "status of {}", error);
            assert!(response.body.is_some());
        }
    }

    #[test]
    fn test_custom_functional_code_is_bad_request() {
        let response = dispatch(&FunctionalFixtures::quota_exceeded(), &context());

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body.expect("functional errors carry a body");
        let entry = assert_single_entry(&body);
        assert_eq!(entry.code, QUOTA_EXCEEDED.name());
        assert_eq!(entry.description.as_deref(), Some("quota of 100 requests exceeded"));
    }

    #[test]
    fn test_status_follows_code_not_message() {
        let error = basic::not_found_with("forbidden {} unauthorized", params!["area"]);
        assert_eq!(functional_status(error.code()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_functional_inside_service_error() {
        let error: ServiceError = basic::unauthorized().into();
        let response = dispatch(&error, &context());

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.body.is_some());
    }
}

mod disclosure_tests {
    use super::*;

    #[test]
    fn test_technical_error_is_withheld() {
        for error in [TechnicalFixtures::storage_down(), TechnicalFixtures::invariant_broken()] {
            assert_eq!(dispatch(&error, &context()), BoundaryResponse::withheld());
        }
    }

    #[test]
    fn test_technical_inside_service_error_is_withheld() {
        let error: ServiceError = TechnicalFixtures::storage_down().into();
        assert_eq!(dispatch(&error, &context()), BoundaryResponse::withheld());
    }

    #[test]
    fn test_unclassified_error_is_withheld() {
        let error = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let response = dispatch(&error, &context());

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body.is_none());
    }
}

mod violation_tests {
    use super::*;

    #[test]
    fn test_duplicate_violations_collapse() {
        let response = dispatch_violation(&ViolationFixtures::payload(), &context());

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body.expect("violations carry a body");
        assert_eq!(body.len(), 2);
        assert_has_entry(&body, "INVALID_FORMAT", "lastname: must not be blank");
        assert_has_entry(&body, "INVALID_FORMAT", "email: must be a well-formed email address");
    }

    #[test]
    fn test_type_mismatch() {
        let response = dispatch_violation(&ViolationFixtures::id_mismatch(), &context());

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body.expect("violations carry a body");
        let entry = assert_single_entry(&body);
        assert_eq!(entry.code, BasicErrorCode::InvalidFormat.name());
        assert_eq!(
            entry.description.as_deref(),
            Some("Failed to convert value 'abc' of property 'id' to required type 'uuid'")
        );
    }

    #[test]
    fn test_classified_as_interface() {
        let violation = InterfaceViolation::unreadable("expected value at line 1 column 1");
        assert_eq!(Failure::classify(&violation).kind(), "interface");
    }
}

mod logging_tests {
    use super::*;

    #[test]
    fn test_functional_error_logged_with_context() {
        let logs = CapturedLogs::new();
        let context = context();

        tracing::subscriber::with_default(logs.subscriber(), || {
            dispatch(&FunctionalFixtures::person_not_found(), &context);
        });

        assert!(logs.contains("FunctionalError [code=NOT_FOUND, message=person {} not found, parameters=[42]]"));
        assert!(logs.contains(&context.request_id.to_string()));
        assert!(logs.contains("/api/v1/persons/42"));
        assert!(logs.contains("ERROR"));
    }

    #[test]
    fn test_technical_error_logged_with_causes() {
        let logs = CapturedLogs::new();

        tracing::subscriber::with_default(logs.subscriber(), || {
            dispatch(&TechnicalFixtures::storage_down(), &context());
        });

        assert!(logs.contains("code=STORAGE_UNAVAILABLE"));
        assert!(logs.contains("RETRIABLE"));
        assert!(logs.contains("connection refused"));
    }

    #[test]
    fn test_cause_chain_order() {
        let error = FunctionalFixtures::forbidden_with_cause();
        assert_eq!(cause_chain(&error), vec!["token revoked".to_string()]);
    }

    #[test]
    fn test_resolve_does_not_log() {
        let logs = CapturedLogs::new();

        tracing::subscriber::with_default(logs.subscriber(), || {
            resolve(&Failure::classify(&basic::forbidden()));
        });

        assert!(logs.contents().is_empty());
    }
}

proptest! {
    #[test]
    fn functional_errors_always_answer_with_body(error in functional_error_strategy()) {
        let response = resolve(&Failure::classify(&error));

        prop_assert!(response.status.is_client_error());
        let body = response.body.expect("functional errors carry a body");
        prop_assert_eq!(body.len(), 1);
        prop_assert!(body.iter().all(|entry| entry.code == error.code().name()));
    }

    #[test]
    fn violations_answer_with_one_entry_per_distinct_message(
        violations in prop::collection::vec(field_violation_strategy(), 1..20)
    ) {
        let distinct: std::collections::BTreeSet<String> =
            violations.iter().map(ToString::to_string).collect();

        let response = resolve(&Failure::classify(&InterfaceViolation::payload(violations)));

        prop_assert_eq!(response.status, StatusCode::BAD_REQUEST);
        let body = response.body.expect("violations carry a body");
        prop_assert_eq!(body.len(), distinct.len());
    }
}
