//! Custom Test Assertions
//!
//! Assertion helpers for registration outcomes that give more meaningful
//! failure messages than bare `assert!` calls.

use chaincode_client::ResolutionError;
use repo_support::{RegistrationReport, SkipReason, SupportError};

/// Asserts that an error is an unknown-client resolution failure naming the
/// expected reference
pub fn assert_unknown_client(error: &SupportError, reference: &str) {
    match error {
        SupportError::Resolution(ResolutionError::UnknownClient { name, .. }) => {
            assert_eq!(
                name, reference,
                "Unknown-client error names '{name}', expected '{reference}'"
            );
        }
        other => panic!("Expected UnknownClient for '{reference}', got: {other}"),
    }
}

/// Asserts that an error is an ambiguous-client resolution failure with the
/// expected instance count
pub fn assert_ambiguous_client(error: &SupportError, reference: &str, expected_count: usize) {
    match error {
        SupportError::Resolution(ResolutionError::AmbiguousClient { name, count }) => {
            assert_eq!(
                name, reference,
                "Ambiguous-client error names '{name}', expected '{reference}'"
            );
            assert_eq!(
                *count, expected_count,
                "Ambiguous-client error counts {count} instances, expected {expected_count}"
            );
        }
        other => panic!("Expected AmbiguousClient for '{reference}', got: {other}"),
    }
}

/// Asserts that exactly the given repositories were registered, in order
pub fn assert_registered(report: &RegistrationReport, expected: &[&str]) {
    let registered: Vec<&str> = report.registered().iter().map(String::as_str).collect();
    assert_eq!(
        registered, expected,
        "Registered repositories {registered:?} do not match expected {expected:?}"
    );
    assert_eq!(
        report.registry().len(),
        expected.len(),
        "Registry size does not match the report"
    );
    for name in expected {
        assert!(
            report.registry().contains(name),
            "Repository '{name}' is in the report but not in the registry"
        );
    }
}

/// Asserts that a candidate was skipped for the given reason
pub fn assert_skipped(report: &RegistrationReport, name: &str, reason: SkipReason) {
    let skip = report
        .skipped()
        .iter()
        .find(|skip| skip.name == name)
        .unwrap_or_else(|| {
            panic!(
                "Candidate '{name}' was not skipped; skipped: {:?}",
                report.skipped()
            )
        });
    assert_eq!(
        skip.reason, reason,
        "Candidate '{name}' skipped as {}, expected {}",
        skip.reason, reason
    );
}

/// Unwraps an Ok value with a readable panic on Err
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {e}"),
        }
    };
}

/// Unwraps an Err value with a readable panic on Ok
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(_) => panic!("Expected Err, got Ok"),
            Err(e) => e,
        }
    };
}
