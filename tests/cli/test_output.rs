//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Duration formatting (ms, s, m)
//! - Document lines
//! - Listing printing in both formats

use folk::cli::output::{format_duration, format_document, print_listing};
use folk::cli::OutputFormat;
use folk::core::types::{payload_from_str, Listing};

// =============================================================================
// format_duration tests
// =============================================================================

/// Test duration formatting with various times
#[test]
fn test_format_duration_various_times() {
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.0004), "0ms");
    assert_eq!(format_duration(0.25), "250ms");
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.99), "59.99s");
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.0), "2m 5.0s");
}

// =============================================================================
// document and listing tests
// =============================================================================

/// Test that document lines carry the id and the raw payload
#[test]
fn test_format_document_contains_payload() {
    let data = payload_from_str(r#"{"Title":"Pan"}"#).unwrap();
    let line = format_document(2, &data);
    assert!(line.contains("#2"));
    assert!(line.contains(r#"{"Title":"Pan"}"#));
}

/// Test that listings print in both formats, including empty ones
#[test]
fn test_print_listing_formats() {
    let listing = Listing {
        count: 1,
        time_ms: 0.2,
        hits: payload_from_str(r#"[{"ID":1,"Data":{"Title":"Sult"}}]"#).unwrap(),
    };
    let empty = Listing {
        count: 0,
        time_ms: 0.0,
        hits: payload_from_str("null").unwrap(),
    };

    for format in [OutputFormat::Human, OutputFormat::Json] {
        print_listing("Matches:", &listing, format).unwrap();
        print_listing("Matches:", &empty, format).unwrap();
    }
}

/// Test that a listing whose hits are not a snapshot array is rejected
#[test]
fn test_print_listing_rejects_bad_hits() {
    let listing = Listing {
        count: 1,
        time_ms: 0.0,
        hits: payload_from_str(r#"{"ID":1}"#).unwrap(),
    };
    assert!(print_listing("Matches:", &listing, OutputFormat::Human).is_err());
}
