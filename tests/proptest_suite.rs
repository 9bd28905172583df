//! Property-based tests for coded_errors
//!
//! These tests use proptest to generate random inputs and verify invariants hold.

use coded_errors::{chain, CodedError};
use proptest::prelude::*;
use std::io;

// ============================================================================
// BUILDER PROPERTIES
// ============================================================================

proptest! {
    /// Code and cause read back exactly as set
    #[test]
    fn builders_round_trip(code in "\\PC{0,200}", cause in "\\PC{0,200}") {
        let err = CodedError::new()
            .with_code(code.clone())
            .with_internal(io::Error::other(cause.clone()));

        prop_assert_eq!(err.code(), code.as_str());
        prop_assert_eq!(err.internal().unwrap().to_string(), cause);
        prop_assert!(!err.is_internal_shown());
    }

    /// The last visibility toggle wins
    #[test]
    fn last_toggle_wins(toggles in prop::collection::vec(any::<bool>(), 1..20)) {
        let mut err = CodedError::sentinel("X");
        for &show in &toggles {
            err = if show { err.show_internal() } else { err.hide_internal() };
        }
        prop_assert_eq!(err.is_internal_shown(), *toggles.last().unwrap());
    }
}

// ============================================================================
// RENDERING PROPERTIES
// ============================================================================

proptest! {
    /// Hidden display is exactly the code and never contains the cause
    #[test]
    fn hidden_display_leaks_nothing(
        code in "[A-Za-z_]{0,40}",
        cause in "[0-9]{3,100}",
    ) {
        let err = CodedError::new()
            .with_code(code.clone())
            .with_internal(io::Error::other(cause.clone()));

        let display = err.to_string();
        prop_assert_eq!(&display, &code);
        prop_assert!(!display.contains(&cause));
    }

    /// Shown display is `code: cause`
    #[test]
    fn shown_display_format(code in "\\PC{0,100}", cause in "\\PC{0,100}") {
        let err = CodedError::new()
            .with_code(code.clone())
            .with_internal(io::Error::other(cause.clone()))
            .show_internal();

        prop_assert_eq!(err.to_string(), format!("{}: {}", code, cause));
    }

    /// Diagnostic output stays valid UTF-8 and bounded
    #[test]
    fn diagnostic_log_is_bounded(code in "\\PC{0,3000}", cause in "\\PC{0,3000}") {
        let err = CodedError::new()
            .with_code(code)
            .with_internal(io::Error::other(cause));

        let rendered = err.diagnostic_log().to_zeroizing_string().unwrap();
        prop_assert!(std::str::from_utf8(rendered.as_bytes()).is_ok());
        prop_assert!(rendered.len() < 4096);
    }
}

// ============================================================================
// MATCHING PROPERTIES
// ============================================================================

proptest! {
    /// Matching against a coded sentinel is code equality
    #[test]
    fn sentinel_match_is_code_equality(
        subject in "[A-Z]{1,8}",
        target in "[A-Z]{1,8}",
    ) {
        let err = CodedError::new().with_code(subject.clone());
        let sentinel = CodedError::new().with_code(target.clone());
        prop_assert_eq!(chain::is(&err, Some(&sentinel)), subject == target);
    }

    /// The empty sentinel matches every coded error
    #[test]
    fn empty_sentinel_matches_all(code in "\\PC{0,100}", shown in any::<bool>()) {
        let mut err = CodedError::new().with_code(code);
        if shown {
            err = err.show_internal();
        }
        prop_assert!(chain::is(&err, Some(&CodedError::new())));
    }

    /// Equal messages never stand in for the cause itself
    #[test]
    fn cause_match_is_identity(message in "\\PC{0,100}") {
        let err = CodedError::new()
            .with_code("X")
            .with_internal(io::Error::other(message.clone()));
        let lookalike = io::Error::other(message);
        prop_assert!(!chain::is(&err, Some(&lookalike)));
    }
}
