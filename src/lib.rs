//! # Coded Errors
//!
//! Errors that carry a stable, user-safe **code** plus an optional
//! **internal cause**, with a per-instance switch deciding whether the cause
//! appears in the rendered message.
//!
//! ## Design Philosophy
//!
//! 1. **Codes are for everyone**: safe to return to clients, match on, or
//!    use as translation keys
//! 2. **Causes are for operators**: hidden from `Display` until explicitly shown
//! 3. **Chain tooling stays generic**: `source()` and one sentinel hook are
//!    all the type provides; [`chain`] does the walking
//!
//! ## Quick Start
//!
//! ```rust
//! use coded_errors::{chain, CodedError};
//! use std::error::Error;
//!
//! let err: Box<dyn Error + Send + Sync> = Box::new(
//!     CodedError::new()
//!         .with_code("InternalServerError")
//!         .with_internal(std::io::Error::other(
//!             "could not execute sql query: database connection timed out",
//!         )),
//! );
//!
//! // Client-facing: the code alone.
//! assert_eq!(err.to_string(), "InternalServerError");
//!
//! // Log-facing: recover the typed error and show the cause.
//! let logged = chain::find_coded(&*err).unwrap().clone().show_internal();
//! assert_eq!(
//!     logged.to_string(),
//!     "InternalServerError: could not execute sql query: database connection timed out"
//! );
//! ```
//!
//! ## Sentinels
//!
//! ```rust
//! use coded_errors::{chain, CodedError};
//!
//! const USER_NOT_FOUND: CodedError = CodedError::sentinel("UserNotFound");
//! const INTERNAL: CodedError = CodedError::sentinel("InternalServerError");
//!
//! let err = CodedError::new().with_code("UserNotFound");
//! assert!(chain::is(&err, Some(&CodedError::new()))); // any coded error
//! assert!(chain::is(&err, Some(&USER_NOT_FOUND)));
//! assert!(!chain::is(&err, Some(&INTERNAL)));
//! ```
//!
//! ## Features
//!
//! - `trusted_debug`: Enable `Debug`-level cause formatting in
//!   [`DiagnosticLog`] for trusted environments (debug builds only)

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::error::Error;
use std::sync::Arc;

pub mod chain;
pub mod coded;
pub mod convenience;
pub mod logging;

pub use coded::*;
pub use logging::*;

/// Internal cause attached to a [`CodedError`].
///
/// Shared ownership lets the chain walker recognise the exact cause object
/// by address.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Type alias for Results using our error type.
pub type Result<T> = std::result::Result<T, CodedError>;
