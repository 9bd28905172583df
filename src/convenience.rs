//! Convenience macros for building coded errors.
//!
//! # Usage
//!
//! ```rust
//! # use coded_errors::{coded, bail_coded, CodedError};
//! let err = coded!("INVALID_NAME");
//! assert_eq!(err.code(), "INVALID_NAME");
//!
//! let err = coded!("INVALID_NAME", std::io::Error::other("name is missing"));
//! assert!(err.internal().is_some());
//!
//! fn lookup(id: u32) -> Result<(), CodedError> {
//!     if id == 0 {
//!         bail_coded!("UserNotFound");
//!     }
//!     Ok(())
//! }
//! assert_eq!(lookup(0).unwrap_err().code(), "UserNotFound");
//! ```
//!
//! The code argument must be a string literal, which keeps codes greppable
//! and prevents dynamic data from leaking into client-facing text. Build
//! the error by hand with `CodedError::with_code` when the code really is
//! computed.

/// Build a [`CodedError`](crate::CodedError) from a literal code and an
/// optional cause. The cause stays hidden.
#[macro_export]
macro_rules! coded {
    ($code:literal $(,)?) => {
        $crate::CodedError::sentinel($code)
    };
    ($code:literal, $cause:expr $(,)?) => {
        $crate::CodedError::sentinel($code).with_internal($cause)
    };
}

/// Return early with `Err(coded!(..).into())`.
#[macro_export]
macro_rules! bail_coded {
    ($($arg:tt)*) => {
        return ::std::result::Result::Err($crate::coded!($($arg)*).into())
    };
}
