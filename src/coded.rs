//! The coded error type and its capability trait.
//!
//! A [`CodedError`] pairs a stable code that is safe to show to anyone with an
//! optional internal cause that is kept out of the rendered message until the
//! caller explicitly asks for it.
//!
//! # Sentinel Matching
//!
//! [`Coded::matches_sentinel`] only answers "is the target a `CodedError` with
//! a compatible code?". A sentinel with an empty code matches every
//! `CodedError`; a sentinel with a code matches on code equality alone. The
//! comparison is deliberately one-sided: a subject with an empty code does
//! NOT match a sentinel that carries a code.
//!
//! Matching the internal cause itself is left to [`crate::chain::is`], which
//! walks `source()` links.
//!
//! ```rust
//! use coded_errors::{chain, CodedError};
//!
//! const USER_NOT_FOUND: CodedError = CodedError::sentinel("UserNotFound");
//!
//! let err = CodedError::new()
//!     .with_code("UserNotFound")
//!     .with_internal(std::io::Error::other("no row for id 42"));
//!
//! assert!(chain::is(&err, Some(&USER_NOT_FOUND)));
//! assert!(chain::is(&err, Some(&CodedError::new())));
//! assert_eq!(err.to_string(), "UserNotFound");
//! ```

use crate::Cause;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Capability interface shared by coded errors.
///
/// Object safe, so consumers can hold a `&dyn Coded` or `&mut dyn Coded`
/// without naming the concrete type. Rendering is `Display` and unwrapping
/// is `Error::source`.
pub trait Coded: Error {
    /// The user-safe error code. Empty when unset.
    fn code(&self) -> &str;

    /// The internal cause, if one was attached.
    fn internal(&self) -> Option<&Cause>;

    /// Whether `Display` includes the internal cause.
    fn is_internal_shown(&self) -> bool;

    /// Replace the code in place.
    fn set_code(&mut self, code: Cow<'static, str>) -> &mut dyn Coded;

    /// Replace (or clear) the internal cause in place.
    fn set_internal(&mut self, cause: Option<Cause>) -> &mut dyn Coded;

    /// Toggle cause visibility in place.
    fn set_internal_shown(&mut self, shown: bool) -> &mut dyn Coded;

    /// Direct equivalence hook used by [`crate::chain::is`].
    ///
    /// Returns `false` for `None` and for any target that is not a
    /// [`CodedError`].
    fn matches_sentinel(&self, target: Option<&(dyn Error + 'static)>) -> bool;
}

/// Error with a user-safe code and an optional, hidden-by-default cause.
///
/// # Key Properties
///
/// - `code` is never validated; the empty string is the unset value
/// - `internal` is never rendered unless [`CodedError::show_internal`] was applied
/// - Builders consume and return `self`, so no two holders ever alias one instance
/// - Cloning is cheap and clones share the same cause object
///
/// There is deliberately no `From<E>` conversion for foreign errors: callers
/// pick the code explicitly.
#[derive(Clone, Default)]
#[must_use = "errors should be handled or logged"]
pub struct CodedError {
    code: Cow<'static, str>,
    internal: Option<Cause>,
    show_internal: bool,
}

impl CodedError {
    /// Create an error with no code, no cause, and the cause hidden.
    #[inline]
    pub const fn new() -> Self {
        Self {
            code: Cow::Borrowed(""),
            internal: None,
            show_internal: false,
        }
    }

    /// Create a code-only error usable as a `const` sentinel.
    ///
    /// ```rust
    /// # use coded_errors::CodedError;
    /// const INVALID_NAME: CodedError = CodedError::sentinel("INVALID_NAME");
    /// assert_eq!(INVALID_NAME.code(), "INVALID_NAME");
    /// ```
    #[inline]
    pub const fn sentinel(code: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            internal: None,
            show_internal: false,
        }
    }

    /// Set the code.
    #[inline]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Attach an internal cause, taking ownership of it.
    #[inline]
    pub fn with_internal<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.internal = Some(Arc::new(cause));
        self
    }

    /// Attach an already shared cause.
    ///
    /// The caller keeps its handle, and [`crate::chain::is`] will recognise
    /// that exact object when walking this error's chain.
    #[inline]
    pub fn with_shared_internal(mut self, cause: Cause) -> Self {
        self.internal = Some(cause);
        self
    }

    /// Drop the internal cause.
    #[inline]
    pub fn without_internal(mut self) -> Self {
        self.internal = None;
        self
    }

    /// Include the internal cause in `Display`. Use before handing the
    /// error to a trusted sink such as a log.
    #[inline]
    pub fn show_internal(mut self) -> Self {
        self.show_internal = true;
        self
    }

    /// Exclude the internal cause from `Display`. Use before handing the
    /// error to a client-facing sink.
    #[inline]
    pub fn hide_internal(mut self) -> Self {
        self.show_internal = false;
        self
    }

    /// Get the code.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the internal cause.
    #[inline]
    pub fn internal(&self) -> Option<&Cause> {
        self.internal.as_ref()
    }

    /// Check whether `Display` includes the internal cause.
    #[inline]
    pub const fn is_internal_shown(&self) -> bool {
        self.show_internal
    }

    /// Same-kind check against the closed set of coded variants.
    #[inline]
    fn sentinel_code<'a>(target: &'a (dyn Error + 'static)) -> Option<&'a str> {
        target.downcast_ref::<CodedError>().map(CodedError::code)
    }
}

impl Coded for CodedError {
    fn code(&self) -> &str {
        CodedError::code(self)
    }

    fn internal(&self) -> Option<&Cause> {
        CodedError::internal(self)
    }

    fn is_internal_shown(&self) -> bool {
        self.show_internal
    }

    fn set_code(&mut self, code: Cow<'static, str>) -> &mut dyn Coded {
        self.code = code;
        self
    }

    fn set_internal(&mut self, cause: Option<Cause>) -> &mut dyn Coded {
        self.internal = cause;
        self
    }

    fn set_internal_shown(&mut self, shown: bool) -> &mut dyn Coded {
        self.show_internal = shown;
        self
    }

    fn matches_sentinel(&self, target: Option<&(dyn Error + 'static)>) -> bool {
        match target.and_then(Self::sentinel_code) {
            Some(target_code) => target_code.is_empty() || target_code == self.code,
            None => false,
        }
    }
}

impl fmt::Debug for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodedError")
            .field("code", &self.code)
            .field("internal", &self.internal)
            .field("show_internal", &self.show_internal)
            .finish()
    }
}

impl fmt::Display for CodedError {
    /// `"<code>"` while hidden, `"<code>: <cause>"` while shown.
    ///
    /// A shown error without a cause renders as the bare code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.internal, self.show_internal) {
            (Some(cause), true) => write!(f, "{}: {}", self.code, cause),
            _ => f.write_str(&self.code),
        }
    }
}

impl Error for CodedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.internal
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}
