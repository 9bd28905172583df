//! Structured diagnostic view for trusted message sinks.
//!
//! # Properties
//!
//! - Borrows from a `CodedError` with an explicit lifetime
//! - CANNOT outlive the error that created it
//! - Always carries the full cause chain, whatever the visibility flag says
//! - Bounded output: every field is truncated on a UTF-8 boundary
//!
//! The visibility flag governs `Display`, which is what ends up in responses.
//! Logs are the trusted sink, so this view ignores the flag and records it
//! alongside the chain instead.
//!
//! Fields are truncated while they stream, so cause text never passes
//! through an intermediate `String`. Materialized text is returned as
//! `Zeroizing<String>` and wiped on drop.

use crate::chain;
use crate::CodedError;
use smallvec::SmallVec;
use std::error::Error;
use std::fmt::{self, Write as _};
use zeroize::{Zeroize, Zeroizing};

/// Maximum length for any individual field in formatted output
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Content kept ahead of the indicator when a field is truncated
const MAX_FIELD_CONTENT_LEN: usize = MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len();

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed cause links; most chains are short.
pub type CauseLinks<'a> = SmallVec<[&'a (dyn Error + 'static); 4]>;

/// Structured log entry borrowing from a [`CodedError`].
///
/// # Example
///
/// ```rust
/// # use coded_errors::CodedError;
/// let err = CodedError::new()
///     .with_code("InternalServerError")
///     .with_internal(std::io::Error::other("database connection timed out"));
///
/// let mut line = String::new();
/// err.diagnostic_log().write_to(&mut line).unwrap();
/// assert_eq!(
///     line,
///     "[InternalServerError] cause='database connection timed out'"
/// );
/// ```
#[derive(Debug)]
pub struct DiagnosticLog<'a> {
    /// Error code
    pub code: &'a str,
    /// Visibility flag of the source error
    pub internal_shown: bool,
    /// Cause chain, outermost first
    pub causes: CauseLinks<'a>,
}

impl<'a> DiagnosticLog<'a> {
    pub(crate) fn new(err: &'a CodedError) -> Self {
        let causes = match err.source() {
            Some(first) => chain::chain(first).collect(),
            None => SmallVec::new(),
        };
        Self {
            code: err.code(),
            internal_shown: err.is_internal_shown(),
            causes,
        }
    }

    /// Error code.
    #[inline]
    pub const fn code(&self) -> &str {
        self.code
    }

    /// Whether `Display` of the source error shows the cause.
    #[inline]
    pub const fn is_internal_shown(&self) -> bool {
        self.internal_shown
    }

    /// The direct internal cause, if any.
    #[inline]
    pub fn internal(&self) -> Option<&'a (dyn Error + 'static)> {
        self.causes.first().copied()
    }

    /// Every cause link, outermost first.
    #[inline]
    pub fn causes(&self) -> &[&'a (dyn Error + 'static)] {
        &self.causes
    }

    /// Write structured log data straight into `f`.
    ///
    /// Format: `[<code>] cause='<first>' caused_by='<second>' ...`
    ///
    /// Each field streams through a bounded writer; nothing is buffered
    /// except the few bytes that might still be replaced by the truncation
    /// indicator. Fails if `f` fails or if a cause's `Display` fails.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_char('[')?;
        write_field(&mut *f, format_args!("{}", self.code))?;
        f.write_char(']')?;

        for (depth, link) in self.causes.iter().enumerate() {
            f.write_str(if depth == 0 { " cause='" } else { " caused_by='" })?;
            write_field(&mut *f, format_args!("{}", link))?;
            f.write_char('\'')?;
        }

        Ok(())
    }

    /// Materialize [`write_to`](Self::write_to) into a buffer that is
    /// zeroized when dropped.
    ///
    /// # Errors
    ///
    /// Returns `fmt::Error` when a cause's `Display` fails. The partial
    /// line is wiped rather than returned.
    pub fn to_zeroizing_string(&self) -> Result<Zeroizing<String>, fmt::Error> {
        let mut buffer = Zeroizing::new(String::new());
        self.write_to(&mut *buffer)?;
        Ok(buffer)
    }

    /// Format with each cause's `Debug` representation.
    ///
    /// WARNING: `Debug` output of foreign errors can contain anything.
    /// Only available with BOTH the `trusted_debug` feature AND debug
    /// assertions enabled.
    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    pub fn format_for_trusted_debug(&self) -> Result<Zeroizing<String>, fmt::Error> {
        let mut output = Zeroizing::new(String::new());
        let out = &mut *output;

        out.write_char('[')?;
        write_field(&mut *out, format_args!("{}", self.code))?;
        out.write_str(if self.internal_shown { "] [SHOWN]" } else { "] [HIDDEN]" })?;

        for link in &self.causes {
            out.write_str(" {")?;
            write_field(&mut *out, format_args!("{:?}", link))?;
            out.write_char('}')?;
        }

        Ok(output)
    }
}

impl CodedError {
    /// Create a structured diagnostic view with explicit lifetime.
    ///
    /// The view borrows from `self` and cannot be retained after the error
    /// is gone.
    #[inline]
    pub fn diagnostic_log(&self) -> DiagnosticLog<'_> {
        DiagnosticLog::new(self)
    }

    /// Callback-style access for logging frameworks.
    ///
    /// ```rust
    /// # use coded_errors::CodedError;
    /// # let err = CodedError::sentinel("A");
    /// let code_len = err.with_diagnostic_log(|log| log.code().len());
    /// assert_eq!(code_len, 1);
    /// ```
    #[inline]
    pub fn with_diagnostic_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DiagnosticLog<'_>) -> R,
    {
        let log = self.diagnostic_log();
        f(&log)
    }
}

/// Stream one formatted field into `out`, truncated to
/// `MAX_FIELD_OUTPUT_LEN` bytes on a UTF-8 boundary.
fn write_field<W: fmt::Write>(out: &mut W, value: fmt::Arguments<'_>) -> fmt::Result {
    let mut field = BoundedField::new(out);
    field.write_fmt(value)?;
    field.finish()
}

/// `fmt::Write` adapter enforcing the per-field length limit.
///
/// Up to `MAX_FIELD_CONTENT_LEN` bytes go straight through. Whatever follows
/// is held in `pending` (never more than the indicator length plus one
/// character) until the field either ends within `MAX_FIELD_OUTPUT_LEN`,
/// when it is flushed, or overflows, when it is replaced by the indicator.
struct BoundedField<'w, W: fmt::Write> {
    out: &'w mut W,
    written: usize,
    pending: SmallVec<[u8; 32]>,
    truncated: bool,
}

impl<'w, W: fmt::Write> BoundedField<'w, W> {
    fn new(out: &'w mut W) -> Self {
        Self {
            out,
            written: 0,
            pending: SmallVec::new(),
            truncated: false,
        }
    }

    fn finish(&mut self) -> fmt::Result {
        if self.truncated {
            return self.out.write_str(TRUNCATION_INDICATOR);
        }
        // pending only ever receives whole-character suffixes
        let tail = std::str::from_utf8(&self.pending).map_err(|_| fmt::Error)?;
        self.out.write_str(tail)
    }

    fn discard_pending(&mut self) {
        self.pending.as_mut_slice().zeroize();
        self.pending.clear();
    }
}

impl<W: fmt::Write> fmt::Write for BoundedField<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let mut rest = s;
        if self.pending.is_empty() {
            let mut cut = (MAX_FIELD_CONTENT_LEN - self.written).min(rest.len());
            while !rest.is_char_boundary(cut) {
                cut -= 1;
            }
            self.out.write_str(&rest[..cut])?;
            self.written += cut;
            rest = &rest[cut..];
        }

        if rest.is_empty() {
            return Ok(());
        }

        if self.written + self.pending.len() + rest.len() <= MAX_FIELD_OUTPUT_LEN {
            self.pending.extend_from_slice(rest.as_bytes());
        } else {
            self.discard_pending();
            self.truncated = true;
        }
        Ok(())
    }
}

impl<W: fmt::Write> Drop for BoundedField<'_, W> {
    fn drop(&mut self) {
        self.discard_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn bounded(s: &str) -> String {
        let mut out = String::new();
        write_field(&mut out, format_args!("{}", s)).unwrap();
        out
    }

    /// Cause whose `Display` arrives in many small writes.
    #[derive(Debug)]
    struct Chunked(&'static str, usize);

    impl fmt::Display for Chunked {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for _ in 0..self.1 {
                f.write_str(self.0)?;
            }
            Ok(())
        }
    }

    impl Error for Chunked {}

    /// Cause whose `Display` gives up halfway.
    #[derive(Debug)]
    struct Unprintable;

    impl fmt::Display for Unprintable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("partial secret")?;
            Err(fmt::Error)
        }
    }

    impl Error for Unprintable {}

    #[test]
    fn truncate_ascii() {
        let truncated = bounded(&"a".repeat(MAX_FIELD_OUTPUT_LEN + 10));

        assert_eq!(truncated.len(), MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn no_truncate_when_under_limit() {
        assert_eq!(bounded("short string"), "short string");
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = bounded(&s);

        assert_eq!(truncated, s);
        assert!(!truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn one_over_limit() {
        let truncated = bounded(&"a".repeat(MAX_FIELD_OUTPUT_LEN + 1));

        assert_eq!(truncated.len(), MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn truncate_utf8_boundary() {
        // 'й' is 2 bytes; the odd prefix forces a mid-char cut
        let s = format!("a{}", "й".repeat(MAX_FIELD_OUTPUT_LEN));
        let truncated = bounded(&s);

        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
        assert!(truncated.starts_with("aй"));
    }

    #[test]
    fn chunked_writes_truncate_like_one_write() {
        let whole = "🔥".repeat(300);
        let streamed = CodedError::new()
            .with_code("A")
            .with_internal(Chunked("🔥", 300));
        let single = CodedError::new()
            .with_code("A")
            .with_internal(io::Error::other(whole));

        let streamed = streamed.diagnostic_log().to_zeroizing_string().unwrap();
        let single = single.diagnostic_log().to_zeroizing_string().unwrap();
        assert_eq!(*streamed, *single);
        assert!(streamed.ends_with("...[TRUNCATED]'"));
    }

    #[test]
    fn chunked_writes_within_limit_are_flushed() {
        // 1020 bytes: past the content limit but within the field limit
        let err = CodedError::new()
            .with_code("A")
            .with_internal(Chunked("abcd", 255));
        let rendered = err.diagnostic_log().to_zeroizing_string().unwrap();
        assert_eq!(*rendered, format!("[A] cause='{}'", "abcd".repeat(255)));
    }

    #[test]
    fn log_without_cause() {
        let err = CodedError::sentinel("UserNotFound");
        let log = err.diagnostic_log();

        assert_eq!(log.code(), "UserNotFound");
        assert!(log.internal().is_none());
        assert!(log.causes().is_empty());
        assert_eq!(&*log.to_zeroizing_string().unwrap(), "[UserNotFound]");
    }

    #[test]
    fn log_includes_hidden_cause() {
        let err = CodedError::new()
            .with_code("INVALID_NAME")
            .with_internal(io::Error::other("name is missing"));

        assert_eq!(err.to_string(), "INVALID_NAME");
        err.with_diagnostic_log(|log| {
            assert!(!log.is_internal_shown());
            assert_eq!(log.internal().unwrap().to_string(), "name is missing");
            assert_eq!(
                &*log.to_zeroizing_string().unwrap(),
                "[INVALID_NAME] cause='name is missing'"
            );
        });
    }

    #[test]
    fn log_walks_nested_chain() {
        let inner = CodedError::new()
            .with_code("DbTimeout")
            .with_internal(io::Error::other("read timed out after 30s"));
        let outer = CodedError::new()
            .with_code("InternalServerError")
            .with_internal(inner)
            .show_internal();

        let log = outer.diagnostic_log();
        assert!(log.is_internal_shown());
        assert_eq!(log.causes().len(), 2);
        assert_eq!(
            &*log.to_zeroizing_string().unwrap(),
            "[InternalServerError] cause='DbTimeout' caused_by='read timed out after 30s'"
        );
    }

    #[test]
    fn log_output_is_bounded() {
        let err = CodedError::new()
            .with_code("X".repeat(5000))
            .with_internal(io::Error::other("y".repeat(5000)));

        let rendered = err.diagnostic_log().to_zeroizing_string().unwrap();
        assert!(rendered.len() < 3 * MAX_FIELD_OUTPUT_LEN);
        assert_eq!(rendered.matches(TRUNCATION_INDICATOR).count(), 2);
    }

    #[test]
    fn failing_cause_display_is_reported() {
        let err = CodedError::new()
            .with_code("A")
            .with_internal(Unprintable);

        assert!(err.diagnostic_log().to_zeroizing_string().is_err());

        // write_to hands the caller whatever was written before the failure
        let mut line = String::new();
        assert!(err.diagnostic_log().write_to(&mut line).is_err());
        assert!(line.starts_with("[A] cause='"));
    }

    #[cfg(all(feature = "trusted_debug", debug_assertions))]
    #[test]
    fn trusted_debug_includes_debug_repr() {
        let err = CodedError::new()
            .with_code("A")
            .with_internal(io::Error::other("boom"));
        let out = err.diagnostic_log().format_for_trusted_debug().unwrap();
        assert!(out.starts_with("[A] [HIDDEN]"));
        assert!(out.contains("boom"));
    }
}
