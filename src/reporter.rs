//! The reporting capability shared by every backend.
//!
//! Runtime code that detects a failure talks to an [`ErrorReporter`], never to
//! a concrete backend. The default backend is reached through
//! [`micro_error_reporter`], but anything that accepts a reporter also accepts
//! a test double such as `recording::RecordingReporter`.
//!
//! [`micro_error_reporter`]: crate::micro_error_reporter

use core::fmt;

use crate::error::ReportError;

/// Outcome of a single report.
///
/// `Ok(n)` carries the number of message bytes that reached the sink, after
/// any truncation and not counting a backend's line terminator.
pub type ReportResult = Result<usize, ReportError>;

/// Something that can format and emit a diagnostic message.
///
/// Implementations must not allocate on the reporting path of production
/// backends: errors are often reported because memory ran out. Each call is
/// one synchronous write; there is no buffering between calls.
///
/// Formatting uses [`fmt::Arguments`], so a mismatch between the format
/// string and its arguments is rejected at compile time.
///
/// # Examples
///
/// ```
/// use core::{
///     fmt,
///     sync::atomic::{AtomicUsize, Ordering},
/// };
///
/// use micro_reporter::{ErrorReporter, ReportResult};
///
/// #[derive(Default)]
/// struct CountingReporter(AtomicUsize);
///
/// impl ErrorReporter for CountingReporter {
///     fn report(&self, _args: fmt::Arguments<'_>) -> ReportResult {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         Ok(0)
///     }
/// }
///
/// fn prepare(reporter: &dyn ErrorReporter, tensors: usize) {
///     if tensors == 0 {
///         let _ = reporter.report(format_args!("model has {} tensors", tensors));
///     }
/// }
///
/// let reporter = CountingReporter::default();
/// prepare(&reporter, 0);
/// prepare(&reporter, 4);
/// assert_eq!(reporter.0.load(Ordering::Relaxed), 1);
/// ```
pub trait ErrorReporter: Send + Sync {
    /// Formats `args` and emits the result.
    fn report(&self, args: fmt::Arguments<'_>) -> ReportResult;

    /// Emits `message` verbatim.
    fn report_str(&self, message: &str) -> ReportResult {
        self.report(format_args!("{message}"))
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &R {
    #[inline]
    fn report(&self, args: fmt::Arguments<'_>) -> ReportResult {
        (**self).report(args)
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &mut R {
    #[inline]
    fn report(&self, args: fmt::Arguments<'_>) -> ReportResult {
        (**self).report(args)
    }
}

/// Collapses a [`ReportResult`] into the integer status convention of
/// formatted-output routines: the character count on success, a negative
/// value on failure.
///
/// ```
/// use micro_reporter::{error::ReportError, reporter::status};
///
/// assert_eq!(status(&Ok(8)), 8);
/// assert_eq!(status(&Err(ReportError::NoSink)), -1);
/// ```
#[must_use]
pub fn status(result: &ReportResult) -> i32 {
    match result {
        Ok(written) => i32::try_from(*written).unwrap_or(i32::MAX),
        Err(error) => error.status(),
    }
}
