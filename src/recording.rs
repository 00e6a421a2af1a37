//! Test doubles that record what would have been emitted.
//!
//! These allocate and are meant for host-side tests, not for the reporting
//! path on a device.
//!
//! - [`RecordingReporter`] stands in for any [`ErrorReporter`] and keeps each
//!   formatted message.
//! - [`RecordingSink`] stands in for the platform output channel and keeps
//!   the exact text the reporter wrote, line terminators included.

use alloc::{string::String, vec::Vec};
use core::{
    fmt,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::{
    error::{ReportError, SinkError},
    lock::Lock,
    reporter::{ErrorReporter, ReportResult},
    sink::DebugSink,
};

/// An [`ErrorReporter`] that stores every message instead of emitting it.
///
/// # Examples
///
/// ```
/// use micro_reporter::{ErrorReporter, recording::RecordingReporter, report_error};
///
/// let reporter = RecordingReporter::new();
/// let _ = report_error!(reporter, "{} apples", 3);
/// assert_eq!(reporter.messages(), ["3 apples"]);
/// ```
pub struct RecordingReporter {
    messages: Lock<Vec<String>>,
    fail_next: AtomicBool,
}

impl RecordingReporter {
    /// Creates a reporter with no recorded messages.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Lock::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    /// All messages recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// The most recent message.
    pub fn last(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Forgets all recorded messages.
    pub fn clear(&self) {
        self.messages.lock().clear();
    }

    /// Makes the next report fail with a sink error without recording it.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::Release);
    }
}

impl Default for RecordingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, args: fmt::Arguments<'_>) -> ReportResult {
        if self.fail_next.swap(false, Ordering::AcqRel) {
            return Err(ReportError::Sink(SinkError::new()));
        }

        let message = alloc::fmt::format(args);
        let written = message.len();
        self.messages.lock().push(message);
        Ok(written)
    }
}

impl fmt::Debug for RecordingReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingReporter")
            .field("messages", &*self.messages.lock())
            .finish_non_exhaustive()
    }
}

/// A [`DebugSink`] that appends everything written to it to a string.
///
/// Usable as a `static`, which is what [`install_sink`] requires.
///
/// [`install_sink`]: crate::sink::install_sink
pub struct RecordingSink {
    text: Lock<String>,
    failure: Lock<Option<SinkError>>,
    writes: AtomicUsize,
}

impl RecordingSink {
    /// Creates an empty sink that accepts every write.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: Lock::new(String::new()),
            failure: Lock::new(None),
            writes: AtomicUsize::new(0),
        }
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.text.lock().clone()
    }

    /// Returns everything written so far and empties the sink.
    pub fn take(&self) -> String {
        core::mem::take(&mut *self.text.lock())
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Acquire)
    }

    /// Makes every following write fail with `failure`, or accept writes
    /// again when `None`.
    pub fn set_failing(&self, failure: Option<SinkError>) {
        *self.failure.lock() = failure;
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugSink for RecordingSink {
    fn write_str(&self, text: &str) -> Result<(), SinkError> {
        if let Some(failure) = *self.failure.lock() {
            return Err(failure);
        }

        self.text.lock().push_str(text);
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

impl fmt::Debug for RecordingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSink")
            .field("text", &*self.text.lock())
            .field("writes", &self.write_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubles_send_sync() {
        static_assertions::assert_impl_all!(RecordingReporter: Send, Sync);
        static_assertions::assert_impl_all!(RecordingSink: Send, Sync);
    }

    #[test]
    fn test_recording_reporter_delivers_unmodified() {
        let reporter = RecordingReporter::new();
        assert!(reporter.is_empty());

        let status = reporter.report(format_args!(
            "Type {} ({}) not supported.",
            "INT64", 4
        ));
        assert_eq!(status, Ok(29));
        assert_eq!(reporter.last().as_deref(), Some("Type INT64 (4) not supported."));
        assert_eq!(reporter.len(), 1);

        reporter.clear();
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_recording_reporter_fail_next() {
        let reporter = RecordingReporter::new();
        reporter.fail_next();
        assert_eq!(
            reporter.report_str("lost"),
            Err(ReportError::Sink(SinkError::new()))
        );
        assert_eq!(reporter.report_str("kept"), Ok(4));
        assert_eq!(reporter.messages(), ["kept"]);
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.write_str("a").unwrap();
        sink.set_failing(Some(SinkError::new()));
        assert_eq!(sink.write_str("b"), Err(SinkError::new()));
        sink.set_failing(None);
        sink.write_str("c").unwrap();

        assert_eq!(sink.write_count(), 2);
        assert_eq!(sink.take(), "ac");
        assert_eq!(sink.contents(), "");
    }
}
