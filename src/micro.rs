//! The microcontroller backend.
//!
//! [`MicroErrorReporter`] formats each message into a buffer on the stack,
//! terminates it with [`LINE_ENDING`] and hands the line to the installed
//! [`DebugSink`] in a single write. Nothing on this path allocates.
//!
//! The only instance lives in static storage and is reached through
//! [`micro_error_reporter`].
//!
//! [`micro_error_reporter`]: crate::micro_error_reporter

use core::{
    cell::Cell,
    fmt::{self, Write},
};

use critical_section::{CriticalSection, Mutex};
use micro_reporter_internals::TruncatingBuffer;

use crate::{
    error::ReportError,
    reporter::{ErrorReporter, ReportResult},
    sink::{self, DebugSink},
};

/// Capacity, in bytes, of the formatting buffer used by the default
/// reporter, line terminator included.
pub const DEFAULT_BUFFER_LEN: usize = 256;

/// Appended to every message before it is written.
pub const LINE_ENDING: &str = "\r\n";

/// Error reporter for microcontroller targets.
///
/// Messages longer than `N - LINE_ENDING.len()` bytes are cut to fit. The cut
/// is silent and always lands on a character boundary; the terminator is
/// always written.
///
/// Every report formats into its own stack buffer, and the sink write
/// happens inside a [`critical_section`], so reports from concurrent contexts
/// come out as whole lines. The critical section is re-entrant: a report
/// issued while a write is in progress on the same execution context (from
/// the sink itself, or from an interrupt handler on an implementation that
/// allows nesting) is dropped with [`ReportError::Busy`] instead of waiting.
///
/// The application provides the critical-section implementation. The `std`
/// feature enables the one shipped with the `critical-section` crate.
///
/// Instances cannot be constructed outside this crate; use
/// [`micro_error_reporter`](crate::micro_error_reporter).
pub struct MicroErrorReporter<const N: usize = DEFAULT_BUFFER_LEN> {
    writing: Mutex<Cell<bool>>,
}

impl<const N: usize> MicroErrorReporter<N> {
    pub(crate) const fn new() -> Self {
        const { assert!(N > LINE_ENDING.len(), "buffer cannot hold a line terminator") };

        Self {
            writing: Mutex::new(Cell::new(false)),
        }
    }

    /// Capacity of the formatting buffer.
    pub const fn buffer_len(&self) -> usize {
        N
    }

    pub(crate) fn report_to(
        &self,
        sink: Option<&dyn DebugSink>,
        args: fmt::Arguments<'_>,
    ) -> ReportResult {
        let sink = sink.ok_or(ReportError::NoSink)?;

        let mut line = TruncatingBuffer::<N>::new();
        // A failing `Display` impl only shortens the message.
        let _ = line.write_fmt(args);
        line.truncate(N - LINE_ENDING.len());
        let written = line.len();
        line.push_str(LINE_ENDING);

        critical_section::with(|cs| -> ReportResult {
            let _writing = WriteGuard::acquire(&self.writing, cs)?;
            sink.write_str(line.as_str())?;
            Ok(written)
        })
    }
}

/// Marks a sink write as in progress for as long as it is alive.
///
/// The flag is cleared on drop, so a sink that panics halfway through a
/// write does not leave the reporter busy forever.
struct WriteGuard<'cs> {
    writing: &'cs Cell<bool>,
}

impl<'cs> WriteGuard<'cs> {
    fn acquire(
        writing: &'cs Mutex<Cell<bool>>,
        cs: CriticalSection<'cs>,
    ) -> Result<Self, ReportError> {
        let writing = writing.borrow(cs);
        if writing.replace(true) {
            return Err(ReportError::Busy);
        }
        Ok(Self { writing })
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.writing.set(false);
    }
}

impl<const N: usize> ErrorReporter for MicroErrorReporter<N> {
    fn report(&self, args: fmt::Arguments<'_>) -> ReportResult {
        self.report_to(sink::current_sink(), args)
    }
}

impl<const N: usize> fmt::Debug for MicroErrorReporter<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicroErrorReporter")
            .field("buffer_len", &N)
            .finish_non_exhaustive()
    }
}
