//! Errors produced while emitting a report.
//!
//! Reporting failures are values, never panics. A reporter exists to describe
//! *other* failures, so the worst it may do when its own output path breaks is
//! hand one of these back to a caller that is free to ignore it.

use core::fmt;

/// Failure signalled by a [`DebugSink`] when the platform rejected a write.
///
/// Platforms that have a native error code (for example a negative return
/// value from a UART driver) can carry it along with [`SinkError::with_code`].
///
/// [`DebugSink`]: crate::sink::DebugSink
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SinkError {
    code: Option<i32>,
}

impl SinkError {
    /// A write failure without further detail.
    #[must_use]
    pub const fn new() -> Self {
        Self { code: None }
    }

    /// A write failure carrying the platform's own error code.
    #[must_use]
    pub const fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// The platform error code, if one was provided.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "debug sink rejected the write (code {code})"),
            None => write!(f, "debug sink rejected the write"),
        }
    }
}

impl core::error::Error for SinkError {}

/// Why a call to [`ErrorReporter::report`] did not emit its message.
///
/// [`ErrorReporter::report`]: crate::ErrorReporter::report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportError {
    /// No output channel has been installed for this process.
    NoSink,
    /// The output channel refused the write.
    Sink(SinkError),
    /// Another write to the output channel was still in progress on this
    /// execution context, for example when the sink itself reported.
    Busy,
}

impl ReportError {
    /// Status code used when no sink is installed.
    pub const NO_SINK_STATUS: i32 = -1;

    /// Status code used for sink failures without a negative platform code.
    pub const SINK_FAILURE_STATUS: i32 = -2;

    /// Status code used when a report was dropped because the sink was busy.
    pub const BUSY_STATUS: i32 = -3;

    /// The negative integer status matching this error, following the
    /// convention of formatted-output routines.
    ///
    /// A negative code supplied by the platform through
    /// [`SinkError::with_code`] is passed through unchanged.
    ///
    /// ```
    /// use micro_reporter::error::{ReportError, SinkError};
    ///
    /// assert_eq!(ReportError::NoSink.status(), -1);
    /// assert_eq!(ReportError::Sink(SinkError::new()).status(), -2);
    /// assert_eq!(ReportError::Sink(SinkError::with_code(-5)).status(), -5);
    /// assert_eq!(ReportError::Sink(SinkError::with_code(3)).status(), -2);
    /// assert_eq!(ReportError::Busy.status(), -3);
    /// ```
    #[must_use]
    pub const fn status(&self) -> i32 {
        match self {
            Self::NoSink => Self::NO_SINK_STATUS,
            Self::Sink(error) => match error.code {
                Some(code) if code < 0 => code,
                _ => Self::SINK_FAILURE_STATUS,
            },
            Self::Busy => Self::BUSY_STATUS,
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSink => write!(f, "no debug sink is installed"),
            Self::Sink(error) => fmt::Display::fmt(error, f),
            Self::Busy => write!(f, "debug sink is busy with another write"),
        }
    }
}

impl core::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::NoSink | Self::Busy => None,
            Self::Sink(error) => Some(error),
        }
    }
}

impl From<SinkError> for ReportError {
    fn from(error: SinkError) -> Self {
        Self::Sink(error)
    }
}
