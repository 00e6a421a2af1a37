//! The platform output channel reports are written to.
//!
//! The reporter does not know how to reach a UART, a semihosting console or a
//! host terminal. Instead the platform installs a [`DebugSink`] once, early
//! during boot, and every report from then on goes to it.
//!
//! ```
//! use micro_reporter::{error::SinkError, sink};
//!
//! fn uart_write(text: &str) -> Result<(), SinkError> {
//!     // Hand `text` to the UART driver here.
//!     let _ = text;
//!     Ok(())
//! }
//!
//! sink::install_sink(&uart_write).expect("a sink is already installed");
//! ```
//!
//! # Memory Management
//!
//! Sinks are installed as `&'static` references. A sink that has been
//! installed is never dropped, even after being replaced, so a report that
//! fetched the previous sink can always finish its write.

use core::fmt;

use crate::{error::SinkError, lock::SlotLock};

/// A synchronous text output primitive, such as a console or UART write.
///
/// The whole of `text` is written or the call fails; there is no notion of a
/// partial write.
pub trait DebugSink: Send + Sync {
    /// Writes `text` to the output channel.
    fn write_str(&self, text: &str) -> Result<(), SinkError>;
}

impl<F> DebugSink for F
where
    F: Fn(&str) -> Result<(), SinkError> + Send + Sync,
{
    #[inline]
    fn write_str(&self, text: &str) -> Result<(), SinkError> {
        self(text)
    }
}

/// Error returned by [`install_sink`] when a sink is already installed.
///
/// Contains the sink that was attempted to be installed.
#[derive(Clone, Copy)]
pub struct SinkAlreadyInstalledError(pub &'static dyn DebugSink);

impl fmt::Debug for SinkAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkAlreadyInstalledError").finish()
    }
}

impl fmt::Display for SinkAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a debug sink is already installed")
    }
}

impl core::error::Error for SinkAlreadyInstalledError {}

static SINK: SlotLock<&'static dyn DebugSink> = SlotLock::new();

/// Installs the process-wide output channel.
///
/// Fails if a sink has already been installed; see [`replace_sink`] to swap
/// one out unconditionally.
pub fn install_sink(sink: &'static dyn DebugSink) -> Result<(), SinkAlreadyInstalledError> {
    SINK.set_if_empty(sink).map_err(SinkAlreadyInstalledError)
}

/// Installs `sink`, returning the previously installed sink if there was
/// one.
pub fn replace_sink(sink: &'static dyn DebugSink) -> Option<&'static dyn DebugSink> {
    SINK.replace(sink)
}

/// The sink reports are currently written to.
///
/// On `std` builds this falls back to [`StderrSink`] when nothing has been
/// installed, so it only returns `None` on targets without a standard error
/// stream.
pub fn current_sink() -> Option<&'static dyn DebugSink> {
    match SINK.get() {
        Some(sink) => Some(sink),
        #[cfg(feature = "std")]
        None => Some(&StderrSink),
        #[cfg(not(feature = "std"))]
        None => None,
    }
}

/// Host-side sink writing to the process's standard error stream.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

#[cfg(feature = "std")]
impl DebugSink for StderrSink {
    fn write_str(&self, text: &str) -> Result<(), SinkError> {
        use std::io::Write;

        std::io::stderr()
            .lock()
            .write_all(text.as_bytes())
            .map_err(|_| SinkError::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_object_safe() {
        static_assertions::assert_obj_safe!(DebugSink);
        static_assertions::assert_impl_all!(SinkAlreadyInstalledError: Send, Sync);
    }

    #[test]
    fn test_function_is_a_sink() {
        fn reject(_: &str) -> Result<(), SinkError> {
            Err(SinkError::with_code(-3))
        }

        let sink: &dyn DebugSink = &reject;
        assert_eq!(sink.write_str("x"), Err(SinkError::with_code(-3)));

        let accept = |_: &str| -> Result<(), SinkError> { Ok(()) };
        assert_eq!(DebugSink::write_str(&accept, "x"), Ok(()));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_stderr_is_the_fallback_sink() {
        // Nothing in this test binary installs a sink.
        assert!(SINK.get().is_none());

        let sink = current_sink().expect("std builds always have a sink");
        assert_eq!(sink.write_str(""), Ok(()));

        let reporter = crate::micro_error_reporter();
        assert_eq!(reporter.report_str("stderr fallback"), Ok(15));
    }
}
