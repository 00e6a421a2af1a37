#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Allocation-free error reporting for inference runtimes on
//! microcontrollers.
//!
//! ## Overview
//!
//! Runtime code that hits a failure (an unsupported operator, an arena that
//! is too small, a tensor of the wrong type) needs to say so, and it needs to
//! say so on hardware without a heap, without exceptions and without a
//! standard I/O stack. This crate provides that facility:
//!
//! - **[`ErrorReporter`]**: the capability "format and emit a diagnostic
//!   message". The rest of the runtime is written against this trait.
//! - **[`MicroErrorReporter`]**: the backend for devices. It formats into a
//!   fixed buffer on the stack and writes one line to the platform's
//!   [`DebugSink`].
//! - **[`micro_error_reporter`]**: the process-wide default instance,
//!   constructed on first use and never destroyed.
//!
//! ## Quick Example
//!
//! ```
//! use micro_reporter::{ErrorReporter, micro_error_reporter, report_error};
//!
//! fn check_inputs(reporter: &dyn ErrorReporter, inputs: usize) -> Result<(), ()> {
//!     if inputs != 1 {
//!         let _ = report_error!(reporter, "Expected 1 input, got {}", inputs);
//!         return Err(());
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_inputs(micro_error_reporter(), 2).is_err());
//! ```
//!
//! ## Output Channel
//!
//! The reporter writes to whatever [`DebugSink`] the platform installed with
//! [`sink::install_sink`]. A function `fn(&str) -> Result<(), SinkError>` is
//! a sink, so hooking up a UART is a single call during boot. With the `std`
//! feature, reports go to standard error until something else is installed.
//! Without a sink, reports come back as [`ReportError::NoSink`] and nothing
//! else happens.
//!
//! ## Failure Behavior
//!
//! Reporting never panics and never aborts:
//!
//! - Messages longer than the buffer ([`DEFAULT_BUFFER_LEN`] bytes, line
//!   terminator included) are cut on a character boundary. This is not an
//!   error.
//! - A failing sink is reported back as [`ReportError::Sink`]; callers are
//!   free to ignore it, and later reports are unaffected.
//! - A report made while the sink is still writing on the same execution
//!   context (an interrupt handler, or the sink itself) is dropped with
//!   [`ReportError::Busy`] rather than waiting for the write to finish.
//! - Format strings are checked at compile time through
//!   [`core::fmt::Arguments`].
//!
//! ## Testing
//!
//! Code that takes a `&dyn ErrorReporter` can be handed a
//! `recording::RecordingReporter` in tests to see exactly which messages were
//! produced. `recording::RecordingSink` does the same one level down,
//! capturing the bytes the device backend would have written. Both need the
//! `alloc` feature.
//!
//! ## Features
//!
//! Without features the crate never touches a heap, so firmware without a
//! global allocator links it as is.
//!
//! - `alloc`: the `recording` test doubles.
//! - `std`: standard error fallback sink, `std::sync` locking and the
//!   `critical-section` implementation for hosted targets. Implies `alloc`.
//! - `log`: `logger::ReporterLogger`, routing the [`log`] facade into a
//!   reporter.
//!
//! [`DebugSink`]: crate::sink::DebugSink
//! [`ReportError::NoSink`]: crate::error::ReportError::NoSink
//! [`ReportError::Sink`]: crate::error::ReportError::Sink
//! [`ReportError::Busy`]: crate::error::ReportError::Busy
//! [`DEFAULT_BUFFER_LEN`]: crate::micro::DEFAULT_BUFFER_LEN
//! [`log`]: https://docs.rs/log

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod macros;

pub mod error;
#[cfg(feature = "log")]
#[cfg_attr(docsrs, doc(cfg(feature = "log")))]
pub mod logger;
pub mod micro;
#[cfg(any(test, feature = "alloc"))]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub mod recording;
pub mod reporter;
pub mod singleton;
pub mod sink;

mod lock;

pub use self::{
    micro::MicroErrorReporter,
    reporter::{ErrorReporter, ReportResult},
    singleton::{micro_error_reporter, micro_error_reporter_concrete},
};

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use core::format_args;

    use crate::micro_error_reporter;

    #[doc(hidden)]
    #[inline]
    #[cold]
    pub fn report_default(args: core::fmt::Arguments<'_>) {
        let _ = micro_error_reporter().report(args);
    }
}
