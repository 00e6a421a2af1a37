/// Report a formatted message through a specific reporter.
///
/// The first argument is anything implementing [`ErrorReporter`] (a value, a
/// reference or a `&dyn ErrorReporter`); the rest is interpreted the same way
/// as the arguments of [`format_args!`]. Evaluates to the
/// [`ReportResult`] of the call.
///
/// [`ErrorReporter`]: crate::ErrorReporter
/// [`ReportResult`]: crate::reporter::ReportResult
///
/// # Examples
///
/// ```
/// use std::{fmt, sync::Mutex};
///
/// use micro_reporter::{ErrorReporter, ReportResult, report_error};
///
/// struct LastMessage(Mutex<String>);
///
/// impl ErrorReporter for LastMessage {
///     fn report(&self, args: fmt::Arguments<'_>) -> ReportResult {
///         let message = args.to_string();
///         let len = message.len();
///         *self.0.lock().unwrap() = message;
///         Ok(len)
///     }
/// }
///
/// fn allocate(reporter: &dyn ErrorReporter, requested: usize, available: usize) -> bool {
///     if requested > available {
///         let _ = report_error!(
///             reporter,
///             "Failed to allocate memory. Requested: {}, available {}, missing: {}",
///             requested,
///             available,
///             requested - available
///         );
///         return false;
///     }
///     true
/// }
///
/// let reporter = LastMessage(Mutex::new(String::new()));
/// assert!(!allocate(&reporter, 2048, 1024));
/// assert_eq!(
///     *reporter.0.lock().unwrap(),
///     "Failed to allocate memory. Requested: 2048, available 1024, missing: 1024"
/// );
/// ```
#[macro_export]
macro_rules! report_error {
    ($reporter:expr, $($arg:tt)+) => {
        $crate::ErrorReporter::report(&$reporter, $crate::__private::format_args!($($arg)+))
    };
}

/// Print a formatted message through the process-wide default reporter.
///
/// This is fire-and-forget: the outcome of the report is discarded, so a
/// missing or failing output channel never affects the caller.
///
/// # Examples
///
/// ```
/// use micro_reporter::micro_printf;
///
/// let node_index = 3;
/// micro_printf!("Node {} failed to prepare", node_index);
/// ```
#[macro_export]
macro_rules! micro_printf {
    ($($arg:tt)+) => {
        $crate::__private::report_default($crate::__private::format_args!($($arg)+))
    };
}
