//! Tests for the process-wide default reporter writing to an installed sink.
//!
//! The sink slot is shared by every test in this binary, so each test takes
//! `SERIAL` before touching it. The capture sink is local so this binary
//! builds with the default, allocation-free feature set.

use std::sync::{Mutex, MutexGuard, PoisonError};

use micro_reporter::{
    ErrorReporter,
    error::{ReportError, SinkError},
    micro::{DEFAULT_BUFFER_LEN, LINE_ENDING},
    micro_error_reporter, micro_error_reporter_concrete, micro_printf,
    report_error,
    reporter::status,
    sink::{self, DebugSink},
};

struct CaptureSink {
    text: Mutex<String>,
    failure: Mutex<Option<SinkError>>,
}

impl CaptureSink {
    const fn new() -> Self {
        Self {
            text: Mutex::new(String::new()),
            failure: Mutex::new(None),
        }
    }

    fn contents(&self) -> String {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn take(&self) -> String {
        std::mem::take(&mut *self.text.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn set_failing(&self, failure: Option<SinkError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = failure;
    }
}

impl DebugSink for CaptureSink {
    fn write_str(&self, text: &str) -> Result<(), SinkError> {
        if let Some(failure) = *self.failure.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(failure);
        }
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
        Ok(())
    }
}

static SERIAL: Mutex<()> = Mutex::new(());
static SINK: CaptureSink = CaptureSink::new();

fn setup() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    let _ = sink::replace_sink(&SINK);
    SINK.set_failing(None);
    SINK.take();
    guard
}

#[test]
fn test_singleton_identity() {
    let _guard = setup();

    let first = micro_error_reporter();
    let references: Vec<&'static dyn ErrorReporter> =
        (0..1000).map(|_| micro_error_reporter()).collect();
    assert!(references.iter().all(|r| std::ptr::addr_eq(*r, first)));
    assert!(std::ptr::addr_eq(first, micro_error_reporter_concrete()));
}

#[test]
fn test_report_reaches_installed_sink() {
    let _guard = setup();

    let result = micro_error_reporter().report(format_args!("{} apples", 3));
    assert_eq!(result, Ok(8));
    assert_eq!(SINK.take(), "3 apples\r\n");
}

#[test]
fn test_micro_printf_uses_default_reporter() {
    let _guard = setup();

    micro_printf!("Didn't find op for builtin opcode '{}'", "CONV_2D");
    assert_eq!(SINK.take(), "Didn't find op for builtin opcode 'CONV_2D'\r\n");
}

#[test]
fn test_truncated_prefix_is_emitted() {
    let _guard = setup();

    let long = "0123456789".repeat(100);
    let result = report_error!(micro_error_reporter(), "{long}");
    assert_eq!(result, Ok(DEFAULT_BUFFER_LEN - LINE_ENDING.len()));

    let written = SINK.take();
    assert_eq!(written.len(), DEFAULT_BUFFER_LEN);
    assert_eq!(
        written,
        format!("{}{LINE_ENDING}", &long[..DEFAULT_BUFFER_LEN - LINE_ENDING.len()])
    );
}

#[test]
fn test_sink_failure_is_isolated() {
    let _guard = setup();

    SINK.set_failing(Some(SinkError::with_code(-5)));
    let result = micro_error_reporter().report_str("lost");
    assert_eq!(result, Err(ReportError::Sink(SinkError::with_code(-5))));
    assert_eq!(status(&result), -5);
    micro_printf!("also lost");

    SINK.set_failing(None);
    let result = micro_error_reporter().report_str("recovered");
    assert_eq!(status(&result), 9);
    assert_eq!(SINK.take(), "recovered\r\n");
}

#[test]
fn test_install_refuses_second_sink() {
    let _guard = setup();

    static OTHER: CaptureSink = CaptureSink::new();
    let error = sink::install_sink(&OTHER).unwrap_err();
    assert!(std::ptr::addr_eq(error.0, &OTHER));
    assert_eq!(error.to_string(), "a debug sink is already installed");

    assert!(sink::current_sink().is_some());
    let _ = micro_error_reporter().report_str("to the first sink");
    assert_eq!(OTHER.contents(), "");
    assert_eq!(SINK.take(), "to the first sink\r\n");
}

#[test]
fn test_replace_sink_redirects_output() {
    let _guard = setup();

    static REDIRECT: CaptureSink = CaptureSink::new();
    let previous = sink::replace_sink(&REDIRECT).expect("a sink was installed");
    assert!(std::ptr::addr_eq(previous, &SINK));

    let _ = micro_error_reporter().report_str("redirected");
    assert_eq!(REDIRECT.take(), "redirected\r\n");
    assert_eq!(SINK.contents(), "");

    sink::replace_sink(&SINK);
}
