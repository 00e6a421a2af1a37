//! Bridge from the [`log`] facade to an [`ErrorReporter`].
//!
//! Code that already logs through `log::error!` and friends can be pointed at
//! the device's output channel by installing a [`ReporterLogger`]:
//!
//! ```
//! use log::LevelFilter;
//!
//! micro_reporter::logger::init_logger(LevelFilter::Warn).expect("logger already set");
//! log::error!("tensor {} has unsupported type", 4);
//! ```
//!
//! Each record becomes one report of the form `[LEVEL] target: message`.

use core::fmt;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{
    reporter::ErrorReporter,
    singleton::{Singleton, micro_error_reporter},
};

/// A [`Log`] implementation that writes records through a reporter.
///
/// Without an explicit reporter, records go to
/// [`micro_error_reporter`](crate::micro_error_reporter).
#[derive(Clone, Copy)]
pub struct ReporterLogger {
    reporter: Option<&'static dyn ErrorReporter>,
    level: LevelFilter,
}

impl ReporterLogger {
    /// A logger writing through the default reporter at `level` and above.
    #[must_use]
    pub const fn new(level: LevelFilter) -> Self {
        Self {
            reporter: None,
            level,
        }
    }

    /// A logger writing through `reporter` at `level` and above.
    #[must_use]
    pub const fn with_reporter(reporter: &'static dyn ErrorReporter, level: LevelFilter) -> Self {
        Self {
            reporter: Some(reporter),
            level,
        }
    }

    /// The most verbose level this logger forwards.
    pub const fn level(&self) -> LevelFilter {
        self.level
    }

    fn reporter(&self) -> &'static dyn ErrorReporter {
        match self.reporter {
            Some(reporter) => reporter,
            None => micro_error_reporter(),
        }
    }
}

impl fmt::Debug for ReporterLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterLogger")
            .field("custom_reporter", &self.reporter.is_some())
            .field("level", &self.level)
            .finish()
    }
}

impl Log for ReporterLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let _ = self.reporter().report(format_args!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {}
}

static LOGGER: Singleton<ReporterLogger> = Singleton::new();

/// Installs a [`ReporterLogger`] on the default reporter as the global
/// [`log`] logger and sets the maximum level.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ReporterLogger::new(level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
