//! Process-wide instances constructed on first use.
//!
//! The default reporter has to be reachable before anything else in the
//! runtime has been set up, so it cannot be created by an init routine.
//! Instead it lives in a [`Singleton`], which constructs the value the first
//! time it is asked for and hands out the same `&'static` reference forever
//! after.
//!
//! # Lifetime
//!
//! A [`Singleton`] is meant to be stored in a `static`. Its value is never
//! dropped, and callers only ever receive shared references, so there is no
//! way to move, replace or destroy the instance while other code holds on to
//! it.

use core::fmt;

use crate::{lock::InitOnce, micro::MicroErrorReporter, reporter::ErrorReporter};

/// A value that is constructed exactly once, on first access.
///
/// Concurrent first accesses are safe: one of them runs the initializer, the
/// others wait for it and then observe the same value.
///
/// # Examples
///
/// ```
/// use core::sync::atomic::{AtomicUsize, Ordering};
///
/// use micro_reporter::singleton::Singleton;
///
/// static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);
/// static ARENA_LIMIT: Singleton<usize> = Singleton::new();
///
/// fn arena_limit() -> &'static usize {
///     ARENA_LIMIT.get_or_init(|| {
///         CONSTRUCTED.fetch_add(1, Ordering::Relaxed);
///         16 * 1024
///     })
/// }
///
/// assert!(core::ptr::eq(arena_limit(), arena_limit()));
/// assert_eq!(CONSTRUCTED.load(Ordering::Relaxed), 1);
/// ```
pub struct Singleton<T>(InitOnce<T>);

impl<T: 'static + Send + Sync> Singleton<T> {
    /// Creates an uninitialized singleton.
    #[must_use]
    pub const fn new() -> Self {
        Self(InitOnce::new())
    }

    /// Returns the instance, running `init` to create it if this is the
    /// first access.
    ///
    /// `init` runs at most once over the life of the process.
    #[inline]
    pub fn get_or_init<F: FnOnce() -> T>(&'static self, init: F) -> &'static T {
        self.0.get_or_init(init)
    }

    /// Returns the instance if it has already been created.
    #[inline]
    pub fn get(&'static self) -> Option<&'static T> {
        self.0.get()
    }

    /// Returns `true` once the instance exists.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.0.get().is_some()
    }
}

impl<T: 'static + Send + Sync> Default for Singleton<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Singleton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Singleton")
            .field("initialized", &self.0.get().is_some())
            .finish()
    }
}

static MICRO_ERROR_REPORTER: Singleton<MicroErrorReporter> = Singleton::new();

/// The process-wide default reporter.
///
/// Safe to call at any point, including before any other initialization.
/// Every call returns a reference to the same instance.
///
/// ```
/// use micro_reporter::micro_error_reporter;
///
/// let first = micro_error_reporter();
/// let second = micro_error_reporter();
/// assert!(core::ptr::addr_eq(first, second));
/// ```
pub fn micro_error_reporter() -> &'static dyn ErrorReporter {
    micro_error_reporter_concrete()
}

/// The process-wide default reporter as its concrete type.
pub fn micro_error_reporter_concrete() -> &'static MicroErrorReporter {
    MICRO_ERROR_REPORTER.get_or_init(MicroErrorReporter::new)
}
