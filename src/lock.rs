#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

#[cfg(feature = "std")]
use std::sync::PoisonError;

/// Mutual exclusion that never refuses to hand out its guard.
///
/// On `std` builds a poisoned mutex is recovered instead of panicking, so a
/// recording sink whose write panicked keeps capturing later reports.
#[cfg(any(test, feature = "alloc"))]
#[repr(transparent)]
pub(crate) struct Lock<T>(impl_::Mutex<T>);

#[cfg(any(test, feature = "alloc"))]
pub(crate) type LockGuard<'a, T> = impl_::MutexGuard<'a, T>;

#[cfg(any(test, feature = "alloc"))]
impl<T> Lock<T> {
    #[must_use]
    pub(crate) const fn new(value: T) -> Self {
        Self(impl_::Mutex::new(value))
    }

    #[inline]
    pub(crate) fn lock(&self) -> LockGuard<'_, T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.lock();

        #[cfg(feature = "std")]
        let guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);

        guard
    }
}

/// A process-wide slot holding at most one `Copy` value.
#[repr(transparent)]
pub(crate) struct SlotLock<T: 'static + Copy + Send + Sync>(impl_::RwLock<Option<T>>);

impl<T: 'static + Copy + Send + Sync> SlotLock<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    #[inline]
    pub(crate) fn get(&self) -> Option<T> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);

        *guard
    }

    /// Stores `value` if the slot is empty, otherwise hands it back.
    pub(crate) fn set_if_empty(&self, value: T) -> Result<(), T> {
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        #[cfg(feature = "std")]
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);

        match *guard {
            Some(_) => Err(value),
            None => {
                *guard = Some(value);
                Ok(())
            }
        }
    }

    pub(crate) fn replace(&self, value: T) -> Option<T> {
        #[cfg(not(feature = "std"))]
        let mut guard = self.0.write();

        #[cfg(feature = "std")]
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);

        guard.replace(value)
    }
}

/// A cell written exactly once, even when several contexts race to
/// initialize it.
#[repr(transparent)]
pub(crate) struct InitOnce<T>(
    #[cfg(feature = "std")] std::sync::OnceLock<T>,
    #[cfg(not(feature = "std"))] spin::Once<T>,
);

impl<T> InitOnce<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        #[cfg(feature = "std")]
        let inner = std::sync::OnceLock::new();

        #[cfg(not(feature = "std"))]
        let inner = spin::Once::new();

        Self(inner)
    }

    #[inline]
    pub(crate) fn get_or_init<F: FnOnce() -> T>(&self, init: F) -> &T {
        #[cfg(feature = "std")]
        let value = self.0.get_or_init(init);

        #[cfg(not(feature = "std"))]
        let value = self.0.call_once(init);

        value
    }

    #[inline]
    pub(crate) fn get(&self) -> Option<&T> {
        self.0.get()
    }
}
