//! Fixed-capacity text buffer that drops whatever does not fit.
//!
//! # Safety invariant
//!
//! `bytes[..len]` is valid UTF-8 at every point in time. The only way bytes
//! enter the buffer is [`TruncatingBuffer::push_str`], which copies a prefix
//! of a `&str` that ends on a character boundary, and the only way bytes leave
//! is [`TruncatingBuffer::truncate`], which also cuts on a character boundary.
//! Both live in this file, so the invariant can be checked locally.

use core::fmt;

/// A stack-allocated text buffer of `N` bytes that silently truncates.
///
/// Writes past the capacity are discarded and the buffer is marked as
/// truncated. Writing never fails, so formatting through
/// [`core::fmt::Write`] always runs to completion.
///
/// # Examples
///
/// ```
/// use core::fmt::Write;
///
/// use micro_reporter_internals::TruncatingBuffer;
///
/// let mut buffer = TruncatingBuffer::<8>::new();
/// write!(buffer, "{} apples", 3).unwrap();
/// assert_eq!(buffer.as_str(), "3 apples");
/// assert!(!buffer.is_truncated());
///
/// write!(buffer, " and pears").unwrap();
/// assert_eq!(buffer.as_str(), "3 apples");
/// assert!(buffer.is_truncated());
/// ```
pub struct TruncatingBuffer<const N: usize> {
    /// Backing storage. Only `bytes[..len]` is meaningful.
    bytes: [u8; N],
    /// Number of initialized, valid UTF-8 bytes at the start of `bytes`.
    len: usize,
    /// Set once any text had to be dropped.
    truncated: bool,
}

impl<const N: usize> TruncatingBuffer<N> {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Total number of bytes the buffer can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of bytes currently stored.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no text is stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes that can still be written before truncation starts.
    #[inline]
    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    /// Returns `true` if any text has been dropped since the buffer was
    /// created or last cleared.
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The stored text.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: `bytes[..len]` is valid UTF-8, see the module invariant.
        unsafe { core::str::from_utf8_unchecked(&self.bytes[..self.len]) }
    }

    /// Appends as much of `text` as fits.
    ///
    /// Returns `true` if all of `text` was stored. When it does not fit, the
    /// longest prefix ending on a character boundary is kept and the buffer
    /// is marked as truncated.
    pub fn push_str(&mut self, text: &str) -> bool {
        let mut end = text.len().min(self.remaining());
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        self.bytes[self.len..self.len + end].copy_from_slice(&text.as_bytes()[..end]);
        self.len += end;

        if end < text.len() {
            self.truncated = true;
            false
        } else {
            true
        }
    }

    /// Shortens the stored text to at most `max_len` bytes.
    ///
    /// The cut is moved backwards to the nearest character boundary, so the
    /// resulting length can be smaller than `max_len`. Does nothing if the
    /// buffer is already short enough.
    pub fn truncate(&mut self, max_len: usize) {
        if self.len <= max_len {
            return;
        }

        let mut end = max_len;
        while !self.as_str().is_char_boundary(end) {
            end -= 1;
        }

        self.len = end;
        self.truncated = true;
    }

    /// Removes all text and resets the truncation flag.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }
}

impl<const N: usize> Default for TruncatingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for TruncatingBuffer<N> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.push_str(text);
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for TruncatingBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TruncatingBuffer")
            .field("text", &self.as_str())
            .field("capacity", &N)
            .field("truncated", &self.truncated)
            .finish()
    }
}

impl<const N: usize> fmt::Display for TruncatingBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
