#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
//! Internal implementation crate for [`micro-reporter`].
//!
//! # Overview
//!
//! This crate contains the allocation-free text handling that the
//! [`micro-reporter`] error reporter formats into. Everything here works on
//! fixed-size storage that lives on the caller's stack, so it is usable at
//! the moment the heap is exhausted.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`micro-reporter`] crate, not this
//! one.
//!
//! # Truncation
//!
//! [`TruncatingBuffer`] accepts any amount of text through
//! [`core::fmt::Write`] but only keeps the prefix that fits. The cut is always
//! made on a UTF-8 character boundary, so the stored bytes are a valid `str`
//! at all times. Overflow is recorded in a flag instead of being reported as a
//! formatting error.
//!
//! [`micro-reporter`]: https://docs.rs/micro-reporter/latest/micro_reporter/

mod buffer;

pub use buffer::TruncatingBuffer;
