//! The default reporting path must work on firmware without a heap.
//!
//! A counting global allocator watches the current thread while reports go
//! through the singleton, the sink slot and the macros.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
    sync::atomic::{AtomicUsize, Ordering},
};

use micro_reporter::{
    ErrorReporter,
    error::SinkError,
    micro::{DEFAULT_BUFFER_LEN, LINE_ENDING},
    micro_error_reporter, micro_printf, report_error, sink,
};

struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

// SAFETY: every call is forwarded unchanged to the system allocator.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        // SAFETY: the caller upholds `GlobalAlloc::alloc`'s contract.
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by `alloc` above with this `layout`.
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

static BYTES: AtomicUsize = AtomicUsize::new(0);
static WRITES: AtomicUsize = AtomicUsize::new(0);

fn count_bytes(text: &str) -> Result<(), SinkError> {
    BYTES.fetch_add(text.len(), Ordering::Relaxed);
    WRITES.fetch_add(1, Ordering::Relaxed);
    Ok(())
}

fn allocations_during(f: impl FnOnce()) -> usize {
    let before = ALLOCATIONS.with(Cell::get);
    f();
    ALLOCATIONS.with(Cell::get) - before
}

#[test]
fn test_reporting_does_not_allocate() {
    assert!(sink::install_sink(&count_bytes).is_ok());
    // First use builds the singleton and touches thread-locals.
    let _ = micro_error_reporter().report_str("warm up");
    BYTES.store(0, Ordering::Relaxed);
    WRITES.store(0, Ordering::Relaxed);

    let long = "0123456789".repeat(100);
    let allocations = allocations_during(|| {
        let reporter = micro_error_reporter();
        let _ = reporter.report(format_args!("Type {} ({}) not supported.", "INT64", 4));
        let _ = report_error!(reporter, "{long}");
        micro_printf!("Node {} failed to invoke", 7);
    });

    assert_eq!(allocations, 0);
    assert_eq!(WRITES.load(Ordering::Relaxed), 3);
    assert_eq!(
        BYTES.load(Ordering::Relaxed),
        "Type INT64 (4) not supported.".len()
            + DEFAULT_BUFFER_LEN
            + "Node 7 failed to invoke".len()
            + 2 * LINE_ENDING.len()
    );
}
