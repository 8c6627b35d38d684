//! Host-stack headroom for script calls.
//!
//! A script call nests `call_any`, `invoke` and the script's own closures, so
//! the host stack grows with script recursion. The call stack's depth limit
//! stops runaway scripts; this module makes sure legal depths below that
//! limit never hit the end of the thread's stack. wasm32 has no `stacker`
//! support, and there the body simply runs in place.

/// Free stack a script body must start with.
#[cfg(not(target_arch = "wasm32"))]
const MIN_HEADROOM: usize = 128 * 1024;

/// Size of each fresh stack segment once headroom runs out.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run one script body, switching to a new stack segment first if less than
/// `MIN_HEADROOM` remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack_headroom<R>(body: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(MIN_HEADROOM, SEGMENT_SIZE, body)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack_headroom<R>(body: impl FnOnce() -> R) -> R {
    body()
}
