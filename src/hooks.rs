//! C entry points the force-include header redirects `malloc`, `calloc`,
//! `realloc` and `free` onto. See `include/alloc_hooks.h`.
//!
//! Nothing here overrides the process allocator: only translation units
//! compiled with the header call these symbols.

use core::ffi::c_void;
use libc::size_t;

use crate::globals::{ALLOCATOR, WRAPPED};
use crate::logger::init_logging;

#[no_mangle]
pub unsafe extern "C" fn alloc_hooks_malloc(size: size_t) -> *mut c_void {
    init_logging();
    ALLOCATOR.malloc(size)
}

#[no_mangle]
pub unsafe extern "C" fn alloc_hooks_calloc(count: size_t, size: size_t) -> *mut c_void {
    init_logging();
    ALLOCATOR.calloc(count, size)
}

#[no_mangle]
pub unsafe extern "C" fn alloc_hooks_realloc(ptr: *mut c_void, size: size_t) -> *mut c_void {
    init_logging();
    ALLOCATOR.realloc(ptr, size)
}

#[no_mangle]
pub unsafe extern "C" fn alloc_hooks_free(ptr: *mut c_void) {
    init_logging();
    ALLOCATOR.free(ptr)
}

/// Live bytes of the wrapped library. Callable from any thread.
#[no_mangle]
pub extern "C" fn alloc_hooks_allocated_bytes() -> size_t {
    WRAPPED.allocated_bytes()
}

#[no_mangle]
pub extern "C" fn alloc_hooks_peak_bytes() -> size_t {
    WRAPPED.stats().peak_bytes
}
