//! The allocator underneath the counting layer.
//!
//! Everything here is consumed, never redefined: `Libc` calls straight into
//! the host C library, so a wrapped library that was redirected onto the
//! counting layer cannot recurse back into it.

use core::ffi::c_void;
use libc::size_t;

/// The four C allocation primitives, plus the conventions the counting layer
/// has to mirror when they fail.
///
/// # Safety
///
/// Implementations must behave like the C primitives: blocks returned by
/// `malloc`, `calloc` and `realloc` are aligned for any fundamental type,
/// `calloc` zero-fills, and a request of `usize::MAX` bytes always fails.
pub unsafe trait RealAllocator: Sync {
    /// `realloc(live, 0)` releases the block and returns null.
    const REALLOC_ZERO_FREES: bool;

    /// A failed `realloc` has already released the original block.
    const REALLOC_FAILURE_FREES: bool = false;

    unsafe fn malloc(&self, size: size_t) -> *mut c_void;

    unsafe fn calloc(&self, count: size_t, size: size_t) -> *mut c_void;

    unsafe fn realloc(&self, ptr: *mut c_void, size: size_t) -> *mut c_void;

    unsafe fn free(&self, ptr: *mut c_void);

    /// Usable size of a live block, when the allocator can report it.
    unsafe fn usable_size(&self, _ptr: *mut c_void) -> Option<size_t> {
        None
    }
}

/// The host C library allocator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Libc;

unsafe impl RealAllocator for Libc {
    const REALLOC_ZERO_FREES: bool = cfg!(any(
        all(target_os = "linux", target_env = "gnu"),
        target_os = "android",
        windows
    ));

    unsafe fn malloc(&self, size: size_t) -> *mut c_void {
        libc::malloc(size)
    }

    unsafe fn calloc(&self, count: size_t, size: size_t) -> *mut c_void {
        libc::calloc(count, size)
    }

    unsafe fn realloc(&self, ptr: *mut c_void, size: size_t) -> *mut c_void {
        libc::realloc(ptr, size)
    }

    unsafe fn free(&self, ptr: *mut c_void) {
        libc::free(ptr)
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    unsafe fn usable_size(&self, ptr: *mut c_void) -> Option<size_t> {
        Some(libc::malloc_usable_size(ptr))
    }

    #[cfg(target_vendor = "apple")]
    unsafe fn usable_size(&self, ptr: *mut c_void) -> Option<size_t> {
        Some(libc::malloc_size(ptr as *const c_void))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_requests_fail() {
        unsafe {
            assert!(Libc.malloc(usize::MAX).is_null());
            assert!(Libc.calloc(usize::MAX, 2).is_null());

            let ptr = Libc.malloc(32);
            assert!(!ptr.is_null());
            assert!(Libc.realloc(ptr, usize::MAX).is_null());
            // The block survives a failed resize.
            *(ptr as *mut u8) = 7;
            Libc.free(ptr);
        }
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    #[test]
    fn usable_size_covers_request() {
        unsafe {
            let ptr = Libc.malloc(100);
            let usable = Libc.usable_size(ptr).unwrap();
            assert!(usable >= 100);
            Libc.free(ptr);
        }
    }
}
