//! Recovering the size of a block at release/resize time.
//!
//! `free` and `realloc` never get told how big a block is, so the counting
//! layer needs one of two strategies:
//!
//! - [`SizeHeader`] stores the requested size in a small header in front of
//!   the user pointer. The counter then tracks requested bytes exactly.
//! - [`UsableSize`] asks the real allocator for the usable size of the block
//!   (`malloc_usable_size` / `malloc_size`). No header, but the counter
//!   tracks what the allocator actually reserved, which may exceed the
//!   request.

use core::ffi::c_void;

use crate::real::RealAllocator;

/// Header length in front of every block. Keeps the user pointer at the
/// fundamental alignment `malloc` guarantees.
pub const HEADER_SIZE: usize = 16;

const _: () = assert!(HEADER_SIZE >= core::mem::size_of::<usize>());
const _: () = assert!(HEADER_SIZE % core::mem::align_of::<usize>() == 0);

/// # Safety
///
/// `install` and `base_of` must be inverses, and `charged_size` must return
/// the same value for a block until it is resized or released.
pub unsafe trait SizeTracking {
    /// Extra bytes requested from the real allocator for every block.
    const OVERHEAD: usize;

    /// Records `size` for the block the real allocator returned at `base`
    /// and returns the pointer handed to the caller.
    unsafe fn install(base: *mut c_void, size: usize) -> *mut c_void;

    /// Maps a caller pointer back to the real allocator's block.
    unsafe fn base_of(ptr: *mut c_void) -> *mut c_void;

    /// Bytes the counter holds for the live block at `ptr`.
    unsafe fn charged_size<R: RealAllocator>(real: &R, ptr: *mut c_void) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SizeHeader;

unsafe impl SizeTracking for SizeHeader {
    const OVERHEAD: usize = HEADER_SIZE;

    #[inline]
    unsafe fn install(base: *mut c_void, size: usize) -> *mut c_void {
        debug_assert!(!base.is_null());
        base.cast::<usize>().write(size);
        base.cast::<u8>().add(HEADER_SIZE).cast()
    }

    #[inline]
    unsafe fn base_of(ptr: *mut c_void) -> *mut c_void {
        ptr.cast::<u8>().sub(HEADER_SIZE).cast()
    }

    #[inline]
    unsafe fn charged_size<R: RealAllocator>(_real: &R, ptr: *mut c_void) -> usize {
        Self::base_of(ptr).cast::<usize>().read()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UsableSize;

unsafe impl SizeTracking for UsableSize {
    const OVERHEAD: usize = 0;

    #[inline]
    unsafe fn install(base: *mut c_void, _size: usize) -> *mut c_void {
        base
    }

    #[inline]
    unsafe fn base_of(ptr: *mut c_void) -> *mut c_void {
        ptr
    }

    #[inline]
    unsafe fn charged_size<R: RealAllocator>(real: &R, ptr: *mut c_void) -> usize {
        let usable = real.usable_size(ptr);
        debug_assert!(usable.is_some(), "real allocator cannot report usable sizes");
        usable.unwrap_or(0)
    }
}
