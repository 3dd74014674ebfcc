use core::ffi::c_void;
use core::marker::PhantomData;
use core::ptr;

use libc::size_t;
use tracing::trace;

use crate::domain::AccountingDomain;
use crate::real::RealAllocator;
use crate::size::SizeTracking;

/// Forwards the four C allocation primitives to a [`RealAllocator`] and keeps
/// an [`AccountingDomain`] in step with the bytes that are live.
///
/// Return values and failure modes are the real allocator's: the counter is
/// only touched once the outcome of the real call is known, and only for
/// blocks that actually exist afterwards.
pub struct CountingAllocator<'a, S, R> {
    domain: &'a AccountingDomain,
    real: R,
    sizing: PhantomData<fn() -> S>,
}

impl<'a, S: SizeTracking, R: RealAllocator> CountingAllocator<'a, S, R> {
    pub const fn new(domain: &'a AccountingDomain, real: R) -> Self {
        Self {
            domain,
            real,
            sizing: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Same contract as C `malloc`.
    pub unsafe fn malloc(&self, size: size_t) -> *mut c_void {
        // Saturates to a request no real allocator can satisfy.
        let base = self.real.malloc(size.saturating_add(S::OVERHEAD));
        if base.is_null() {
            trace!("malloc({size}) failed");
            return base;
        }

        let ptr = S::install(base, size);
        let charged = S::charged_size(&self.real, ptr);
        self.domain.record_alloc(charged);
        trace!("malloc({size}) = {ptr:p}, charged {charged}");
        ptr
    }

    /// # Safety
    ///
    /// Same contract as C `calloc`.
    pub unsafe fn calloc(&self, count: size_t, size: size_t) -> *mut c_void {
        let Some(bytes) = count.checked_mul(size) else {
            // Let the real allocator report its own overflow failure.
            let failed = self.real.calloc(count, size);
            debug_assert!(failed.is_null(), "calloc({count}, {size}) overflowed but succeeded");
            trace!("calloc({count}, {size}) overflows");
            return failed;
        };

        let base = if S::OVERHEAD == 0 {
            self.real.calloc(count, size)
        } else {
            self.real.calloc(1, bytes.saturating_add(S::OVERHEAD))
        };
        if base.is_null() {
            trace!("calloc({count}, {size}) failed");
            return base;
        }

        let ptr = S::install(base, bytes);
        let charged = S::charged_size(&self.real, ptr);
        self.domain.record_alloc(charged);
        trace!("calloc({count}, {size}) = {ptr:p}, charged {charged}");
        ptr
    }

    /// # Safety
    ///
    /// Same contract as C `realloc`. `ptr` is null or a live block from this
    /// allocator.
    pub unsafe fn realloc(&self, ptr: *mut c_void, new_size: size_t) -> *mut c_void {
        if ptr.is_null() {
            return self.malloc(new_size);
        }

        let old_size = S::charged_size(&self.real, ptr);

        // A header block never asks the real allocator for zero bytes, so a
        // freeing convention has to be reproduced here.
        if new_size == 0 && S::OVERHEAD != 0 && R::REALLOC_ZERO_FREES {
            self.domain.record_release(old_size);
            self.real.free(S::base_of(ptr));
            trace!("realloc({ptr:p}, 0) released {old_size}");
            return ptr::null_mut();
        }

        let base = self
            .real
            .realloc(S::base_of(ptr), new_size.saturating_add(S::OVERHEAD));
        if base.is_null() {
            let released =
                R::REALLOC_FAILURE_FREES || (new_size == 0 && R::REALLOC_ZERO_FREES);
            if released {
                self.domain.record_release(old_size);
            }
            trace!("realloc({ptr:p}, {new_size}) returned null, original released: {released}");
            return base;
        }

        let new_ptr = S::install(base, new_size);
        let charged = S::charged_size(&self.real, new_ptr);
        self.domain.record_resize(old_size, charged);
        trace!("realloc({ptr:p}, {new_size}) = {new_ptr:p}, charged {old_size} -> {charged}");
        new_ptr
    }

    /// # Safety
    ///
    /// Same contract as C `free`. `ptr` is null or a live block from this
    /// allocator.
    pub unsafe fn free(&self, ptr: *mut c_void) {
        if ptr.is_null() {
            return;
        }

        let size = S::charged_size(&self.real, ptr);
        self.domain.record_release(size);
        self.real.free(S::base_of(ptr));
        trace!("free({ptr:p}) released {size}");
    }

    /// Bytes the domain holds for the live block at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` is a live block from this allocator.
    pub unsafe fn charged_size(&self, ptr: *mut c_void) -> usize {
        S::charged_size(&self.real, ptr)
    }
}
