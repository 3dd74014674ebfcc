//! Scoped redirection for Rust code that calls the C primitives by name.
//!
//! The functions below share names and signatures with `libc::malloc` and
//! friends. [`counting_scope!`] imports them explicitly into a module, which
//! shadows a `use libc::*;` glob in that module and nowhere else.

use core::ffi::c_void;
use libc::size_t;

use crate::globals::ALLOCATOR;
use crate::logger::init_logging;

/// # Safety
///
/// Same contract as C `malloc`.
pub unsafe fn malloc(size: size_t) -> *mut c_void {
    init_logging();
    ALLOCATOR.malloc(size)
}

/// # Safety
///
/// Same contract as C `calloc`.
pub unsafe fn calloc(count: size_t, size: size_t) -> *mut c_void {
    init_logging();
    ALLOCATOR.calloc(count, size)
}

/// # Safety
///
/// Same contract as C `realloc`; `ptr` must come from this module.
pub unsafe fn realloc(ptr: *mut c_void, size: size_t) -> *mut c_void {
    init_logging();
    ALLOCATOR.realloc(ptr, size)
}

/// # Safety
///
/// Same contract as C `free`; `ptr` must come from this module.
pub unsafe fn free(ptr: *mut c_void) {
    init_logging();
    ALLOCATOR.free(ptr)
}

/// Wraps a module so that its unqualified `malloc`, `calloc`, `realloc` and
/// `free` calls are charged to the wrapped-library domain.
///
/// ```
/// alloc_hooks::counting_scope! {
///     mod legacy {
///         use libc::*;
///
///         pub unsafe fn scratch(len: size_t) -> *mut c_void {
///             malloc(len)
///         }
///
///         pub unsafe fn release(ptr: *mut c_void) {
///             free(ptr)
///         }
///     }
/// }
///
/// let before = alloc_hooks::globals::allocated_bytes();
/// unsafe {
///     let ptr = legacy::scratch(32);
///     assert!(alloc_hooks::globals::allocated_bytes() >= before + 32);
///     legacy::release(ptr);
/// }
/// ```
///
/// A module that explicitly imports one of the four names from elsewhere
/// fails to compile. Fully qualified calls such as `libc::malloc` are left
/// alone.
#[macro_export]
macro_rules! counting_scope {
    ($(#[$attr:meta])* $vis:vis mod $name:ident { $($body:tt)* }) => {
        $(#[$attr])*
        $vis mod $name {
            #[allow(unused_imports)]
            use $crate::interpose::{calloc, free, malloc, realloc};

            $($body)*
        }
    };
}
