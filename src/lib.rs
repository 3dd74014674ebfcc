//! Memory accounting for a third-party C library.
//!
//! The library's calls to `malloc`, `calloc`, `realloc` and `free` are
//! redirected, per translation unit, onto a [`CountingAllocator`] that
//! forwards to the host allocator and keeps a process-wide byte total the
//! memory reporter can sample.

pub mod config;
pub mod counting;
pub mod domain;
pub mod globals;
pub mod glue;
pub mod hooks;
pub mod interpose;
pub mod logger;
pub mod real;
pub mod reporter;
pub mod size;

pub use counting::CountingAllocator;
pub use domain::{AccountingDomain, DomainStats};
pub use real::{Libc, RealAllocator};
pub use reporter::{MemoryReport, MemoryReporter};
pub use size::{SizeHeader, SizeTracking, UsableSize};
