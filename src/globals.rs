use crate::config::{DOMAIN_NAME, REPORT_DESCRIPTION, REPORT_PATH};
use crate::counting::CountingAllocator;
use crate::domain::{AccountingDomain, DomainStats};
use crate::real::Libc;

#[cfg(not(feature = "usable-size"))]
pub type DefaultSizing = crate::size::SizeHeader;

#[cfg(feature = "usable-size")]
pub type DefaultSizing = crate::size::UsableSize;

#[cfg(all(
    feature = "usable-size",
    not(any(target_os = "linux", target_os = "android", target_vendor = "apple"))
))]
compile_error!("the `usable-size` feature needs malloc_usable_size or malloc_size");

/// The domain every redirected call is charged to.
pub static WRAPPED: AccountingDomain =
    AccountingDomain::new(DOMAIN_NAME, REPORT_PATH, REPORT_DESCRIPTION);

pub static ALLOCATOR: CountingAllocator<'static, DefaultSizing, Libc> =
    CountingAllocator::new(&WRAPPED, Libc);

pub fn allocated_bytes() -> usize {
    WRAPPED.allocated_bytes()
}

pub fn stats() -> DomainStats {
    WRAPPED.stats()
}
