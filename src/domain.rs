use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// One accounting domain: a set of allocation entry points whose live bytes
/// are summed into a single counter.
///
/// All updates are single atomic read-modify-writes, so the counter can be
/// sampled from any thread while other threads allocate.
#[derive(Debug)]
pub struct AccountingDomain {
    name: &'static str,
    report_path: &'static str,
    description: &'static str,
    live: AtomicUsize,
    peak: AtomicUsize,
    allocations: AtomicU64,
    releases: AtomicU64,
    resizes: AtomicU64,
}

/// Point-in-time view of an [`AccountingDomain`].
///
/// Fields are loaded one at a time, so a snapshot taken under concurrent
/// traffic is not a single consistent cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainStats {
    pub live_bytes: usize,
    pub peak_bytes: usize,
    pub allocations: u64,
    pub releases: u64,
    pub resizes: u64,
}

impl AccountingDomain {
    pub const fn new(
        name: &'static str,
        report_path: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            report_path,
            description,
            live: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            allocations: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            resizes: AtomicU64::new(0),
        }
    }

    /// Where the memory-reporting subsystem files this domain's total.
    pub fn report_path(&self) -> &'static str {
        self.report_path
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Current byte total of live blocks.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> DomainStats {
        DomainStats {
            live_bytes: self.live.load(Ordering::Relaxed),
            peak_bytes: self.peak.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            resizes: self.resizes.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(crate) fn record_alloc(&self, size: usize) {
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.grow(size);
    }

    #[inline]
    pub(crate) fn record_release(&self, size: usize) {
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.shrink(size);
    }

    #[inline]
    pub(crate) fn record_resize(&self, old_size: usize, new_size: usize) {
        self.resizes.fetch_add(1, Ordering::Relaxed);
        if new_size >= old_size {
            self.grow(new_size - old_size);
        } else {
            self.shrink(old_size - new_size);
        }
    }

    fn grow(&self, delta: usize) {
        let live = self.live.fetch_add(delta, Ordering::Relaxed).wrapping_add(delta);
        self.peak.fetch_max(live, Ordering::Relaxed);
    }

    fn shrink(&self, delta: usize) {
        let previous = self.live.fetch_sub(delta, Ordering::Relaxed);
        debug_assert!(
            previous >= delta,
            "{}: released {delta} bytes with only {previous} live",
            self.name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        static DOMAIN: AccountingDomain = AccountingDomain::new("empty", "explicit/empty", "");
        assert_eq!(DOMAIN.allocated_bytes(), 0);
        assert_eq!(DOMAIN.stats(), DomainStats::default());
    }

    #[test]
    fn resize_applies_signed_delta() {
        let domain = AccountingDomain::new("resize", "explicit/resize", "");
        domain.record_alloc(100);
        domain.record_resize(100, 40);
        assert_eq!(domain.allocated_bytes(), 40);
        domain.record_resize(40, 250);
        assert_eq!(domain.allocated_bytes(), 250);
        domain.record_resize(250, 250);
        assert_eq!(domain.allocated_bytes(), 250);
        domain.record_release(250);
        assert_eq!(domain.allocated_bytes(), 0);
    }

    #[test]
    fn peak_tracks_high_water_mark() {
        let domain = AccountingDomain::new("peak", "explicit/peak", "");
        domain.record_alloc(64);
        domain.record_alloc(64);
        domain.record_release(64);
        domain.record_alloc(32);

        let stats = domain.stats();
        assert_eq!(stats.live_bytes, 96);
        assert_eq!(stats.peak_bytes, 128);
        assert_eq!(stats.allocations, 3);
        assert_eq!(stats.releases, 1);
        assert_eq!(stats.resizes, 0);
    }
}
