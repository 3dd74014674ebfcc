//! Hand-off to the process memory-reporting subsystem.
//!
//! Discovery and registration belong to that subsystem; this side only
//! produces reports on demand.

use crate::domain::AccountingDomain;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Memory obtained from the heap allocator.
    Heap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReport {
    pub path: &'static str,
    pub kind: ReportKind,
    pub units: Units,
    pub amount: usize,
    pub description: &'static str,
}

pub trait MemoryReporter {
    fn collect_reports(&self, sink: &mut dyn FnMut(MemoryReport));
}

impl MemoryReporter for AccountingDomain {
    fn collect_reports(&self, sink: &mut dyn FnMut(MemoryReport)) {
        sink(MemoryReport {
            path: self.report_path(),
            kind: ReportKind::Heap,
            units: Units::Bytes,
            amount: self.allocated_bytes(),
            description: self.description(),
        });
    }
}
