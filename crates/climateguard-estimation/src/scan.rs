//! Scan generations: each page scan takes a ticket, and only the latest
//! ticket's completion is delivered.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque ticket for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanTicket(u64);

impl ScanTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ScanGeneration {
    latest: AtomicU64,
}

impl ScanGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new scan, superseding every earlier ticket.
    pub fn begin(&self) -> ScanTicket {
        ScanTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: ScanTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}
