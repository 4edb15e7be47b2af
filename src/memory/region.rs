// Tue Jan 13 2026 - Alex

use crate::memory::{Address, Protection};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Committed,
    Reserved,
    Free,
}

/// Metadata of the single region that contains a queried address.
#[derive(Debug, Clone)]
pub struct RegionInfo {
    base: Address,
    size: u64,
    state: RegionState,
    protection: Protection,
}

impl RegionInfo {
    pub fn new(base: Address, size: u64, state: RegionState, protection: Protection) -> Self {
        Self {
            base,
            size,
            state,
            protection,
        }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn end(&self) -> u64 {
        self.base.as_u64().saturating_add(self.size)
    }

    pub fn state(&self) -> RegionState {
        self.state
    }

    pub fn protection(&self) -> Protection {
        self.protection
    }

    pub fn is_committed(&self) -> bool {
        self.state == RegionState::Committed
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.as_u64() >= self.base.as_u64() && addr.as_u64() < self.end()
    }

    /// Whether `[addr, addr + len)` lies entirely inside this region.
    pub fn contains_span(&self, addr: Address, len: usize) -> bool {
        match addr.as_u64().checked_add(len as u64) {
            Some(end) => self.contains(addr) && end <= self.end(),
            None => false,
        }
    }

    /// Bytes readable from `addr` up to the end of the region.
    pub fn remaining_from(&self, addr: Address) -> u64 {
        if self.contains(addr) {
            self.end() - addr.as_u64()
        } else {
            0
        }
    }
}

impl fmt::Display for RegionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, 0x{:08x}) {:?} {}",
            self.base,
            self.end(),
            self.state,
            self.protection
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> RegionInfo {
        RegionInfo::new(Address::new(0x1000), 0x100, RegionState::Committed, Protection::Read)
    }

    #[test]
    fn test_contains_span() {
        let r = region();
        assert!(r.contains_span(Address::new(0x1000), 0x100));
        assert!(r.contains_span(Address::new(0x10fc), 4));
        assert!(!r.contains_span(Address::new(0x10fd), 4));
        assert!(!r.contains_span(Address::new(0x0fff), 2));
        assert!(!r.contains_span(Address::new(u64::MAX), 2));
    }

    #[test]
    fn test_remaining_from() {
        let r = region();
        assert_eq!(r.remaining_from(Address::new(0x10fd)), 3);
        assert_eq!(r.remaining_from(Address::new(0x2000)), 0);
    }
}
