// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader, Protection, RegionInfo, RegionState};
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

enum RegionData {
    Owned(Vec<u8>),
    Mapped(Mmap),
    Reserved(u64),
}

impl RegionData {
    fn len(&self) -> u64 {
        match self {
            RegionData::Owned(v) => v.len() as u64,
            RegionData::Mapped(m) => m.len() as u64,
            RegionData::Reserved(size) => *size,
        }
    }

    fn bytes(&self) -> &[u8] {
        match self {
            RegionData::Owned(v) => v.as_slice(),
            RegionData::Mapped(m) => m.deref(),
            RegionData::Reserved(_) => &[],
        }
    }
}

struct SnapshotRegion {
    base: Address,
    protection: Protection,
    data: RegionData,
}

impl SnapshotRegion {
    fn info(&self) -> RegionInfo {
        let state = match self.data {
            RegionData::Reserved(_) => RegionState::Reserved,
            _ => RegionState::Committed,
        };
        RegionInfo::new(self.base, self.data.len(), state, self.protection)
    }
}

/// Captured memory regions placed at fixed base addresses. Addresses outside
/// every region behave like unmapped memory.
pub struct SnapshotMemory {
    regions: Vec<SnapshotRegion>,
}

impl SnapshotMemory {
    pub fn new() -> Self {
        Self { regions: Vec::new() }
    }

    pub fn from_bytes(base: Address, data: Vec<u8>) -> Self {
        let mut mem = Self::new();
        mem.add_region(base, data, Protection::ReadWrite);
        mem
    }

    /// Map a raw dump file read-only and place it at `base`.
    pub fn from_file<P: AsRef<Path>>(path: P, base: Address) -> Result<Self, MemoryError> {
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and the file is not modified while mapped
        let mmap = unsafe { Mmap::map(&file) }?;
        let mut mem = Self::new();
        mem.insert(SnapshotRegion {
            base,
            protection: Protection::Read,
            data: RegionData::Mapped(mmap),
        });
        Ok(mem)
    }

    pub fn add_region(&mut self, base: Address, data: Vec<u8>, protection: Protection) {
        self.insert(SnapshotRegion {
            base,
            protection,
            data: RegionData::Owned(data),
        });
    }

    /// Address space that exists but has no backing pages.
    pub fn add_reserved(&mut self, base: Address, size: u64) {
        self.insert(SnapshotRegion {
            base,
            protection: Protection::NoAccess,
            data: RegionData::Reserved(size),
        });
    }

    fn insert(&mut self, region: SnapshotRegion) {
        let pos = self
            .regions
            .partition_point(|r| r.base.as_u64() < region.base.as_u64());
        self.regions.insert(pos, region);
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn total_size(&self) -> u64 {
        self.regions.iter().map(|r| r.data.len()).sum()
    }

    fn find(&self, addr: Address) -> Option<&SnapshotRegion> {
        self.regions.iter().find(|r| r.info().contains(addr))
    }
}

impl Default for SnapshotMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryReader for SnapshotMemory {
    fn query_region(&self, addr: Address) -> Result<RegionInfo, MemoryError> {
        self.find(addr)
            .map(SnapshotRegion::info)
            .ok_or(MemoryError::RegionNotFound(addr))
    }

    fn copy_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        let region = self.find(addr).ok_or(MemoryError::RegionNotFound(addr))?;
        let bytes = region.data.bytes();
        let start = addr
            .offset_from(region.base)
            .ok_or(MemoryError::ReadFailed(addr))?;
        let end = start
            .checked_add(buf.len())
            .filter(|&end| end <= bytes.len())
            .ok_or(MemoryError::ReadFailed(addr))?;
        buf.copy_from_slice(&bytes[start..end]);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("snapshot ({} regions, {} bytes)", self.regions.len(), self.total_size())
    }
}
