// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use crate::structure::StructDescriptor;
use crate::validation::ConfidenceLevel;

/// Sentinel for "no attempt at this offset produced a potential match".
pub const NO_MATCH: i32 = -1;

/// What the scanner saw at one visited offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub address: Address,
    /// Little-endian value of the first `min(value_size, 8)` bytes; `None` when
    /// not even a best-effort read succeeded.
    pub raw_value: Option<u64>,
    pub value_size: usize,
    pub best_datatype: Option<&'static str>,
    pub best_confidence: i32,
    pub num_potential_matches: usize,
    pub accepted: bool,
}

impl ScanResult {
    pub fn unmatched(address: Address) -> Self {
        Self {
            address,
            raw_value: None,
            value_size: 0,
            best_datatype: None,
            best_confidence: NO_MATCH,
            num_potential_matches: 0,
            accepted: false,
        }
    }

    pub fn has_potential_match(&self) -> bool {
        self.best_confidence != NO_MATCH
    }

    pub fn is_ambiguous(&self) -> bool {
        self.num_potential_matches > 1
    }
}

/// A structure accepted by the scanner. Owns the bytes read when it was accepted.
#[derive(Debug, Clone)]
pub struct IdentifiedStruct {
    pub address: Address,
    pub descriptor: &'static StructDescriptor,
    pub confidence: i32,
    pub bytes: Vec<u8>,
}

impl IdentifiedStruct {
    pub fn size(&self) -> usize {
        self.descriptor.total_size
    }

    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.confidence)
    }

    /// One past the last byte claimed by this structure.
    pub fn end(&self) -> u64 {
        self.address.as_u64().saturating_add(self.size() as u64)
    }

    pub fn overlaps(&self, other: &IdentifiedStruct) -> bool {
        self.address.as_u64() < other.end() && other.address.as_u64() < self.end()
    }
}
