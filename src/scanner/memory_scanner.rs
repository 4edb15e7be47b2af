// Tue Jan 13 2026 - Alex

use crate::memory::{raw_value, read_prefix, try_read, Address, MemoryReader};
use crate::scanner::{IdentifiedStruct, ScanReport, ScanResult, ScanStatistics};
use crate::structure::evaluation::{evaluate_fields, FieldEvaluation, ACCEPT_CONFIDENCE};
use crate::structure::{StructDescriptor, KNOWN_STRUCTURES};

/// Cursor step when nothing is accepted at an offset.
pub const SCAN_STEP: usize = 4;

const HALF_PASS_CONFIDENCE: i32 = 45;
const SINGLE_FIELD_CONFIDENCE: i32 = 40;

/// Upper bound on the up-front result reservation; longer scans grow the vector.
const MAX_RESERVED_RESULTS: usize = 4096;

/// Best candidate seen at the current offset.
struct Candidate {
    descriptor: &'static StructDescriptor,
    confidence: i32,
    bytes: Vec<u8>,
}

/// Walks an address range and claims non-overlapping known structures.
pub struct MemoryScanner<R: MemoryReader> {
    reader: R,
    structures: Vec<&'static StructDescriptor>,
    category: String,
}

impl<R: MemoryReader> MemoryScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            structures: KNOWN_STRUCTURES.to_vec(),
            category: "CheckMemory".to_string(),
        }
    }

    /// Candidate layouts, in tie-break order.
    pub fn with_structures(mut self, structures: &[&'static StructDescriptor]) -> Self {
        self.structures = structures.to_vec();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn structures(&self) -> &[&'static StructDescriptor] {
        &self.structures
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Potential-match tiers: every field plausible with a passing mean, at least
    /// half the fields passing with a moderate mean, or a lone field scoring 40+.
    fn is_potential_match(evaluation: &FieldEvaluation) -> bool {
        let mean = evaluation.mean_confidence;
        let count = evaluation.field_count();

        (evaluation.all_plausible() && mean >= ACCEPT_CONFIDENCE)
            || (evaluation.passing_fields() >= count / 2 && mean >= HALF_PASS_CONFIDENCE)
            || (count == 1 && mean >= SINGLE_FIELD_CONFIDENCE)
    }

    /// Scan `[start, start + length)`. Unreadable memory is recorded as raw data,
    /// never an error. The report is logged to the `scan_complete` category and returned.
    pub fn scan(&self, start: Address, length: usize) -> ScanReport {
        let category = self.category.as_str();
        let end = start.as_u64().saturating_add(length as u64);

        log::info!(
            target: category,
            "[+] Scanning memory region {} - 0x{:08x} ({} bytes) in {}",
            start,
            end,
            length,
            self.reader.describe()
        );

        let mut results = Vec::with_capacity(reserved_results(length));
        let mut identified = Vec::new();
        let mut offset = 0usize;

        while offset < length {
            let Some(addr) = start.checked_add(offset) else {
                log::warn!(target: category, "[-] Address overflow past {} at offset 0x{:x}", start, offset);
                break;
            };
            let remaining = length - offset;

            if remaining < SCAN_STEP {
                results.push(self.raw_tail(addr, remaining));
                break;
            }

            let mut current = ScanResult::unmatched(addr);
            let best = self.attempt_all(addr, offset, remaining, &mut current);

            match best {
                Some(candidate) if candidate.confidence >= ACCEPT_CONFIDENCE => {
                    let size = candidate.descriptor.total_size;
                    log::info!(
                        target: category,
                        "[+] Identified {} at {}, skipping {} bytes to avoid overlap",
                        candidate.descriptor.name,
                        addr,
                        size
                    );

                    current.raw_value = Some(raw_value(&candidate.bytes));
                    current.value_size = size;
                    current.accepted = true;
                    results.push(current);
                    identified.push(IdentifiedStruct {
                        address: addr,
                        descriptor: candidate.descriptor,
                        confidence: candidate.confidence,
                        bytes: candidate.bytes,
                    });
                    offset += size;
                }
                _ => {
                    let bytes = read_prefix(&self.reader, addr, SCAN_STEP);
                    current.value_size = bytes.as_ref().map_or(SCAN_STEP, Vec::len);
                    current.raw_value = bytes.as_deref().map(raw_value);
                    results.push(current);
                    offset += SCAN_STEP;
                }
            }
        }

        let statistics = ScanStatistics::compute(length, &results, &identified);
        let report = ScanReport {
            start,
            length,
            results,
            identified,
            statistics,
        };
        report.log();
        report
    }

    /// Try every layout that fits at `addr`, updating `current` and returning the
    /// highest-confidence potential match. Ties keep the earlier layout.
    fn attempt_all(
        &self,
        addr: Address,
        offset: usize,
        remaining: usize,
        current: &mut ScanResult,
    ) -> Option<Candidate> {
        let category = self.category.as_str();
        let mut best: Option<Candidate> = None;

        for &descriptor in &self.structures {
            if descriptor.total_size > remaining {
                continue;
            }

            let Ok(bytes) = try_read(&self.reader, addr, descriptor.total_size) else {
                continue;
            };

            let evaluation = evaluate_fields(descriptor, &bytes);
            let mean = evaluation.mean_confidence;
            let passing = evaluation.passing_fields();
            let count = evaluation.field_count();

            if !Self::is_potential_match(&evaluation) {
                log::debug!(
                    target: category,
                    "[~] Tested {} at offset 0x{:x} ({}) - confidence: {}% ({}/{} fields passing) [REJECTED]",
                    descriptor.name,
                    offset,
                    addr,
                    mean,
                    passing,
                    count
                );
                continue;
            }

            log::info!(
                target: category,
                "[!] Potential {} found at offset 0x{:x} ({}) - confidence: {}% ({}/{} fields passing)",
                descriptor.name,
                offset,
                addr,
                mean,
                passing,
                count
            );

            current.num_potential_matches += 1;
            if mean > current.best_confidence {
                current.best_confidence = mean;
                current.best_datatype = Some(descriptor.name);
                best = Some(Candidate {
                    descriptor,
                    confidence: mean,
                    bytes,
                });
            }
        }

        best
    }

    /// Fewer than one step left: record what is readable once and stop.
    fn raw_tail(&self, addr: Address, remaining: usize) -> ScanResult {
        let mut result = ScanResult::unmatched(addr);
        result.value_size = remaining;
        result.raw_value = read_prefix(&self.reader, addr, remaining).as_deref().map(raw_value);
        result
    }
}

fn reserved_results(length: usize) -> usize {
    (length / SCAN_STEP + 1).min(MAX_RESERVED_RESULTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Protection, SnapshotMemory};
    use crate::structure::known::{D3DDEVICE_CREATION_PARAMETERS, D3DDISPLAYMODE, D3DVIEWPORT8};
    use crate::structure::FieldDescriptor;
    use crate::validation::FieldValidator;

    const BASE: u64 = 0x014c_e740;

    fn dwords(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn scanner(bytes: Vec<u8>) -> MemoryScanner<SnapshotMemory> {
        let mut mem = SnapshotMemory::new();
        mem.add_region(Address::new(BASE), bytes, Protection::ReadWrite);
        MemoryScanner::new(mem).with_category("test")
    }

    fn assert_no_overlap(report: &ScanReport) {
        for id in &report.identified {
            let start = id.address.as_u64();
            for other in &report.identified {
                if other.address != id.address {
                    assert!(!id.overlaps(other), "{} overlaps {}", id.address, other.address);
                }
            }
            for result in &report.results {
                let a = result.address.as_u64();
                if a != start {
                    assert!(a < start || a >= id.end(), "result {} inside {}", result.address, id.address);
                }
            }
        }
    }

    fn assert_terminates(report: &ScanReport) {
        assert!(report.results.len() <= report.length.max(1));
        for pair in report.results.windows(2) {
            assert!(pair[0].address < pair[1].address);
        }
    }

    #[test]
    fn test_single_display_mode() {
        let report = scanner(dwords(&[1024, 768, 60, 21])).scan(Address::new(BASE), 16);

        assert_eq!(report.identified.len(), 1);
        let id = &report.identified[0];
        assert_eq!(id.descriptor.name, "D3DDISPLAYMODE");
        assert_eq!(id.address, Address::new(BASE));
        assert!(id.confidence >= 90);
        assert_eq!(id.bytes, dwords(&[1024, 768, 60, 21]));

        assert_eq!(report.results.len(), 1);
        assert!(report.results[0].accepted);
        assert_eq!(report.results[0].value_size, 16);
        assert_eq!(report.statistics.identified_bytes, 16);
    }

    #[test]
    fn test_zeroed_buffer_is_never_accepted() {
        let report = scanner(vec![0u8; 16]).scan(Address::new(BASE), 16);

        assert!(report.identified.is_empty());
        assert_eq!(report.results.len(), 4);
        assert!(report.results.iter().all(|r| !r.accepted));

        // display mode scores 47 and creation parameters 55: both potential, neither accepted
        let first = &report.results[0];
        assert_eq!(first.num_potential_matches, 2);
        assert_eq!(first.best_datatype, Some("D3DDEVICE_CREATION_PARAMETERS"));
        assert_eq!(first.best_confidence, 55);
        assert_eq!(first.raw_value, Some(0));
        assert_eq!(report.statistics.multiple_matches, 1);
        assert!(!report.results[1].has_potential_match());
    }

    #[test]
    fn test_back_to_back_display_modes() {
        let bytes = dwords(&[1024, 768, 60, 21, 800, 600, 75, 22]);
        let report = scanner(bytes).scan(Address::new(BASE), 32);

        assert_eq!(report.identified.len(), 2);
        let size = D3DDISPLAYMODE.total_size;
        assert_eq!(report.identified[0].descriptor.name, "D3DDISPLAYMODE");
        assert_eq!(report.identified[1].descriptor.name, "D3DDISPLAYMODE");
        assert_eq!(report.identified[1].address, report.identified[0].address + size);

        // the viewport reading of the first 24 bytes ties at 91 and loses on order
        assert_eq!(report.results[0].num_potential_matches, 2);
        assert_no_overlap(&report);
        assert_terminates(&report);
    }

    #[test]
    fn test_partially_mapped_range() {
        let mut mem = SnapshotMemory::new();
        mem.add_region(Address::new(BASE), vec![0x11, 0x22, 0x33], Protection::Read);
        let report = MemoryScanner::new(mem).scan(Address::new(BASE), 16);

        assert!(report.identified.is_empty());
        assert_eq!(report.results.len(), 4);
        let first = &report.results[0];
        assert_eq!(first.value_size, 3);
        assert_eq!(first.raw_value, Some(0x33_2211));
        assert!(report.results[1..].iter().all(|r| r.raw_value.is_none()));
        assert_eq!(report.statistics.unreadable_offsets, 3);
    }

    #[test]
    fn test_short_tail_recorded_once() {
        let mut mem = SnapshotMemory::new();
        mem.add_region(Address::new(BASE), vec![0x11, 0x22, 0x33], Protection::Read);
        let report = MemoryScanner::new(mem).scan(Address::new(BASE), 3);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].value_size, 3);
        assert_eq!(report.results[0].raw_value, Some(0x33_2211));

        let mut bytes = dwords(&[1024, 768, 60, 21]);
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let report = scanner(bytes).scan(Address::new(BASE), 18);
        assert_eq!(report.identified.len(), 1);
        let tail = report.results.last().unwrap();
        assert_eq!(tail.address, Address::new(BASE + 16));
        assert_eq!(tail.value_size, 2);
        assert_eq!(tail.raw_value, Some(0xBBAA));
    }

    #[test]
    fn test_unmapped_range_degrades_to_raw_data() {
        let mem = SnapshotMemory::new();
        let report = MemoryScanner::new(mem).scan(Address::new(BASE), 64);
        assert!(report.identified.is_empty());
        assert_eq!(report.results.len(), 16);
        assert_eq!(report.statistics.unreadable_offsets, 16);
        assert_terminates(&report);
    }

    #[test]
    fn test_structure_subset_and_order() {
        let bytes = dwords(&[1024, 768, 60, 21, 1024, 768]);
        let report = scanner(bytes)
            .with_structures(&[&D3DVIEWPORT8, &D3DDISPLAYMODE])
            .scan(Address::new(BASE), 24);

        assert_eq!(report.identified[0].descriptor.name, "D3DVIEWPORT8");
        assert_eq!(report.identified.len(), 1);
    }

    #[test]
    fn test_creation_parameters_found_after_junk() {
        let mut bytes = dwords(&[0xDEAD_BEEF]);
        bytes.extend(dwords(&[0, 1, 0, 0x40]));
        let report = scanner(bytes).scan(Address::new(BASE), 20);

        assert_eq!(report.identified.len(), 1);
        assert_eq!(report.identified[0].descriptor.name, D3DDEVICE_CREATION_PARAMETERS.name);
        assert_eq!(report.identified[0].address, Address::new(BASE + 4));
        assert!(!report.results[0].accepted);
    }

    static LONE_FIELD: [FieldDescriptor; 1] = [FieldDescriptor::dword(0, "Swap", FieldValidator::SwapEffect)];
    static LONE: StructDescriptor = StructDescriptor::new("LONE", 4, &LONE_FIELD);

    #[test]
    fn test_single_field_tier() {
        // a bare swap effect of 0 scores 20: below every tier
        let report = scanner(dwords(&[0, 2])).with_structures(&[&LONE]).scan(Address::new(BASE), 8);
        assert!(!report.results[0].has_potential_match());
        assert_eq!(report.identified.len(), 1);
        assert_eq!(report.identified[0].address, Address::new(BASE + 4));
        assert_eq!(report.identified[0].confidence, 90);
    }

    #[test]
    fn test_result_reservation_is_capped() {
        assert_eq!(reserved_results(0), 1);
        assert_eq!(reserved_results(64), 17);
        assert_eq!(reserved_results(usize::MAX), MAX_RESERVED_RESULTS);

        // results past the reservation still land
        let report = scanner(vec![0u8; 16]).scan(Address::new(BASE), 1 << 16);
        assert!(report.identified.is_empty());
        assert_eq!(report.results.len(), (1 << 16) / SCAN_STEP);
        assert_terminates(&report);
    }

    #[test]
    fn test_noise_never_overlaps() {
        let mut state: u32 = 0x1234_5678;
        let mut bytes = Vec::with_capacity(2048);
        for i in 0..512u32 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let word = match i % 7 {
                0 => 0,
                1 => state % 64,
                2 => 21,
                _ => state,
            };
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes.extend(dwords(&[640, 480, 60, 22]));
        let length = bytes.len();

        let report = scanner(bytes).scan(Address::new(BASE), length);
        assert_no_overlap(&report);
        assert_terminates(&report);
        let covered: usize = report.identified.iter().map(|id| id.size()).sum();
        assert!(covered <= length);
    }
}
