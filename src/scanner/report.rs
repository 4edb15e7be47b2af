// Tue Jan 13 2026 - Alex

use crate::memory::{raw_value, Address};
use crate::scanner::{IdentifiedStruct, ScanResult};
use crate::structure::{evaluate_fields, FieldDescriptor};
use crate::validation::text::{fixed_string_preview, format_guid};
use crate::validation::{device_type_name, format_name, ConfidenceLevel, FieldValidator};

pub const SCAN_COMPLETE_LOG: &str = "scan_complete";

const STRING_PREVIEW_CHARS: usize = 48;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStatistics {
    pub total_scanned: usize,
    pub identified_bytes: usize,
    pub unidentified_bytes: usize,
    pub identified_percentage: f64,
    pub structures_found: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    pub multiple_matches: usize,
    pub unreadable_offsets: usize,
}

impl ScanStatistics {
    pub fn compute(length: usize, results: &[ScanResult], identified: &[IdentifiedStruct]) -> Self {
        let identified_bytes: usize = identified.iter().map(IdentifiedStruct::size).sum();
        let mut stats = Self {
            total_scanned: length,
            identified_bytes,
            unidentified_bytes: length.saturating_sub(identified_bytes),
            identified_percentage: if length == 0 {
                0.0
            } else {
                identified_bytes as f64 * 100.0 / length as f64
            },
            structures_found: identified.len(),
            multiple_matches: results.iter().filter(|r| r.is_ambiguous()).count(),
            unreadable_offsets: results.iter().filter(|r| r.raw_value.is_none()).count(),
            ..Self::default()
        };

        for id in identified {
            match id.level() {
                ConfidenceLevel::High => stats.high_confidence += 1,
                ConfidenceLevel::Medium => stats.medium_confidence += 1,
                ConfidenceLevel::Low => stats.low_confidence += 1,
            }
        }

        stats
    }
}

/// Outcome of one scan pass. Not persisted; logged and handed back to the caller.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub start: Address,
    pub length: usize,
    pub results: Vec<ScanResult>,
    pub identified: Vec<IdentifiedStruct>,
    pub statistics: ScanStatistics,
}

impl ScanReport {
    pub fn end(&self) -> u64 {
        self.start.as_u64().saturating_add(self.length as u64)
    }

    pub fn unidentified(&self) -> impl Iterator<Item = &ScanResult> {
        self.results.iter().filter(|r| !r.accepted)
    }

    pub fn log(&self) {
        for line in self.render_lines() {
            log::info!(target: SCAN_COMPLETE_LOG, "{}", line);
        }
    }

    /// Human-readable report: identified structures as a field tree, then the
    /// unidentified offsets, then statistics.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            "=== IDENTIFIED STRUCTURES ===".to_string(),
            format!(
                "Scanned Region: {} - 0x{:08x} ({} bytes)",
                self.start,
                self.end(),
                self.length
            ),
            String::new(),
        ];

        if self.identified.is_empty() {
            lines.push("No high-confidence structures identified.".to_string());
        }
        for id in &self.identified {
            render_identified(id, &mut lines);
        }

        lines.push(String::new());
        lines.push("=== UNIDENTIFIED MEMORY ===".to_string());

        let mut any_unidentified = false;
        for result in self.unidentified() {
            any_unidentified = true;
            let value = match result.raw_value {
                Some(v) => format_raw_value(v, result.value_size),
                None => "<unreadable>".to_string(),
            };
            let note = match result.best_datatype {
                Some(name) if result.best_confidence > 0 => {
                    format!("Low confidence match ({} {}%)", name, result.best_confidence)
                }
                _ => "Raw data".to_string(),
            };
            lines.push(format!("{} | {:<24} | {}", result.address, value, note));
        }
        if !any_unidentified {
            lines.push("All memory successfully identified as part of structures.".to_string());
        }

        let s = &self.statistics;
        lines.push(String::new());
        lines.push("=== SCAN STATISTICS ===".to_string());
        lines.push(format!("Total memory scanned: {} bytes", s.total_scanned));
        lines.push(format!(
            "Memory identified as structures: {} bytes ({:.1}%)",
            s.identified_bytes, s.identified_percentage
        ));
        lines.push(format!("Structures found: {}", s.structures_found));
        lines.push(format!("High confidence structures (80-100%): {}", s.high_confidence));
        lines.push(format!("Medium confidence structures (60-79%): {}", s.medium_confidence));
        lines.push(format!("Low confidence structures (<60%): {}", s.low_confidence));
        lines.push(format!("Addresses with multiple potential matches: {}", s.multiple_matches));
        lines.push(format!("Unreadable offsets: {}", s.unreadable_offsets));
        lines.push(String::new());

        lines
    }
}

fn render_identified(id: &IdentifiedStruct, lines: &mut Vec<String>) {
    lines.push(format!(
        "┌─ {} at {} (Confidence: {}%)",
        id.descriptor.name, id.address, id.confidence
    ));

    let evaluation = evaluate_fields(id.descriptor, &id.bytes);
    let last = evaluation.fields.len().saturating_sub(1);
    for (i, verdict) in evaluation.fields.iter().enumerate() {
        let field = verdict.field;
        let branch = if i == last { "└─" } else { "├─" };
        let value = field
            .slice(&id.bytes)
            .map(|bytes| describe_value(field, bytes))
            .unwrap_or_else(|| "<missing>".to_string());
        lines.push(format!(
            "│  {} {}: {} [{}] ({} - {}%)",
            branch,
            field.name,
            value,
            id.address + field.offset,
            verdict.result.reason,
            verdict.result.confidence
        ));
    }
    lines.push("│".to_string());
}

/// Field value as shown in the report, decoded where the field type allows it.
pub fn describe_value(field: &FieldDescriptor, bytes: &[u8]) -> String {
    let raw = raw_value(bytes);
    match field.validator {
        FieldValidator::FixedString => format!("\"{}\"", fixed_string_preview(bytes, STRING_PREVIEW_CHARS)),
        FieldValidator::Guid => format_guid(bytes).unwrap_or_else(|| format_raw_value(raw, bytes.len())),
        FieldValidator::Format if bytes.len() == 4 => {
            format!("{} {}", format_raw_value(raw, 4), format_name(raw as u32))
        }
        FieldValidator::DeviceType if bytes.len() == 4 => {
            format!("{} {}", format_raw_value(raw, 4), device_type_name(raw as u32))
        }
        FieldValidator::ZDepth if bytes.len() == 4 => format!("{}", f32::from_bits(raw as u32)),
        _ => format_raw_value(raw, bytes.len()),
    }
}

/// Hex plus signed decimal for the common widths, bare hex otherwise.
pub fn format_raw_value(value: u64, size: usize) -> String {
    match size {
        1 => format!("0x{:02X} ({})", value as u8, value as u8 as i8),
        2 => format!("0x{:04X} ({})", value as u16, value as u16 as i16),
        4 => format!("0x{:08X} ({})", value as u32, value as u32 as i32),
        8 => format!("0x{:016X} ({})", value, value as i64),
        _ => format!("0x{:X}", value),
    }
}
