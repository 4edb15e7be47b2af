// Tue Jan 13 2026 - Alex

use crate::validation::ValidationResult;

pub const GUID_SIZE: usize = 16;

/// NUL-terminated printable ASCII inside a fixed buffer.
pub fn validate_fixed_string(bytes: &[u8], expected_size: usize) -> ValidationResult {
    if expected_size == 0 || bytes.len() != expected_size {
        return ValidationResult::invalid("Invalid field size for driver string", 0);
    }

    let Some(len) = bytes.iter().position(|&b| b == 0) else {
        return ValidationResult::invalid("String not null-terminated", 20);
    };

    if len == 0 {
        ValidationResult::valid("Empty string", 30)
    } else if bytes[..len].iter().all(|&b| (0x20..=0x7E).contains(&b)) {
        ValidationResult::valid("Valid driver string", 90)
    } else {
        ValidationResult::invalid("Contains non-printable characters", 40)
    }
}

/// Printable prefix of a fixed string buffer, for reports.
pub fn fixed_string_preview(bytes: &[u8], max_chars: usize) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let text: String = bytes[..end]
        .iter()
        .take(max_chars)
        .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '.' })
        .collect();
    if end > max_chars {
        format!("{}...", text)
    } else {
        text
    }
}

/// RFC 4122 shape: variant bits `10` in byte 8, version 1..=5 in the top
/// nibble of the little-endian `Data3` word.
pub fn validate_guid(bytes: &[u8], expected_size: usize) -> ValidationResult {
    if expected_size != GUID_SIZE || bytes.len() != GUID_SIZE {
        return ValidationResult::invalid("Invalid field size for GUID", 0);
    }

    if bytes[8] & 0xC0 != 0x80 {
        return ValidationResult::invalid("Invalid GUID", 0);
    }

    let version = bytes[7] >> 4;
    if !(1..=5).contains(&version) {
        return ValidationResult::invalid("Invalid GUID", 0);
    }

    ValidationResult::valid("Possibly valid GUID", 70)
}

pub fn format_guid(bytes: &[u8]) -> Option<String> {
    let b: &[u8; GUID_SIZE] = bytes.try_into().ok()?;
    let data1 = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
    let data2 = u16::from_le_bytes([b[4], b[5]]);
    let data3 = u16::from_le_bytes([b[6], b[7]]);
    Some(format!(
        "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
        data1, data2, data3, b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]
    ))
}
