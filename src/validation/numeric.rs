// Tue Jan 13 2026 - Alex

use crate::validation::{dword, ValidationResult};

const DRIVER_VERSION_CEILING: i64 = 1 << 56;

pub fn validate_range_u32(bytes: &[u8], expected_size: usize, min: u32, max: u32) -> ValidationResult {
    let Some(value) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for UINT", 0);
    };

    if (min..=max).contains(&value) {
        ValidationResult::valid("Value in expected range", 90)
    } else if value == 0 {
        ValidationResult::valid("Zero value (possibly uninitialized)", 20)
    } else {
        ValidationResult::invalid("Value outside expected range", -20)
    }
}

/// 32-bit `BOOL`, read signed.
pub fn validate_bool(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for BOOL", 0);
    };

    match raw as i32 {
        1 => ValidationResult::valid("TRUE (valid)", 95),
        0 => ValidationResult::valid("FALSE (valid)", 95),
        2..=255 => ValidationResult::valid("Non-zero (treated as TRUE)", 20),
        _ => ValidationResult::invalid("Suspicious BOOL value", -20),
    }
}

pub fn validate_viewport_coordinate(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(coord) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for viewport coordinate", 0);
    };

    match coord {
        0 => ValidationResult::valid("Zero coordinate (common for X/Y origin)", 90),
        1..=16384 => ValidationResult::valid("Valid screen coordinate", 90),
        16385..=65536 => ValidationResult::valid("Large but plausible coordinate", 60),
        _ => ValidationResult::invalid("Unreasonably large coordinate", -10),
    }
}

pub fn validate_viewport_dimension(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(dimension) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for viewport dimension", 0);
    };

    match dimension {
        0 => ValidationResult::invalid("Zero dimension (invalid for viewport)", -50),
        1..=16384 => ValidationResult::valid("Valid viewport dimension", 95),
        16385..=65536 => ValidationResult::valid("Large but plausible dimension", 70),
        _ => ValidationResult::invalid("Unreasonably large dimension", -25),
    }
}

pub fn validate_texture_dimension(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(dimension) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for texture dimension", 0);
    };

    match dimension {
        0 => ValidationResult::invalid("Zero texture dimension (invalid)", -50),
        64..=16384 if dimension.is_power_of_two() => {
            ValidationResult::valid("Valid power-of-2 texture dimension", 95)
        }
        64..=16384 => ValidationResult::valid("Valid texture dimension (not power-of-2)", 80),
        1..=63 => ValidationResult::valid("Small texture dimension", 70),
        16385..=32768 => ValidationResult::valid("Large texture dimension", 70),
        _ => ValidationResult::invalid("Unreasonably large texture dimension", 10),
    }
}

pub fn validate_vertex_index(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(max_index) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for vertex index", 0);
    };

    match max_index {
        0 => ValidationResult::invalid("Zero max vertex index (invalid)", -30),
        1..=65535 => ValidationResult::valid("Low max vertex index", 70),
        65536..=16_777_216 => ValidationResult::valid("Reasonable max vertex index", 90),
        _ => ValidationResult::valid("High max vertex index", 80),
    }
}

pub fn validate_max_streams(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(streams) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for max streams", 0);
    };

    match streams {
        0 => ValidationResult::invalid("Zero max streams (invalid)", -40),
        1..=16 => ValidationResult::valid("Valid max vertex streams", 95),
        17..=32 => ValidationResult::valid("High but plausible max streams", 70),
        _ => ValidationResult::invalid("Unreasonably high max streams", 20),
    }
}

/// Shader version token: major in bits 8..16, minor in bits 0..8.
pub fn validate_shader_version(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(version) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for shader version", 0);
    };

    let major = (version >> 8) & 0xFF;
    let minor = version & 0xFF;

    if version == 0 {
        ValidationResult::valid("No shader support", 80)
    } else if major == 1 && minor <= 4 {
        ValidationResult::valid("Valid D3D8 shader version", 95)
    } else if major <= 3 && minor <= 10 {
        ValidationResult::valid("Later shader version (D3D9+)", 70)
    } else if version < 0x1_0000 {
        ValidationResult::valid("Plausible shader version", 50)
    } else {
        ValidationResult::invalid("Invalid shader version format", 20)
    }
}

/// 64-bit driver version (product.version.subversion.build packed in words).
pub fn validate_driver_version(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let raw: Option<[u8; 8]> = if expected_size == 8 {
        bytes.try_into().ok()
    } else {
        None
    };
    let Some(raw) = raw else {
        return ValidationResult::invalid("Invalid field size for driver version", 0);
    };

    let version = i64::from_le_bytes(raw);
    if version == 0 {
        ValidationResult::valid("Zero driver version", 60)
    } else if version > 0 && version < DRIVER_VERSION_CEILING {
        ValidationResult::valid("Plausible driver version", 85)
    } else {
        ValidationResult::invalid("Suspicious driver version", 30)
    }
}

pub fn validate_vendor_id(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(vendor) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for vendor ID", 0);
    };

    match vendor {
        0x10DE => ValidationResult::valid("NVIDIA vendor ID", 95),
        0x1002 => ValidationResult::valid("AMD/ATI vendor ID", 95),
        0x8086 => ValidationResult::valid("Intel vendor ID", 95),
        0x1039 | 0x5333 | 0x102B | 0x121A => ValidationResult::valid("Known GPU vendor ID", 90),
        v if v > 0x1000 && v < 0xFFFF => ValidationResult::valid("Plausible vendor ID", 60),
        _ => ValidationResult::invalid("Unknown vendor ID", 30),
    }
}

pub fn vendor_name(vendor: u32) -> Option<&'static str> {
    match vendor {
        0x10DE => Some("NVIDIA"),
        0x1002 => Some("AMD/ATI"),
        0x8086 => Some("Intel"),
        0x1039 => Some("SiS"),
        0x5333 => Some("S3 Graphics"),
        0x102B => Some("Matrox"),
        0x121A => Some("3dfx"),
        _ => None,
    }
}

pub fn validate_pci_device_id(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(id) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for device ID", 0);
    };

    match id {
        0 => ValidationResult::valid("Zero device ID (possibly uninitialized)", 20),
        1..=0xFFFF => ValidationResult::valid("Plausible PCI device ID", 80),
        _ => ValidationResult::invalid("Device ID wider than 16 bits", -20),
    }
}

pub fn validate_pci_subsystem(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(id) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for subsystem ID", 0);
    };

    if id == 0 {
        ValidationResult::valid("No subsystem ID", 60)
    } else {
        ValidationResult::valid("Plausible PCI subsystem ID", 70)
    }
}

/// `year << 16 | month << 8 | day`, or 0/1 for unsigned/signed without a date.
pub fn validate_whql_level(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(whql) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for WHQLLevel", 0);
    };

    if whql == 0 || whql == 1 {
        return ValidationResult::valid("Possibly valid WHQL", 50);
    }

    let year = (whql >> 16) & 0xFFFF;
    let month = (whql >> 8) & 0xFF;
    let day = whql & 0xFF;

    if year < 1999 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return ValidationResult::invalid("Invalid WHQLLevel", 0);
    }

    ValidationResult::valid("WHQL Level is valid year/month/day value", 90)
}
